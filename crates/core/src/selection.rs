use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::domain::client::StateCode;
use crate::domain::region::state_name;
use crate::filters::FilterState;

/// City/state currently focused on the map.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(rename = "cidade")]
    pub city: Option<String>,
    #[serde(rename = "estado")]
    pub state: Option<StateCode>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.state.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum SelectionIntent {
    MapClick { city: String },
    FilterChange { filters: FilterState },
    /// Breadcrumb root ("Brasil").
    ClearSelection,
}

/// Canonical filter + map state. Every intent maps one value to the next.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub filters: FilterState,
    pub selection: SelectionState,
}

pub fn reduce(
    current: &DashboardState,
    intent: &SelectionIntent,
    dataset: &Dataset,
) -> DashboardState {
    match intent {
        SelectionIntent::MapClick { city } => on_map_click(current, city, dataset),
        SelectionIntent::FilterChange { filters } => DashboardState {
            selection: selection_for_filters(&current.selection, filters, dataset),
            filters: filters.clone(),
        },
        SelectionIntent::ClearSelection => DashboardState {
            filters: current.filters.with_state(None),
            selection: SelectionState::default(),
        },
    }
}

fn on_map_click(current: &DashboardState, city: &str, dataset: &Dataset) -> DashboardState {
    if current.selection.city.as_deref() == Some(city) {
        return DashboardState {
            filters: current.filters.with_state(None),
            selection: SelectionState::default(),
        };
    }
    let Some(region) = dataset.region_by_city(city) else {
        return current.clone();
    };
    DashboardState {
        filters: current.filters.with_state(Some(region.state.clone())),
        selection: SelectionState {
            city: Some(region.city.clone()),
            state: Some(region.state.clone()),
        },
    }
}

fn selection_for_filters(
    current: &SelectionState,
    next: &FilterState,
    dataset: &Dataset,
) -> SelectionState {
    if next.state == current.state {
        return current.clone();
    }
    match &next.state {
        None => SelectionState::default(),
        Some(state) => SelectionState {
            city: dataset.region_by_state(state).map(|region| region.city.clone()),
            state: Some(state.clone()),
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub level: BreadcrumbLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadcrumbLevel {
    Country,
    State,
    City,
}

pub fn breadcrumb(selection: &SelectionState) -> Vec<BreadcrumbItem> {
    let mut items =
        vec![BreadcrumbItem { label: "Brasil".to_string(), level: BreadcrumbLevel::Country }];
    if let Some(state) = &selection.state {
        let label = state_name(state).unwrap_or(state.as_str()).to_string();
        items.push(BreadcrumbItem { label, level: BreadcrumbLevel::State });
    }
    if let Some(city) = &selection.city {
        items.push(BreadcrumbItem { label: city.clone(), level: BreadcrumbLevel::City });
    }
    items
}
