use chrono::NaiveDate;
use tracing::debug;

use crate::dataset::Dataset;
use crate::derivation::{derive, Derivation};
use crate::domain::product::ProductMetrics;
use crate::drilldown::{DrillDownContext, DrillDownKind, DrillDownSlot};
use crate::filters::{FilterState, FilterStore};
use crate::selection::{
    breadcrumb, reduce, BreadcrumbItem, DashboardState, SelectionIntent, SelectionState,
};

/// Session state behind the dashboard: filters, map selection and the open drill-down.
///
/// All filter writes go through [`DashboardStore::dispatch`], so the map selection
/// and the `estado` filter never drift apart.
#[derive(Clone, Debug)]
pub struct DashboardStore {
    dataset: Dataset,
    filters: FilterStore,
    selection: SelectionState,
    drill_down: DrillDownSlot,
    today: NaiveDate,
}

impl DashboardStore {
    pub fn new(dataset: Dataset, initial: FilterState, today: NaiveDate) -> Self {
        Self {
            dataset,
            filters: FilterStore::new(initial),
            selection: SelectionState::default(),
            drill_down: DrillDownSlot::default(),
            today,
        }
    }

    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(Dataset::seed(), FilterState::default(), today)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        self.filters.current()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn state(&self) -> DashboardState {
        DashboardState {
            filters: self.filters.current().clone(),
            selection: self.selection.clone(),
        }
    }

    pub fn breadcrumb(&self) -> Vec<BreadcrumbItem> {
        breadcrumb(&self.selection)
    }

    pub fn dispatch(&mut self, intent: SelectionIntent) -> DashboardState {
        let next = reduce(&self.state(), &intent, &self.dataset);
        let update = self.filters.set(next.filters.clone());
        self.selection = next.selection.clone();
        debug!(
            event_name = "dashboard.dispatch",
            intent = intent_name(&intent),
            filters_changed = update.changed,
            city = self.selection.city.as_deref().unwrap_or("-"),
            "dashboard intent applied"
        );
        next
    }

    /// Filter-panel entry point.
    pub fn set_filters(&mut self, filters: FilterState) -> DashboardState {
        self.dispatch(SelectionIntent::FilterChange { filters })
    }

    pub fn derive(&self) -> Derivation {
        derive(&self.dataset, self.filters.current(), self.today)
    }

    pub fn open_drill_down(
        &mut self,
        kind: DrillDownKind,
        product: Option<&ProductMetrics>,
    ) -> DrillDownContext {
        let context = DrillDownContext::resolve(kind, &self.derive(), product);
        self.drill_down.open(context.clone());
        context
    }

    pub fn drill_down(&self) -> Option<&DrillDownContext> {
        self.drill_down.active()
    }

    pub fn close_drill_down(&mut self) -> Option<DrillDownContext> {
        self.drill_down.close()
    }
}

fn intent_name(intent: &SelectionIntent) -> &'static str {
    match intent {
        SelectionIntent::MapClick { .. } => "map_click",
        SelectionIntent::FilterChange { .. } => "filter_change",
        SelectionIntent::ClearSelection => "clear_selection",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::DashboardStore;
    use crate::domain::client::StateCode;
    use crate::drilldown::DrillDownKind;
    use crate::filters::Period;
    use crate::selection::SelectionIntent;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default()
    }

    fn sp() -> StateCode {
        "SP".parse().unwrap_or_else(|error| panic!("valid code: {error}"))
    }

    #[test]
    fn map_click_narrows_derivation_and_second_click_restores_it() {
        let mut store = DashboardStore::seeded(today());
        let everyone = store.derive().metricas.total_clientes;

        store.dispatch(SelectionIntent::MapClick { city: "São Paulo".to_string() });
        assert_eq!(store.filters().state, Some(sp()));
        assert_eq!(store.derive().metricas.total_clientes, 4);
        assert_eq!(store.breadcrumb().len(), 3);

        store.dispatch(SelectionIntent::MapClick { city: "São Paulo".to_string() });
        assert!(store.selection().is_empty());
        assert_eq!(store.filters().state, None);
        assert_eq!(store.derive().metricas.total_clientes, everyone);
    }

    #[test]
    fn filter_panel_state_moves_map_selection() {
        let mut store = DashboardStore::seeded(today());
        let filters = store.filters().with_state(Some(sp())).with_period(Period::LastYear);

        let state = store.set_filters(filters);
        assert_eq!(state.selection.city.as_deref(), Some("São Paulo"));
        assert_eq!(store.filters().period, Period::LastYear);

        store.set_filters(store.filters().with_state(None));
        assert!(store.selection().is_empty());
        assert_eq!(store.filters().period, Period::LastYear);
    }

    #[test]
    fn drill_down_follows_current_filters_and_closes() {
        let mut store = DashboardStore::seeded(today());
        store.set_filters(store.filters().with_state(Some(sp())));

        let context = store.open_drill_down(DrillDownKind::Promotores, None);
        assert_eq!(context.payload["quantidade"], Value::from(2));

        let closed = store.close_drill_down();
        assert_eq!(closed.map(|context| context.kind), Some(DrillDownKind::Promotores));
        assert!(store.drill_down().is_none());
    }
}
