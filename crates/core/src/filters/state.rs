use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::client::StateCode;
use crate::domain::product::{Product, ProductId};
use crate::domain::region::{state_name, MacroRegion};
use crate::errors::DomainError;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Period {
    #[serde(rename = "ultimo-mes")]
    LastMonth,
    #[serde(rename = "ultimos-3-meses")]
    LastThreeMonths,
    #[default]
    #[serde(rename = "ultimos-6-meses")]
    LastSixMonths,
    #[serde(rename = "ultimo-ano")]
    LastYear,
}

impl Period {
    pub const ALL: [Period; 4] =
        [Self::LastMonth, Self::LastThreeMonths, Self::LastSixMonths, Self::LastYear];

    pub fn key(self) -> &'static str {
        match self {
            Self::LastMonth => "ultimo-mes",
            Self::LastThreeMonths => "ultimos-3-meses",
            Self::LastSixMonths => "ultimos-6-meses",
            Self::LastYear => "ultimo-ano",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LastMonth => "Último Mês",
            Self::LastThreeMonths => "Últimos 3 Meses",
            Self::LastSixMonths => "Últimos 6 Meses",
            Self::LastYear => "Último Ano",
        }
    }

    pub fn months(self) -> u32 {
        match self {
            Self::LastMonth => 1,
            Self::LastThreeMonths => 3,
            Self::LastSixMonths => 6,
            Self::LastYear => 12,
        }
    }

    /// Oldest registration date still inside the window. A day missing from the
    /// target month rolls into the next one (31 Mar minus one month is 3 Mar).
    pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
        today
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(self.months())))
            .and_then(|first| first.checked_add_days(Days::new(u64::from(today.day0()))))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.key() == value.trim())
            .ok_or_else(|| DomainError::UnknownPeriod(value.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    #[serde(rename = "periodo")]
    Period,
    #[serde(rename = "regiao")]
    Region,
    #[serde(rename = "estado")]
    State,
    #[serde(rename = "produto")]
    Product,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub key: FilterKey,
    pub label: String,
}

/// Complete filter selection. Callers build a whole replacement value and hand it
/// to [`crate::filters::FilterStore::set`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(rename = "periodo", default)]
    pub period: Period,
    #[serde(rename = "regiao", default)]
    pub region: Option<MacroRegion>,
    #[serde(rename = "estado", default)]
    pub state: Option<StateCode>,
    #[serde(rename = "produto", default)]
    pub product: Option<ProductId>,
}

impl FilterState {
    pub fn with_period(&self, period: Period) -> Self {
        Self { period, ..self.clone() }
    }

    pub fn with_region(&self, region: Option<MacroRegion>) -> Self {
        Self { region, ..self.clone() }
    }

    pub fn with_state(&self, state: Option<StateCode>) -> Self {
        Self { state, ..self.clone() }
    }

    pub fn with_product(&self, product: Option<ProductId>) -> Self {
        Self { product, ..self.clone() }
    }

    /// Removing the region chip also drops the state it scoped.
    pub fn clearing(&self, key: FilterKey) -> Self {
        match key {
            FilterKey::Period => self.with_period(Period::default()),
            FilterKey::Region => Self { region: None, state: None, ..self.clone() },
            FilterKey::State => self.with_state(None),
            FilterKey::Product => self.with_product(None),
        }
    }

    /// "Limpar todos": keeps the period window, drops everything else.
    pub fn cleared_all(&self) -> Self {
        Self { period: self.period, ..Self::default() }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.region.is_none() && self.state.is_none() && self.product.is_none()
    }

    pub fn active_filters(&self, products: &[Product]) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if let Some(region) = self.region {
            active.push(ActiveFilter {
                key: FilterKey::Region,
                label: format!("Região: {region}"),
            });
        }
        if let Some(state) = &self.state {
            let name = state_name(state).unwrap_or(state.as_str());
            active.push(ActiveFilter { key: FilterKey::State, label: format!("Estado: {name}") });
        }
        if let Some(product_id) = &self.product {
            let name = products
                .iter()
                .find(|product| &product.id == product_id)
                .map(|product| product.name.as_str())
                .unwrap_or(product_id.0.as_str());
            active.push(ActiveFilter {
                key: FilterKey::Product,
                label: format!("Produto: {name}"),
            });
        }
        active
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{FilterKey, FilterState, Period};
    use crate::domain::product::ProductId;
    use crate::domain::region::MacroRegion;
    use crate::errors::DomainError;
    use crate::fixtures::seed_products;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn period_cutoff_subtracts_calendar_months() {
        let today = date(2026, 1, 5);
        assert_eq!(Period::LastMonth.cutoff(today), date(2025, 12, 5));
        assert_eq!(Period::LastThreeMonths.cutoff(today), date(2025, 10, 5));
        assert_eq!(Period::LastSixMonths.cutoff(today), date(2025, 7, 5));
        assert_eq!(Period::LastYear.cutoff(today), date(2025, 1, 5));
    }

    #[test]
    fn period_cutoff_rolls_missing_days_into_next_month() {
        assert_eq!(Period::LastMonth.cutoff(date(2026, 3, 31)), date(2026, 3, 3));
        assert_eq!(Period::LastMonth.cutoff(date(2028, 3, 31)), date(2028, 3, 2));
        assert_eq!(Period::LastSixMonths.cutoff(date(2025, 12, 31)), date(2025, 7, 1));
        assert_eq!(Period::LastThreeMonths.cutoff(date(2026, 2, 28)), date(2025, 11, 28));
    }

    #[test]
    fn period_keys_parse_and_reject_unknowns() {
        assert_eq!("ultimo-ano".parse::<Period>().expect("known key"), Period::LastYear);
        assert_eq!(
            "ultima-semana".parse::<Period>().expect_err("unknown key"),
            DomainError::UnknownPeriod("ultima-semana".to_string())
        );
        assert_eq!(Period::default(), Period::LastSixMonths);
    }

    #[test]
    fn clearing_region_also_clears_state() {
        let filters = FilterState::default()
            .with_region(Some(MacroRegion::Sudeste))
            .with_state(Some("SP".parse().expect("UF")))
            .with_product(Some(ProductId::new("3")));

        let cleared = filters.clearing(FilterKey::Region);
        assert_eq!(cleared.region, None);
        assert_eq!(cleared.state, None);
        assert_eq!(cleared.product, Some(ProductId::new("3")));

        let only_state = filters.clearing(FilterKey::State);
        assert_eq!(only_state.region, Some(MacroRegion::Sudeste));
        assert_eq!(only_state.state, None);
    }

    #[test]
    fn clear_all_keeps_period() {
        let filters = FilterState::default()
            .with_period(Period::LastMonth)
            .with_state(Some("RJ".parse().expect("UF")));

        let cleared = filters.cleared_all();
        assert_eq!(cleared.period, Period::LastMonth);
        assert!(cleared.is_unfiltered());
    }

    #[test]
    fn active_filter_labels_use_display_names() {
        let filters = FilterState::default()
            .with_state(Some("CE".parse().expect("UF")))
            .with_product(Some(ProductId::new("8")));

        let labels: Vec<String> = filters
            .active_filters(&seed_products())
            .into_iter()
            .map(|active| active.label)
            .collect();
        assert_eq!(labels, vec!["Estado: Ceará".to_string(), "Produto: Claro TV".to_string()]);

        let unnamed = FilterState::default().with_state(Some("TO".parse().expect("UF")));
        assert_eq!(unnamed.active_filters(&[])[0].label, "Estado: TO");
    }

    #[test]
    fn filter_state_uses_dashboard_wire_names() {
        let json = serde_json::json!({
            "periodo": "ultimos-6-meses",
            "regiao": null,
            "estado": "SP",
            "produto": null
        });
        let filters: FilterState = serde_json::from_value(json).expect("deserialize filters");
        assert_eq!(filters.period, Period::LastSixMonths);
        assert_eq!(filters.state.as_ref().map(|state| state.as_str()), Some("SP"));
    }
}
