use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::domain::client::{Client, NpsCategory, ResponseType};
use crate::domain::product::{NpsSideSummary, TierShare};
use crate::filters::FilterState;

/// Aggregate card figures for one filtered population.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    pub total_clientes: u64,
    pub total_respondidos: u64,
    pub total_calculados: u64,
    pub nps_score: f64,
    pub promotores: TierShare,
    pub neutros: TierShare,
    pub detratores: TierShare,
}

/// NPS recomputed separately over answered and predicted records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseBreakdown {
    pub respondido: NpsSideSummary,
    pub calculado: NpsSideSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub clientes: Vec<Client>,
    pub metricas: GlobalMetrics,
    pub comparativo: ResponseBreakdown,
}

impl Derivation {
    pub fn clients_in(&self, category: NpsCategory) -> impl Iterator<Item = &Client> {
        self.clientes.iter().filter(move |client| client.category == category)
    }
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(count as f64 / total as f64 * 100.0)
}

pub fn derive(dataset: &Dataset, filters: &FilterState, today: NaiveDate) -> Derivation {
    let clientes: Vec<Client> = filter_clients(dataset, filters, today).cloned().collect();
    let metricas = aggregate(clientes.iter());
    let comparativo = ResponseBreakdown {
        respondido: side_summary(
            clientes.iter().filter(|client| client.response == ResponseType::Responded),
        ),
        calculado: side_summary(
            clientes.iter().filter(|client| client.response == ResponseType::Predicted),
        ),
    };
    Derivation { clientes, metricas, comparativo }
}

/// Records passing every active filter, in dataset order.
pub fn filter_clients<'a>(
    dataset: &'a Dataset,
    filters: &'a FilterState,
    today: NaiveDate,
) -> impl Iterator<Item = &'a Client> + 'a {
    let cutoff = filters.period.cutoff(today);
    // Some(None) means a product filter is active but the id is not in the catalogue.
    let product_name = filters
        .product
        .as_ref()
        .map(|id| dataset.product(id).map(|product| product.name.as_str()));

    dataset.clients.iter().filter(move |client| {
        if client.registered_on < cutoff {
            return false;
        }
        let state = client.state_code();
        if let Some(region) = filters.region {
            if !state.as_ref().is_some_and(|state| region.contains(state)) {
                return false;
            }
        }
        if let Some(wanted) = &filters.state {
            if state.as_ref() != Some(wanted) {
                return false;
            }
        }
        match product_name {
            None => true,
            Some(None) => false,
            Some(Some(name)) => client.subscribes_to(name),
        }
    })
}

pub fn aggregate<'a>(clients: impl IntoIterator<Item = &'a Client>) -> GlobalMetrics {
    let mut counts = TierCounts::default();
    let mut responded = 0_u64;
    let mut predicted = 0_u64;
    for client in clients {
        counts.record(client.category);
        match client.response {
            ResponseType::Responded => responded += 1,
            ResponseType::Predicted => predicted += 1,
        }
    }

    let summary = counts.summarize();
    GlobalMetrics {
        total_clientes: summary.total_clientes,
        total_respondidos: responded,
        total_calculados: predicted,
        nps_score: summary.score,
        promotores: summary.promotores,
        neutros: summary.neutros,
        detratores: summary.detratores,
    }
}

fn side_summary<'a>(clients: impl Iterator<Item = &'a Client>) -> NpsSideSummary {
    let mut counts = TierCounts::default();
    clients.for_each(|client| counts.record(client.category));
    counts.summarize()
}

#[derive(Default)]
struct TierCounts {
    promoters: u64,
    neutrals: u64,
    detractors: u64,
}

impl TierCounts {
    fn record(&mut self, category: NpsCategory) {
        match category {
            NpsCategory::Promoter => self.promoters += 1,
            NpsCategory::Neutral => self.neutrals += 1,
            NpsCategory::Detractor => self.detractors += 1,
        }
    }

    fn summarize(&self) -> NpsSideSummary {
        let total = self.promoters + self.neutrals + self.detractors;
        let promotores =
            TierShare { count: self.promoters, percent: percent(self.promoters, total) };
        let neutros = TierShare { count: self.neutrals, percent: percent(self.neutrals, total) };
        let detratores =
            TierShare { count: self.detractors, percent: percent(self.detractors, total) };
        NpsSideSummary {
            score: round1(promotores.percent - detratores.percent),
            total_clientes: total,
            promotores,
            neutros,
            detratores,
        }
    }
}
