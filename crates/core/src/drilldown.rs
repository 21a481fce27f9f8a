use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::derivation::Derivation;
use crate::domain::client::{Client, NpsCategory, ResponseType};
use crate::domain::product::ProductMetrics;
use crate::domain::region::ColorTier;
use crate::errors::DomainError;

const RESPONSE_SAMPLE_LIMIT: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDownKind {
    Promotores,
    Neutros,
    Detratores,
    NpsScore,
    NpsRespondido,
    NpsCalculado,
    Pesquisas,
    Csat,
    NpsGauge,
    Ces,
    SatisfacaoCategoria,
    TempoMedio,
    EvolucaoCsat,
    CompRespondido,
    CompCalculado,
    EvolucaoNps,
}

/// Where a kind's payload comes from: the filtered dashboard cards or the product panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrillDownScope {
    Dashboard,
    Product,
}

impl DrillDownKind {
    pub const ALL: [DrillDownKind; 16] = [
        Self::Promotores,
        Self::Neutros,
        Self::Detratores,
        Self::NpsScore,
        Self::NpsRespondido,
        Self::NpsCalculado,
        Self::Pesquisas,
        Self::Csat,
        Self::NpsGauge,
        Self::Ces,
        Self::SatisfacaoCategoria,
        Self::TempoMedio,
        Self::EvolucaoCsat,
        Self::CompRespondido,
        Self::CompCalculado,
        Self::EvolucaoNps,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Promotores => "promotores",
            Self::Neutros => "neutros",
            Self::Detratores => "detratores",
            Self::NpsScore => "nps_score",
            Self::NpsRespondido => "nps_respondido",
            Self::NpsCalculado => "nps_calculado",
            Self::Pesquisas => "pesquisas",
            Self::Csat => "csat",
            Self::NpsGauge => "nps_gauge",
            Self::Ces => "ces",
            Self::SatisfacaoCategoria => "satisfacao_categoria",
            Self::TempoMedio => "tempo_medio",
            Self::EvolucaoCsat => "evolucao_csat",
            Self::CompRespondido => "comp_respondido",
            Self::CompCalculado => "comp_calculado",
            Self::EvolucaoNps => "evolucao_nps",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Promotores => "Detalhamento — Promotores (9-10)",
            Self::Neutros => "Detalhamento — Neutros (7-8)",
            Self::Detratores => "Detalhamento — Detratores (0-6)",
            Self::NpsScore => "Detalhamento — NPS Score",
            Self::NpsRespondido | Self::CompRespondido => "Detalhamento — NPS Respondido",
            Self::NpsCalculado | Self::CompCalculado => "Detalhamento — NPS Calculado (IA)",
            Self::Pesquisas => "Detalhamento — Pesquisas Realizadas",
            Self::Csat => "Detalhamento — CSAT",
            Self::NpsGauge => "Detalhamento — NPS (Gauge)",
            Self::Ces => "Detalhamento — CES",
            Self::SatisfacaoCategoria => "Detalhamento — Satisfação por Categoria",
            Self::TempoMedio => "Detalhamento — Tempo Médio de Resposta",
            Self::EvolucaoCsat => "Detalhamento — Evolução CSAT",
            Self::EvolucaoNps => "Detalhamento — Evolução NPS",
        }
    }

    /// Calculation shown under the summary. Survey volume has none.
    pub fn formula(self) -> Option<&'static str> {
        let formula = match self {
            Self::Promotores => {
                "Promotores (%) = (Clientes com score 9-10 / Total de Clientes) × 100"
            }
            Self::Neutros => "Neutros (%) = (Clientes com score 7-8 / Total de Clientes) × 100",
            Self::Detratores => {
                "Detratores (%) = (Clientes com score 0-6 / Total de Clientes) × 100"
            }
            Self::NpsScore | Self::NpsGauge => "NPS = % Promotores − % Detratores",
            Self::NpsRespondido | Self::CompRespondido => {
                "NPS Respondido = % Promotores(respondidos) − % Detratores(respondidos)"
            }
            Self::NpsCalculado => {
                "NPS Calculado = Modelo IA (features: histórico, ticket, uso, churn risk)"
            }
            Self::CompCalculado => {
                "NPS Calculado = f(histórico_interações, tickets, uso_produto, risco_churn)"
            }
            Self::Pesquisas => return None,
            Self::Csat => "CSAT = (Respostas Positivas / Total de Respostas) × 100",
            Self::Ces => "CES = (Soma das respostas / Número de respostas) × (100 / escala_max)",
            Self::SatisfacaoCategoria => {
                "Satisfação (%) = (Respostas por nível / Total de respostas da categoria) × 100"
            }
            Self::TempoMedio => "Tempo Médio = Σ(tempo de resposta) / Número de respostas",
            Self::EvolucaoCsat => {
                "CSAT mensal = (Respostas positivas no mês / Total de respostas no mês) × 100"
            }
            Self::EvolucaoNps => "NPS mensal = % Promotores(mês) − % Detratores(mês)",
        };
        Some(formula)
    }

    pub fn scope(self) -> DrillDownScope {
        match self {
            Self::Promotores
            | Self::Neutros
            | Self::Detratores
            | Self::NpsScore
            | Self::NpsRespondido
            | Self::NpsCalculado
            | Self::Pesquisas => DrillDownScope::Dashboard,
            _ => DrillDownScope::Product,
        }
    }
}

impl fmt::Display for DrillDownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DrillDownKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == value.trim())
            .ok_or_else(|| DomainError::UnknownDrillDown(value.to_string()))
    }
}

/// One resolved card or chart click. The payload is opaque to the slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrillDownContext {
    #[serde(rename = "type")]
    pub kind: DrillDownKind,
    pub payload: Value,
}

impl DrillDownContext {
    pub fn new(kind: DrillDownKind, payload: Value) -> Self {
        Self { kind, payload }
    }

    /// Builds the payload the clicked card would hand over. Product-scoped kinds
    /// carry `Value::Null` when no product panel is open.
    pub fn resolve(
        kind: DrillDownKind,
        derivation: &Derivation,
        product: Option<&ProductMetrics>,
    ) -> Self {
        let payload = match kind.scope() {
            DrillDownScope::Dashboard => dashboard_payload(kind, derivation),
            DrillDownScope::Product => {
                product.map_or(Value::Null, |metrics| product_payload(kind, metrics))
            }
        };
        Self::new(kind, payload)
    }
}

fn dashboard_payload(kind: DrillDownKind, derivation: &Derivation) -> Value {
    let metrics = &derivation.metricas;
    match kind {
        DrillDownKind::Promotores => to_payload(&metrics.promotores),
        DrillDownKind::Neutros => to_payload(&metrics.neutros),
        DrillDownKind::Detratores => to_payload(&metrics.detratores),
        DrillDownKind::NpsRespondido => to_payload(&derivation.comparativo.respondido),
        DrillDownKind::NpsCalculado => to_payload(&derivation.comparativo.calculado),
        _ => to_payload(metrics),
    }
}

fn product_payload(kind: DrillDownKind, metrics: &ProductMetrics) -> Value {
    match kind {
        DrillDownKind::CompRespondido => to_payload(&metrics.comparativo.nps_respondido),
        DrillDownKind::CompCalculado => to_payload(&metrics.comparativo.nps_calculado),
        DrillDownKind::EvolucaoNps => to_payload(&metrics.comparativo),
        _ => to_payload(metrics),
    }
}

fn to_payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Holds at most one open drill-down.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrillDownSlot {
    active: Option<DrillDownContext>,
}

impl DrillDownSlot {
    pub fn active(&self) -> Option<&DrillDownContext> {
        self.active.as_ref()
    }

    /// Opening while another context is shown replaces it; the old one is returned.
    pub fn open(&mut self, context: DrillDownContext) -> Option<DrillDownContext> {
        debug!(event_name = "drilldown.opened", kind = context.kind.key(), "drill-down opened");
        self.active.replace(context)
    }

    pub fn close(&mut self) -> Option<DrillDownContext> {
        let closed = self.active.take();
        if let Some(context) = &closed {
            debug!(event_name = "drilldown.closed", kind = context.kind.key(), "drill-down closed");
        }
        closed
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub nome: String,
    pub score: u8,
    pub tipo: ResponseType,
    pub regiao: String,
    pub cor: ColorTier,
}

impl From<&Client> for SampleRow {
    fn from(client: &Client) -> Self {
        Self {
            nome: client.name.clone(),
            score: client.nps_score,
            tipo: client.response,
            regiao: client.region.clone(),
            cor: ColorTier::for_answer(client.nps_score),
        }
    }
}

/// Record sample listed under the summary for tier and response-type kinds.
pub fn sample_rows(kind: DrillDownKind, derivation: &Derivation) -> Vec<SampleRow> {
    let by_category = |category: NpsCategory| {
        derivation.clients_in(category).map(SampleRow::from).collect::<Vec<_>>()
    };
    let by_response = |response: ResponseType| {
        derivation
            .clientes
            .iter()
            .filter(|client| client.response == response)
            .take(RESPONSE_SAMPLE_LIMIT)
            .map(SampleRow::from)
            .collect::<Vec<_>>()
    };

    match kind {
        DrillDownKind::Promotores => by_category(NpsCategory::Promoter),
        DrillDownKind::Neutros => by_category(NpsCategory::Neutral),
        DrillDownKind::Detratores => by_category(NpsCategory::Detractor),
        DrillDownKind::NpsRespondido => by_response(ResponseType::Responded),
        DrillDownKind::NpsCalculado => by_response(ResponseType::Predicted),
        _ => Vec::new(),
    }
}
