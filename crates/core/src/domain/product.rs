use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TierShare {
    #[serde(rename = "quantidade")]
    pub count: u64,
    #[serde(rename = "percentual")]
    pub percent: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlySatisfaction {
    #[serde(rename = "mes")]
    pub month: String,
    pub csat: f64,
    pub nps: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResponseTime {
    #[serde(rename = "mes")]
    pub month: String,
    /// Hours between survey dispatch and answer.
    #[serde(rename = "tempo")]
    pub hours: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SatisfactionBreakdown {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "muitoSatisfeito")]
    pub very_satisfied: u32,
    #[serde(rename = "satisfeito")]
    pub satisfied: u32,
    #[serde(rename = "neutro")]
    pub neutral: u32,
    #[serde(rename = "insatisfeito")]
    pub unsatisfied: u32,
    #[serde(rename = "muitoInsatisfeito")]
    pub very_unsatisfied: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpsSideSummary {
    pub score: f64,
    pub total_clientes: u64,
    pub promotores: TierShare,
    pub neutros: TierShare,
    pub detratores: TierShare,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthlyNpsComparison {
    #[serde(rename = "mes")]
    pub month: String,
    pub respondido: f64,
    pub calculado: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpsComparison {
    pub nps_respondido: NpsSideSummary,
    pub nps_calculado: NpsSideSummary,
    pub evolucao_nps: Vec<MonthlyNpsComparison>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    pub nps_score: f64,
    pub csat_score: f64,
    pub csat_mes_anterior: f64,
    pub ces_score: f64,
    pub tempo_medio_resposta: String,
    pub tempo_mes_anterior: String,
    pub total_clientes: u64,
    pub promotores: TierShare,
    pub neutros: TierShare,
    pub detratores: TierShare,
    pub evolucao_mensal: Vec<MonthlySatisfaction>,
    pub tempo_resposta_mensal: Vec<MonthlyResponseTime>,
    pub satisfacao_breakdown: Vec<SatisfactionBreakdown>,
    pub comparativo: NpsComparison,
}
