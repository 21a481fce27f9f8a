use serde::{Deserialize, Serialize};

use crate::domain::product::{
    MonthlyNpsComparison, MonthlyResponseTime, MonthlySatisfaction, NpsComparison,
    NpsSideSummary, ProductId, ProductMetrics, SatisfactionBreakdown, TierShare,
};
use crate::errors::DomainError;
use crate::fixtures::{SeedProductMetrics, SEED_PRODUCT_METRICS};

pub const FULL_SERIES_MONTHS: u32 = 6;

const SERIES_MONTHS: [&str; 6] = ["Set", "Out", "Nov", "Dez", "Jan", "Fev"];
const COMPARISON_MONTHS: [&str; 6] = ["Jan", "Fev", "Mar", "Abr", "Mai", "Jun"];
/// (responded, predicted) offsets from the product NPS, oldest month first.
const COMPARISON_OFFSETS: [(f64, f64); 6] =
    [(-5.0, -4.0), (-3.0, -3.0), (-2.0, -1.0), (-1.0, 0.0), (1.0, 1.0), (2.0, 2.0)];
const RESPONSE_TIME_OFFSETS: [f64; 6] = [4.0, 3.0, 2.0, 1.0, 0.5, 0.0];
const BREAKDOWN: [(&str, [u32; 5]); 4] = [
    ("Atendimento", [30, 25, 20, 15, 10]),
    ("Cobertura", [35, 28, 18, 12, 7]),
    ("Preço", [20, 22, 25, 20, 13]),
    ("Qualidade", [32, 30, 18, 12, 8]),
];

/// Product panel metrics. Unknown ids fall back to the first catalogue entry;
/// a window shorter than six months keeps only the latest entries of each series.
pub fn metrics_for(id: &ProductId, months: Option<u32>) -> ProductMetrics {
    let seed = SEED_PRODUCT_METRICS
        .iter()
        .find(|seed| seed.product_id == id.0)
        .unwrap_or(&SEED_PRODUCT_METRICS[0]);
    let metrics = build(seed);
    match months {
        Some(months) if months > 0 && months < FULL_SERIES_MONTHS => truncate(metrics, months),
        _ => metrics,
    }
}

fn build(seed: &SeedProductMetrics) -> ProductMetrics {
    let [(prom_pct, prom_qty), (neu_pct, neu_qty), (det_pct, det_qty)] = seed.tiers;
    ProductMetrics {
        nps_score: seed.nps_score,
        csat_score: seed.csat_score,
        csat_mes_anterior: seed.csat_previous,
        ces_score: seed.ces_score,
        tempo_medio_resposta: seed.response_time.to_string(),
        tempo_mes_anterior: seed.response_time_previous.to_string(),
        total_clientes: seed.total_clients,
        promotores: TierShare { count: prom_qty, percent: prom_pct },
        neutros: TierShare { count: neu_qty, percent: neu_pct },
        detratores: TierShare { count: det_qty, percent: det_pct },
        evolucao_mensal: SERIES_MONTHS
            .iter()
            .zip(seed.csat_series.iter().zip(seed.nps_series.iter()))
            .map(|(month, (csat, nps))| MonthlySatisfaction {
                month: month.to_string(),
                csat: *csat,
                nps: *nps,
            })
            .collect(),
        tempo_resposta_mensal: response_time_series(seed.response_hours_base),
        satisfacao_breakdown: satisfaction_breakdown(),
        comparativo: comparison(
            seed.nps_score,
            seed.total_responded,
            seed.total_predicted,
            [prom_pct, neu_pct, det_pct],
        ),
    }
}

fn truncate(mut metrics: ProductMetrics, months: u32) -> ProductMetrics {
    let keep = months as usize;
    keep_last(&mut metrics.evolucao_mensal, keep);
    keep_last(&mut metrics.tempo_resposta_mensal, keep);
    keep_last(&mut metrics.comparativo.evolucao_nps, keep);
    metrics
}

fn keep_last<T>(series: &mut Vec<T>, keep: usize) {
    let drop = series.len().saturating_sub(keep);
    series.drain(..drop);
}

pub fn response_time_series(base_hours: f64) -> Vec<MonthlyResponseTime> {
    SERIES_MONTHS
        .iter()
        .zip(RESPONSE_TIME_OFFSETS)
        .map(|(month, offset)| MonthlyResponseTime {
            month: month.to_string(),
            hours: base_hours + offset,
        })
        .collect()
}

pub fn satisfaction_breakdown() -> Vec<SatisfactionBreakdown> {
    BREAKDOWN
        .iter()
        .map(|(category, [very_satisfied, satisfied, neutral, unsatisfied, very_unsatisfied])| {
            SatisfactionBreakdown {
                category: category.to_string(),
                very_satisfied: *very_satisfied,
                satisfied: *satisfied,
                neutral: *neutral,
                unsatisfied: *unsatisfied,
                very_unsatisfied: *very_unsatisfied,
            }
        })
        .collect()
}

/// Responded vs predicted split sharing the product's tier percentages.
/// Detractor quantities absorb the rounding remainder so each side sums to its total.
pub fn comparison(
    nps_score: f64,
    total_responded: u64,
    total_predicted: u64,
    tier_percents: [f64; 3],
) -> NpsComparison {
    NpsComparison {
        nps_respondido: side(nps_score, total_responded, tier_percents),
        nps_calculado: side(nps_score, total_predicted, tier_percents),
        evolucao_nps: COMPARISON_MONTHS
            .iter()
            .zip(COMPARISON_OFFSETS)
            .map(|(month, (responded, predicted))| MonthlyNpsComparison {
                month: month.to_string(),
                respondido: nps_score + responded,
                calculado: nps_score + predicted,
            })
            .collect(),
    }
}

fn side(nps_score: f64, total: u64, [prom_pct, neu_pct, det_pct]: [f64; 3]) -> NpsSideSummary {
    let share = |percent: f64| (total as f64 * percent / 100.0).round() as u64;
    let promoters = share(prom_pct).min(total);
    let neutrals = share(neu_pct).min(total - promoters);
    NpsSideSummary {
        score: nps_score,
        total_clientes: total,
        promotores: TierShare { count: promoters, percent: prom_pct },
        neutros: TierShare { count: neutrals, percent: neu_pct },
        detratores: TierShare { count: total - promoters - neutrals, percent: det_pct },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CsatSplit {
    pub satisfied: f64,
    pub unsatisfied: f64,
}

/// Donut gauge split: neutrals count half towards satisfaction.
pub fn csat_split(metrics: &ProductMetrics) -> CsatSplit {
    let satisfied = metrics.promotores.percent + metrics.neutros.percent * 0.5;
    CsatSplit { satisfied, unsatisfied: 100.0 - satisfied }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTimeDelta {
    /// Current minus previous, in minutes. Positive means answers got slower.
    pub minutes: i64,
    pub formatted: String,
}

impl ResponseTimeDelta {
    pub fn is_slower(&self) -> bool {
        self.minutes > 0
    }
}

pub fn response_time_delta(
    current: &str,
    previous: &str,
) -> Result<ResponseTimeDelta, DomainError> {
    let minutes = parse_hours_minutes(current)? - parse_hours_minutes(previous)?;
    let magnitude = minutes.abs();
    let (hours, rest) = (magnitude / 60, magnitude % 60);
    let body = if hours > 0 { format!("{hours}:{rest:02}") } else { format!("{rest}min") };
    let sign = if minutes > 0 { '+' } else { '-' };
    Ok(ResponseTimeDelta { minutes, formatted: format!("{sign}{body}") })
}

fn parse_hours_minutes(value: &str) -> Result<i64, DomainError> {
    let invalid = || DomainError::InvalidDuration(value.to_string());
    let (hours, minutes) = value.trim().split_once(':').ok_or_else(invalid)?;
    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    if hours < 0 || !(0..60).contains(&minutes) {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpsZone {
    Excellence,
    Improvement,
    Critical,
}

impl NpsZone {
    pub fn for_score(score: f64) -> Self {
        if score >= 50.0 {
            Self::Excellence
        } else if score >= 0.0 {
            Self::Improvement
        } else {
            Self::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Excellence => "Excelência",
            Self::Improvement => "Aperfeiçoamento",
            Self::Critical => "Crítica",
        }
    }
}
