use clap::Args;
use npsdash_core::products::{
    csat_split, metrics_for, response_time_delta, CsatSplit, NpsZone, ResponseTimeDelta,
};
use npsdash_core::{Dataset, InterfaceError, Period, Product, ProductId, ProductMetrics};
use serde::Serialize;
use tracing::info;

use super::{domain_error, load_config, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    #[arg(help = "Product id from the catalogue; unknown ids show product 1")]
    pub id: String,
    #[arg(long, help = "Period key limiting the series length")]
    pub periodo: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProductReport {
    produto: Option<Product>,
    metricas: ProductMetrics,
    csat: CsatSplit,
    variacao_tempo_resposta: ResponseTimeDelta,
    zona_nps: &'static str,
}

pub fn run(args: &ProductArgs) -> CommandResult {
    match build(args) {
        Ok(report) => {
            info!(
                event_name = "cli.product.completed",
                product_id = %args.id,
                nps_score = report.metricas.nps_score,
                "product metrics built"
            );
            let name =
                report.produto.as_ref().map_or("fallback product", |product| product.name.as_str());
            let message =
                format!("{name}: NPS {:.1} ({})", report.metricas.nps_score, report.zona_nps);
            CommandResult::success("product", message, &report)
        }
        Err(error) => CommandResult::from_error("product", error),
    }
}

fn build(args: &ProductArgs) -> Result<ProductReport, InterfaceError> {
    let config = load_config()?;
    let period = match args.periodo.as_deref() {
        Some(raw) => raw.parse::<Period>().map_err(domain_error)?,
        None => config.dashboard.default_period,
    };

    let id = ProductId::new(args.id.trim());
    let dataset = Dataset::seed();
    let metricas = metrics_for(&id, Some(period.months()));
    let variacao_tempo_resposta =
        response_time_delta(&metricas.tempo_medio_resposta, &metricas.tempo_mes_anterior)
            .map_err(domain_error)?;

    Ok(ProductReport {
        produto: dataset.product(&id).cloned(),
        csat: csat_split(&metricas),
        zona_nps: NpsZone::for_score(metricas.nps_score).label(),
        variacao_tempo_resposta,
        metricas,
    })
}
