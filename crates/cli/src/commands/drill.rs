use clap::Args;
use npsdash_core::drilldown::{sample_rows, DrillDownScope, SampleRow};
use npsdash_core::products::metrics_for;
use npsdash_core::{
    DashboardStore, Dataset, DrillDownContext, DrillDownKind, InterfaceError, ProductId,
};
use serde::Serialize;
use tracing::info;

use super::{domain_error, load_config, CommandResult, FilterArgs};

#[derive(Debug, Clone, Args)]
pub struct DrillArgs {
    #[arg(help = "Drill-down type, e.g. promotores, nps_score, comp_respondido")]
    pub kind: String,
    #[command(flatten)]
    pub filters: FilterArgs,
    #[arg(long, help = "Product whose metrics feed product-scoped drill-downs")]
    pub produto_metricas: Option<String>,
}

#[derive(Debug, Serialize)]
struct DrillReport {
    titulo: &'static str,
    formula: Option<&'static str>,
    contexto: DrillDownContext,
    amostra: Vec<SampleRow>,
}

pub fn run(args: &DrillArgs) -> CommandResult {
    match build(args) {
        Ok(report) => {
            info!(
                event_name = "cli.drill.completed",
                kind = report.contexto.kind.key(),
                sample_size = report.amostra.len(),
                "drill-down resolved"
            );
            CommandResult::success("drill", report.titulo, &report)
        }
        Err(error) => CommandResult::from_error("drill", error),
    }
}

fn build(args: &DrillArgs) -> Result<DrillReport, InterfaceError> {
    let config = load_config()?;
    let kind = args.kind.parse::<DrillDownKind>().map_err(domain_error)?;
    let filters =
        args.filters.to_filter_state(config.dashboard.default_period).map_err(domain_error)?;

    let product = match (kind.scope(), args.produto_metricas.as_deref()) {
        (DrillDownScope::Product, Some(id)) => {
            Some(metrics_for(&ProductId::new(id), Some(filters.period.months())))
        }
        _ => None,
    };

    let mut store = DashboardStore::new(Dataset::seed(), filters, args.filters.today(&config));
    let contexto = store.open_drill_down(kind, product.as_ref());
    Ok(DrillReport {
        titulo: kind.title(),
        formula: kind.formula(),
        amostra: sample_rows(kind, &store.derive()),
        contexto,
    })
}
