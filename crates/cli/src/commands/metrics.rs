use npsdash_core::{
    derive, ActiveFilter, Client, Dataset, FilterState, GlobalMetrics, InterfaceError,
    ResponseBreakdown,
};
use serde::Serialize;
use tracing::info;

use super::{domain_error, load_config, CommandResult, FilterArgs};

#[derive(Debug, Serialize)]
struct MetricsReport {
    filtros: FilterState,
    filtros_ativos: Vec<ActiveFilter>,
    metricas: GlobalMetrics,
    comparativo: ResponseBreakdown,
    clientes: Vec<Client>,
}

pub fn run(args: &FilterArgs) -> CommandResult {
    match build(args) {
        Ok(report) => {
            info!(
                event_name = "cli.metrics.completed",
                total_clientes = report.metricas.total_clientes,
                nps_score = report.metricas.nps_score,
                "metrics derived"
            );
            let message = format!(
                "{} clients, NPS {:.1}",
                report.metricas.total_clientes, report.metricas.nps_score
            );
            CommandResult::success("metrics", message, &report)
        }
        Err(error) => CommandResult::from_error("metrics", error),
    }
}

fn build(args: &FilterArgs) -> Result<MetricsReport, InterfaceError> {
    let config = load_config()?;
    let filters = args.to_filter_state(config.dashboard.default_period).map_err(domain_error)?;
    let dataset = Dataset::seed();

    let derivation = derive(&dataset, &filters, args.today(&config));
    Ok(MetricsReport {
        filtros_ativos: filters.active_filters(&dataset.products),
        filtros: filters,
        metricas: derivation.metricas,
        comparativo: derivation.comparativo,
        clientes: derivation.clientes,
    })
}
