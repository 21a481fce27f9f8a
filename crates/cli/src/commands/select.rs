use chrono::NaiveDate;
use clap::Args;
use npsdash_core::{
    BreadcrumbItem, DashboardState, DashboardStore, Dataset, FilterState, InterfaceError,
    SelectionIntent, StateCode,
};
use serde::Serialize;
use tracing::info;

use super::{domain_error, load_config, CommandResult};

#[derive(Debug, Clone, Default, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub target: SelectTarget,
    #[arg(long, help = "Reference date (YYYY-MM-DD); overrides dashboard.reference_date")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Args)]
#[group(required = true, multiple = false)]
pub struct SelectTarget {
    #[arg(long, help = "Simulate a click on this city marker")]
    pub city: Option<String>,
    #[arg(long, help = "Pick this state code in the filter panel")]
    pub estado: Option<String>,
}

#[derive(Debug, Serialize)]
struct SelectReport {
    estado: DashboardState,
    breadcrumb: Vec<BreadcrumbItem>,
    total_clientes: u64,
}

pub fn run(args: &SelectArgs) -> CommandResult {
    match build(args) {
        Ok(report) => {
            info!(
                event_name = "cli.select.completed",
                city = report.estado.selection.city.as_deref().unwrap_or("-"),
                total_clientes = report.total_clientes,
                "selection intent applied"
            );
            let path: Vec<&str> =
                report.breadcrumb.iter().map(|item| item.label.as_str()).collect();
            CommandResult::success("select", path.join(" > "), &report)
        }
        Err(error) => CommandResult::from_error("select", error),
    }
}

fn build(args: &SelectArgs) -> Result<SelectReport, InterfaceError> {
    let config = load_config()?;
    let mut store = DashboardStore::new(
        Dataset::seed(),
        FilterState::default().with_period(config.dashboard.default_period),
        args.today.unwrap_or_else(|| config.dashboard.today()),
    );

    let intent = match (&args.target.city, &args.target.estado) {
        (Some(city), _) => SelectionIntent::MapClick { city: city.clone() },
        (None, Some(raw)) => {
            let state = raw.parse::<StateCode>().map_err(domain_error)?;
            SelectionIntent::FilterChange { filters: store.filters().with_state(Some(state)) }
        }
        (None, None) => SelectionIntent::ClearSelection,
    };

    let estado = store.dispatch(intent);
    Ok(SelectReport {
        breadcrumb: store.breadcrumb(),
        total_clientes: store.derive().metricas.total_clientes,
        estado,
    })
}
