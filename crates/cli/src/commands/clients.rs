use clap::Args;
use npsdash_core::{
    derive, query_clients, ClientPage, Dataset, DomainError, InterfaceError, NpsCategory,
    SortDirection, SortField, TableQuery,
};
use tracing::info;

use super::{domain_error, load_config, CommandResult, FilterArgs};

#[derive(Debug, Clone, Default, Args)]
pub struct ClientsArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    #[arg(long, help = "Only rows of this category: Promotor | Neutro | Detrator")]
    pub categoria: Option<String>,
    #[arg(long, help = "Case-insensitive text search")]
    pub search: Option<String>,
    #[arg(long, help = "Sort column: nome (default) | nps_score | regiao | tipo")]
    pub sort: Option<String>,
    #[arg(long, help = "Sort descending")]
    pub desc: bool,
    #[arg(long, help = "One-based page number (default 1)")]
    pub page: Option<usize>,
}

pub fn run(args: &ClientsArgs) -> CommandResult {
    match build(args) {
        Ok(page) => {
            info!(
                event_name = "cli.clients.completed",
                total_rows = page.total_rows,
                page = page.page,
                "client table page built"
            );
            let message = format!(
                "page {} of {} ({} matching clients)",
                page.page + 1,
                page.total_pages.max(1),
                page.total_rows
            );
            CommandResult::success("clients", message, &page)
        }
        Err(error) => CommandResult::from_error("clients", error),
    }
}

fn build(args: &ClientsArgs) -> Result<ClientPage, InterfaceError> {
    let config = load_config()?;
    let filters =
        args.filters.to_filter_state(config.dashboard.default_period).map_err(domain_error)?;
    let query = table_query(args).map_err(domain_error)?;

    let derivation = derive(&Dataset::seed(), &filters, args.filters.today(&config));
    Ok(query_clients(&derivation.clientes, &query))
}

fn table_query(args: &ClientsArgs) -> Result<TableQuery, DomainError> {
    Ok(TableQuery {
        category: args.categoria.as_deref().map(str::parse::<NpsCategory>).transpose()?,
        search: args.search.clone(),
        sort: args.sort.as_deref().map(str::parse::<SortField>).transpose()?.unwrap_or_default(),
        direction: if args.desc { SortDirection::Desc } else { SortDirection::Asc },
        page: args.page.unwrap_or(1).saturating_sub(1),
    })
}
