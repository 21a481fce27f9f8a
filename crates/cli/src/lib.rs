pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::clients::ClientsArgs;
use commands::drill::DrillArgs;
use commands::layout::LayoutAction;
use commands::product::ProductArgs;
use commands::select::SelectArgs;
use commands::FilterArgs;

#[derive(Debug, Parser)]
#[command(
    name = "npsdash",
    about = "NPS dashboard operator CLI",
    long_about = "Inspect derived NPS metrics, client tables, map selection, drill-downs, product panels and the persisted section layout.",
    after_help = "Examples:\n  npsdash metrics --estado SP --today 2026-01-05\n  npsdash clients --categoria Detrator --sort nps_score --desc\n  npsdash layout move table metrics"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Derive the global metrics and filtered client list")]
    Metrics(FilterArgs),
    #[command(about = "Print one page of the searchable, sortable client table")]
    Clients(ClientsArgs),
    #[command(about = "Apply a map click or state pick and print the synchronized state")]
    Select(SelectArgs),
    #[command(about = "Resolve the drill-down context behind a card or chart")]
    Drill(DrillArgs),
    #[command(about = "Print the product panel metrics")]
    Product(ProductArgs),
    #[command(about = "Show, reorder or reset the persisted dashboard section order")]
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

pub fn execute(cli: Cli) -> commands::CommandResult {
    match cli.command {
        Command::Metrics(args) => commands::metrics::run(&args),
        Command::Clients(args) => commands::clients::run(&args),
        Command::Select(args) => commands::select::run(&args),
        Command::Drill(args) => commands::drill::run(&args),
        Command::Product(args) => commands::product::run(&args),
        Command::Layout { action } => commands::layout::run(&action),
        Command::Config => commands::config::run(),
    }
}
