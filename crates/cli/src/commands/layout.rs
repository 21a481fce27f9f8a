use clap::Subcommand;
use npsdash_core::layout::SECTION_ORDER_KEY;
use npsdash_core::{
    ApplicationError, DragOutcome, InterfaceError, JsonFileStore, SectionOrderStore,
};
use serde::Serialize;
use tracing::info;

use super::{load_config, CommandResult};

#[derive(Debug, Clone, Subcommand)]
pub enum LayoutAction {
    #[command(about = "Print the restored section order")]
    Show,
    #[command(about = "Drop section <ACTIVE> onto the slot held by <OVER>")]
    Move {
        active: String,
        #[arg(help = "Target section; omit to simulate a drop outside any section")]
        over: Option<String>,
    },
    #[command(about = "Forget the persisted order and return to the default")]
    Reset,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    chave: &'static str,
    arquivo: String,
    ordem: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resultado: Option<DragOutcome>,
}

pub fn run(action: &LayoutAction) -> CommandResult {
    let config = match load_config() {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("layout", error),
    };
    let store = JsonFileStore::new(&config.storage.path);
    let arquivo = store.path().display().to_string();
    let mut sections = SectionOrderStore::restore(store);

    let resultado = match action {
        LayoutAction::Show => None,
        LayoutAction::Move { active, over } => {
            let outcome = sections.handle_drag_end(active, over.as_deref());
            if outcome == (DragOutcome::Reordered { persisted: false }) {
                return CommandResult::from_error(
                    "layout",
                    InterfaceError::StorageUnavailable {
                        message: format!("section order could not be written to {arquivo}"),
                    },
                );
            }
            Some(outcome)
        }
        LayoutAction::Reset => {
            if let Err(error) = sections.reset() {
                return CommandResult::from_error("layout", ApplicationError::from(error));
            }
            None
        }
    };

    info!(
        event_name = "cli.layout.completed",
        action = action_name(action),
        storage_path = %arquivo,
        "layout command applied"
    );
    let report = LayoutReport {
        chave: SECTION_ORDER_KEY,
        arquivo,
        ordem: sections.order().to_vec(),
        resultado,
    };
    CommandResult::success("layout", report.ordem.join(", "), &report)
}

fn action_name(action: &LayoutAction) -> &'static str {
    match action {
        LayoutAction::Show => "show",
        LayoutAction::Move { .. } => "move",
        LayoutAction::Reset => "reset",
    }
}
