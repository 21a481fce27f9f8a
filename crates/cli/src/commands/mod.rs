pub mod clients;
pub mod config;
pub mod drill;
pub mod layout;
pub mod metrics;
pub mod product;
pub mod select;

use chrono::NaiveDate;
use clap::Args;
use npsdash_core::config::{AppConfig, LoadOptions};
use npsdash_core::{
    ApplicationError, DomainError, FilterState, InterfaceError, MacroRegion, Period, ProductId,
    StateCode,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success<T: Serialize>(command: &str, message: impl Into<String>, data: &T) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: impl Into<InterfaceError>) -> Self {
        let error = error.into();
        tracing::warn!(
            event_name = "cli.command.failed",
            command,
            error_class = error.error_class(),
            error = %error,
            "command failed"
        );
        Self::failure(
            command,
            error.error_class(),
            format!("{} ({error})", error.user_message()),
            error.exit_code(),
        )
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Filter-panel selection shared by the dashboard commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long, help = "Period key: ultimo-mes | ultimos-3-meses | ultimos-6-meses | ultimo-ano")]
    pub periodo: Option<String>,
    #[arg(long, help = "Macro-region: Norte | Nordeste | Centro-Oeste | Sudeste | Sul")]
    pub regiao: Option<String>,
    #[arg(long, help = "Two-letter state code, e.g. SP")]
    pub estado: Option<String>,
    #[arg(long, help = "Product id from the catalogue (1-10)")]
    pub produto: Option<String>,
    #[arg(long, help = "Reference date (YYYY-MM-DD); overrides dashboard.reference_date")]
    pub today: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn to_filter_state(&self, default_period: Period) -> Result<FilterState, DomainError> {
        let period = match self.periodo.as_deref() {
            Some(raw) => raw.parse()?,
            None => default_period,
        };
        let region = self.regiao.as_deref().map(str::parse::<MacroRegion>).transpose()?;
        let state = self.estado.as_deref().map(str::parse::<StateCode>).transpose()?;
        Ok(FilterState {
            period,
            region,
            state,
            product: self.produto.as_deref().map(ProductId::new),
        })
    }

    pub fn today(&self, config: &AppConfig) -> NaiveDate {
        self.today.unwrap_or_else(|| config.dashboard.today())
    }
}

pub(crate) fn load_config() -> Result<AppConfig, InterfaceError> {
    AppConfig::load(LoadOptions::default())
        .map_err(|error| InterfaceError::from(ApplicationError::from(error)))
}

pub(crate) fn domain_error(error: DomainError) -> InterfaceError {
    InterfaceError::from(ApplicationError::from(error))
}
