use thiserror::Error;

use crate::config::ConfigError;
use crate::layout::StoreError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown period key `{0}` (expected ultimo-mes|ultimos-3-meses|ultimos-6-meses|ultimo-ano)")]
    UnknownPeriod(String),
    #[error("unknown region `{0}` (expected Norte|Nordeste|Centro-Oeste|Sudeste|Sul)")]
    UnknownRegion(String),
    #[error("invalid state code `{0}` (expected two ASCII letters)")]
    InvalidStateCode(String),
    #[error("unknown table sort field `{0}` (expected nome|nps_score|regiao|tipo)")]
    UnknownSortField(String),
    #[error("unknown client category `{0}` (expected Promotor|Neutro|Detrator)")]
    UnknownCategory(String),
    #[error("unknown drill-down type `{0}`")]
    UnknownDrillDown(String),
    #[error("invalid response time `{0}` (expected h:mm)")]
    InvalidDuration(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "The request could not be processed. Check inputs and try again.",
            Self::StorageUnavailable { .. } => {
                "The layout store is unavailable. The dashboard keeps working with the default layout."
            }
            Self::Configuration { .. } => "The configuration could not be loaded.",
        }
    }

    pub fn error_class(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => "bad_request",
            Self::StorageUnavailable { .. } => "storage",
            Self::Configuration { .. } => "config_validation",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BadRequest { .. } => 1,
            Self::Configuration { .. } => 2,
            Self::StorageUnavailable { .. } => 3,
        }
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest { message: error.to_string() },
            ApplicationError::Store(error) => {
                Self::StorageUnavailable { message: error.to_string() }
            }
            ApplicationError::Configuration(error) => {
                Self::Configuration { message: error.to_string() }
            }
        }
    }
}
