use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::client::StateCode;
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorTier {
    #[serde(rename = "verde")]
    Green,
    #[serde(rename = "amarelo")]
    Yellow,
    #[serde(rename = "vermelho")]
    Red,
}

impl ColorTier {
    /// Colour band for a single 0-10 answer.
    pub fn for_answer(score: u8) -> Self {
        match score {
            9..=u8::MAX => Self::Green,
            7 | 8 => Self::Yellow,
            _ => Self::Red,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalAggregate {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "estado")]
    pub state: StateCode,
    pub lat: f64,
    pub lng: f64,
    pub nps_score: i32,
    #[serde(rename = "total_clientes")]
    pub client_count: u32,
    #[serde(rename = "categoria_cor")]
    pub color: ColorTier,
}

/// Brazilian macro-regions used by the region filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroRegion {
    Norte,
    Nordeste,
    #[serde(rename = "Centro-Oeste")]
    CentroOeste,
    Sudeste,
    Sul,
}

impl MacroRegion {
    pub const ALL: [MacroRegion; 5] =
        [Self::Norte, Self::Nordeste, Self::CentroOeste, Self::Sudeste, Self::Sul];

    pub fn name(self) -> &'static str {
        match self {
            Self::Norte => "Norte",
            Self::Nordeste => "Nordeste",
            Self::CentroOeste => "Centro-Oeste",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        }
    }

    pub fn state_codes(self) -> &'static [&'static str] {
        match self {
            Self::Norte => &["AM", "PA", "RO", "RR", "AC", "AP", "TO"],
            Self::Nordeste => &["BA", "CE", "PE", "MA", "PI", "RN", "PB", "SE", "AL"],
            Self::CentroOeste => &["DF", "GO", "MT", "MS"],
            Self::Sudeste => &["SP", "RJ", "MG", "ES"],
            Self::Sul => &["RS", "PR", "SC"],
        }
    }

    pub fn contains(self, state: &StateCode) -> bool {
        self.state_codes().contains(&state.as_str())
    }
}

impl fmt::Display for MacroRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacroRegion {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "norte" => Ok(Self::Norte),
            "nordeste" => Ok(Self::Nordeste),
            "centro-oeste" | "centro_oeste" | "centrooeste" => Ok(Self::CentroOeste),
            "sudeste" => Ok(Self::Sudeste),
            "sul" => Ok(Self::Sul),
            _ => Err(DomainError::UnknownRegion(value.to_string())),
        }
    }
}

/// Display names for the states offered by the filter panel.
const STATE_NAMES: &[(&str, &str)] = &[
    ("SP", "São Paulo"),
    ("RJ", "Rio de Janeiro"),
    ("MG", "Minas Gerais"),
    ("BA", "Bahia"),
    ("CE", "Ceará"),
    ("PE", "Pernambuco"),
    ("RS", "Rio Grande do Sul"),
    ("PR", "Paraná"),
    ("DF", "Distrito Federal"),
    ("AM", "Amazonas"),
];

pub fn state_name(state: &StateCode) -> Option<&'static str> {
    STATE_NAMES.iter().find(|(code, _)| state.as_str() == *code).map(|(_, name)| *name)
}

pub fn selectable_states() -> impl Iterator<Item = &'static str> {
    STATE_NAMES.iter().map(|(code, _)| *code)
}
