use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u32);

/// Two-letter Brazilian state code (UF), always stored upper-case.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateCode(String);

impl StateCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StateCode {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Ok(Self(trimmed.to_ascii_uppercase()));
        }
        Err(DomainError::InvalidStateCode(value.to_string()))
    }
}

impl TryFrom<String> for StateCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateCode> for String {
    fn from(value: StateCode) -> Self {
        value.0
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for StateCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NpsCategory {
    #[serde(rename = "Promotor")]
    Promoter,
    #[serde(rename = "Neutro")]
    Neutral,
    #[serde(rename = "Detrator")]
    Detractor,
}

impl NpsCategory {
    /// Tiers: 9-10 promoter, 7-8 neutral, 0-6 detractor.
    pub fn from_score(score: u8) -> Self {
        match score {
            9..=u8::MAX => Self::Promoter,
            7 | 8 => Self::Neutral,
            _ => Self::Detractor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Promoter => "Promotor",
            Self::Neutral => "Neutro",
            Self::Detractor => "Detrator",
        }
    }
}

impl FromStr for NpsCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "promotor" | "promotores" | "promoter" => Ok(Self::Promoter),
            "neutro" | "neutros" | "neutral" => Ok(Self::Neutral),
            "detrator" | "detratores" | "detractor" => Ok(Self::Detractor),
            _ => Err(DomainError::UnknownCategory(value.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// Answered the survey.
    #[serde(rename = "Respondido")]
    Responded,
    /// Score predicted by a model for a non-responder.
    #[serde(rename = "Calculado")]
    Predicted,
}

impl ResponseType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Responded => "Respondido",
            Self::Predicted => "Calculado",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cpf")]
    pub tax_id: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub nps_score: u8,
    #[serde(rename = "categoria")]
    pub category: NpsCategory,
    #[serde(rename = "tipo")]
    pub response: ResponseType,
    #[serde(rename = "regiao")]
    pub region: String,
    #[serde(rename = "produtos")]
    pub products: Vec<String>,
    #[serde(rename = "data_cadastro")]
    pub registered_on: NaiveDate,
    #[serde(rename = "endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Client {
    /// State code parsed from the trailing `- UF` of the region string.
    pub fn state_code(&self) -> Option<StateCode> {
        state_from_region(&self.region)
    }

    pub fn subscribes_to(&self, product_name: &str) -> bool {
        let needle = product_name.to_lowercase();
        self.products.iter().any(|product| product.to_lowercase().contains(&needle))
    }

    pub fn masked_tax_id(&self) -> String {
        mask_tax_id(&self.tax_id)
    }
}

pub fn state_from_region(region: &str) -> Option<StateCode> {
    let (_, tail) = region.rsplit_once('-')?;
    tail.parse().ok()
}

/// Hides everything but the last block: `123.456.789-00` becomes `***.***.789-00`.
pub fn mask_tax_id(tax_id: &str) -> String {
    let tail = tax_id.get(7..).unwrap_or("");
    format!("***.***{tail}")
}
