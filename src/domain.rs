use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScreenError;

pub const TAXON_ID: &str = "7227";

pub const DETAILS_HEADER_MARKER: &str = "Pubmed_ID";

pub const HITS_HEADER_MARKER: &str = "Amplicon";

pub const DEFAULT_DATA_SOURCE: &str = "DRSC";

pub const DEFAULT_DATA_SET: &str = "DRSC data set";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    NotAHit,
    Hit,
    StrongHit,
    MediumHit,
    WeakHit,
    NotScreened,
}

impl ResultCode {
    pub const ALL: [ResultCode; 6] = [
        ResultCode::NotAHit,
        ResultCode::Hit,
        ResultCode::StrongHit,
        ResultCode::MediumHit,
        ResultCode::WeakHit,
        ResultCode::NotScreened,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ResultCode::NotAHit => "N",
            ResultCode::Hit => "Y",
            ResultCode::StrongHit => "S",
            ResultCode::MediumHit => "M",
            ResultCode::WeakHit => "W",
            ResultCode::NotScreened => "NS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultCode::NotAHit => "Not a Hit",
            ResultCode::Hit => "Hit",
            ResultCode::StrongHit => "Strong Hit",
            ResultCode::MediumHit => "Medium Hit",
            ResultCode::WeakHit => "Weak Hit",
            ResultCode::NotScreened => "Not Screened",
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ResultCode {
    type Err = ScreenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim();
        ResultCode::ALL
            .into_iter()
            .find(|result| result.code() == code)
            .ok_or_else(|| ScreenError::InvalidResultCode(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityClass {
    Organism,
    DataSource,
    DataSet,
    Publication,
    #[serde(rename = "RNAiScreen")]
    Screen,
    Gene,
    #[serde(rename = "PCRProduct")]
    Amplicon,
    #[serde(rename = "RNAiScreenHit")]
    ScreenHit,
}

impl EntityClass {
    pub fn name(&self) -> &'static str {
        match self {
            EntityClass::Organism => "Organism",
            EntityClass::DataSource => "DataSource",
            EntityClass::DataSet => "DataSet",
            EntityClass::Publication => "Publication",
            EntityClass::Screen => "RNAiScreen",
            EntityClass::Gene => "Gene",
            EntityClass::Amplicon => "PCRProduct",
            EntityClass::ScreenHit => "RNAiScreenHit",
        }
    }

    pub fn is_bio_entity(&self) -> bool {
        matches!(self, EntityClass::Gene | EntityClass::Amplicon)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
