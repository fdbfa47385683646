//! Closed categorical domains and the customer table schema

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column names of the customer table
pub mod columns {
    pub const GENERATION: &str = "generation";
    pub const GENDER: &str = "gender";
    pub const PROVINCE: &str = "province";
    pub const ANNUAL_INCOME: &str = "Annual_Income";
    pub const SPENDING_SCORE: &str = "Spending_Score";
    pub const PROFESSION: &str = "Profession";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const TOTAL: &str = "Total";
    pub const NUM_PEOPLE: &str = "num_people";

    /// Columns every customer table must carry
    pub const CUSTOMER: [&str; 6] = [
        GENERATION,
        GENDER,
        PROVINCE,
        ANNUAL_INCOME,
        SPENDING_SCORE,
        PROFESSION,
    ];

    /// Columns every coordinate table must carry
    pub const COORDINATE: [&str; 3] = [PROVINCE, LATITUDE, LONGITUDE];
}

/// Generation cohort, ordered from oldest to youngest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Generation {
    #[serde(rename = "Boomers")]
    Boomers,
    #[serde(rename = "Gen. X")]
    GenX,
    #[serde(rename = "Gen. Y (Millenials)")]
    GenY,
    #[serde(rename = "Gen. Z (Zoomers)")]
    GenZ,
}

impl Generation {
    /// All cohorts in display order
    pub const ALL: [Generation; 4] = [
        Generation::Boomers,
        Generation::GenX,
        Generation::GenY,
        Generation::GenZ,
    ];

    /// Canonical label as it appears in the customer table
    pub fn label(&self) -> &'static str {
        match self {
            Generation::Boomers => "Boomers",
            Generation::GenX => "Gen. X",
            Generation::GenY => "Gen. Y (Millenials)",
            Generation::GenZ => "Gen. Z (Zoomers)",
        }
    }

    /// Canonical labels in display order
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|g| g.label().to_string()).collect()
    }

    /// Parse a label, accepting the corrected "Millennials" spelling
    pub fn parse(label: &str) -> Option<Generation> {
        match label.trim() {
            "Boomers" => Some(Generation::Boomers),
            "Gen. X" => Some(Generation::GenX),
            "Gen. Y (Millenials)" | "Gen. Y (Millennials)" => Some(Generation::GenY),
            "Gen. Z (Zoomers)" => Some(Generation::GenZ),
            _ => None,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Generation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Generation::parse(s).ok_or_else(|| Error::UnknownCategory {
            column: columns::GENERATION.to_string(),
            value: s.to_string(),
            row: 0,
        })
    }
}

/// Customer gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Both genders in sorted label order
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Option<Gender> {
        match label.trim().to_ascii_lowercase().as_str() {
            "female" => Some(Gender::Female),
            "male" => Some(Gender::Male),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Gender::parse(s).ok_or_else(|| Error::InvalidSelection {
            value: s.to_string(),
            options: Gender::ALL
                .iter()
                .map(|g| g.label())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}
