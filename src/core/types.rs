//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::GovError;

/// Fiscal year label keying the budget tables
///
/// Variant order is chronological; trend series rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalYear {
    #[serde(rename = "2016-17")]
    Fy2016_17,
    #[serde(rename = "2017-18")]
    Fy2017_18,
    #[serde(rename = "2018-19")]
    Fy2018_19,
    #[serde(rename = "2019-20")]
    Fy2019_20,
    #[serde(rename = "2020-21")]
    Fy2020_21,
}

impl FiscalYear {
    pub const ALL: [FiscalYear; 5] = [
        FiscalYear::Fy2016_17,
        FiscalYear::Fy2017_18,
        FiscalYear::Fy2018_19,
        FiscalYear::Fy2019_20,
        FiscalYear::Fy2020_21,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fy2016_17 => "2016-17",
            Self::Fy2017_18 => "2017-18",
            Self::Fy2018_19 => "2018-19",
            Self::Fy2019_20 => "2019-20",
            Self::Fy2020_21 => "2020-21",
        }
    }

    /// Most recent year in the enumeration
    pub fn latest() -> Self {
        Self::Fy2020_21
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FiscalYear {
    type Err = GovError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|year| year.label() == label)
            .ok_or_else(|| GovError::UnknownFiscalYear(label.to_string()))
    }
}

/// Three-tier classification of a governance score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Green,
    Yellow,
    Red,
}

impl RiskLevel {
    pub const GREEN_THRESHOLD: u32 = 80;
    pub const YELLOW_THRESHOLD: u32 = 60;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::GREEN_THRESHOLD {
            RiskLevel::Green
        } else if score >= Self::YELLOW_THRESHOLD {
            RiskLevel::Yellow
        } else {
            RiskLevel::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
