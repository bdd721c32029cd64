//! Ward records and governance scoring

use serde::{Deserialize, Serialize};

use crate::core::types::RiskLevel;

/// Per-scheme slice of a ward's allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeAllocation {
    pub name: String,
    pub allocated: u64,
    pub utilized: u64,
}

/// Smallest governance unit, generated per (district, fiscal year)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ward {
    pub id: String,
    pub name: String,
    pub district: String,
    pub population: u64,
    pub fund_allocated: u64,
    pub fund_utilized: u64,
    /// 0-100
    pub utilization_rate: u32,
    pub complaint_count: u64,
    /// 0-100
    pub resolution_rate: u32,
    /// 0-100
    pub sla_score: u32,
    /// 0-100
    pub governance_score: u32,
    pub risk_level: RiskLevel,
    pub schemes: Vec<SchemeAllocation>,
}

impl Ward {
    /// Complaints per resident
    pub fn complaint_ratio(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.complaint_count as f64 / self.population as f64
        }
    }
}

/// Weighted composite: 40% utilization, 30% SLA, 30% resolution
///
/// Components are clamped to [0, 100] before weighting so the result is too.
pub fn governance_score(utilization_rate: u32, sla_score: u32, resolution_rate: u32) -> u32 {
    let utilization = utilization_rate.min(100) as f64;
    let sla = sla_score.min(100) as f64;
    let resolution = resolution_rate.min(100) as f64;
    (0.4 * utilization + 0.3 * sla + 0.3 * resolution).round() as u32
}

/// `Bengaluru Urban`, 3 -> `bengaluru-urban-ward-3`
pub fn ward_id(district: &str, number: usize) -> String {
    let mut slug = String::with_capacity(district.len());
    let mut in_space = false;
    for c in district.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(c.to_lowercase());
            in_space = false;
        }
    }
    format!("{}-ward-{}", slug, number)
}
