//! Cross-district summary metrics

use serde::{Deserialize, Serialize};

use crate::core::types::RiskLevel;
use crate::dataset::district::{rounded_mean, DistrictData};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub district_count: usize,
    pub total_allocated: u64,
    pub total_utilized: u64,
    pub total_wards: usize,
    /// Rounded mean of the district averages, not of individual wards
    pub avg_governance_score: u32,
    pub green_wards: usize,
    pub yellow_wards: usize,
    pub red_wards: usize,
    pub total_complaints: u64,
}

impl OverviewStats {
    pub fn from_districts(districts: &[DistrictData]) -> Self {
        let mut stats = Self {
            district_count: districts.len(),
            avg_governance_score: rounded_mean(districts.iter().map(|d| d.avg_governance_score)),
            ..Self::default()
        };

        for district in districts {
            stats.total_allocated += district.total_allocated;
            stats.total_utilized += district.total_utilized;
            stats.total_wards += district.ward_count;

            for ward in &district.wards {
                stats.total_complaints += ward.complaint_count;
                match ward.risk_level {
                    RiskLevel::Green => stats.green_wards += 1,
                    RiskLevel::Yellow => stats.yellow_wards += 1,
                    RiskLevel::Red => stats.red_wards += 1,
                }
            }
        }

        stats
    }

    /// Share of allocated funds utilized, as a rounded percentage
    pub fn utilization_percent(&self) -> u32 {
        if self.total_allocated == 0 {
            return 0;
        }
        (self.total_utilized as f64 / self.total_allocated as f64 * 100.0).round() as u32
    }

    pub fn risk_count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Green => self.green_wards,
            RiskLevel::Yellow => self.yellow_wards,
            RiskLevel::Red => self.red_wards,
        }
    }
}
