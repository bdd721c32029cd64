//! Ward-level grievance statistics

use serde::{Deserialize, Serialize};

use crate::dataset::ward::Ward;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrievanceStat {
    pub ward_id: String,
    pub district: String,
    pub complaint_count: u64,
    pub resolution_rate: u32,
    pub population: u64,
    /// Complaints per resident, four decimal places
    pub complaint_ratio: String,
}

impl GrievanceStat {
    pub fn from_ward(ward: &Ward) -> Self {
        Self {
            ward_id: ward.id.clone(),
            district: ward.district.clone(),
            complaint_count: ward.complaint_count,
            resolution_rate: ward.resolution_rate,
            population: ward.population,
            complaint_ratio: format!("{:.4}", ward.complaint_ratio()),
        }
    }
}

pub fn grievance_stats<'a>(wards: impl IntoIterator<Item = &'a Ward>) -> Vec<GrievanceStat> {
    wards.into_iter().map(GrievanceStat::from_ward).collect()
}
