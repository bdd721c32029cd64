//! District inputs and district-level aggregation

use serde::{Deserialize, Serialize};

use crate::dataset::ward::Ward;

/// Static district input: declared population and how many wards to derive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictDescriptor {
    pub name: String,
    pub population: u64,
    pub wards: u32,
}

impl DistrictDescriptor {
    pub fn new(name: &str, population: u64, wards: u32) -> Self {
        Self {
            name: name.to_string(),
            population,
            wards,
        }
    }

    /// Mean ward population before jitter
    pub fn mean_ward_population(&self) -> f64 {
        self.population as f64 / self.wards as f64
    }
}

/// A district's wards together with their totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictData {
    pub name: String,
    pub population: u64,
    pub total_allocated: u64,
    pub total_utilized: u64,
    pub ward_count: usize,
    pub wards: Vec<Ward>,
    pub avg_governance_score: u32,
}

impl DistrictData {
    /// Reduce a district's generated wards into district totals
    pub fn aggregate(descriptor: &DistrictDescriptor, wards: Vec<Ward>) -> Self {
        let total_allocated = wards.iter().map(|w| w.fund_allocated).sum();
        let total_utilized = wards.iter().map(|w| w.fund_utilized).sum();
        let avg_governance_score = rounded_mean(wards.iter().map(|w| w.governance_score));

        Self {
            name: descriptor.name.clone(),
            population: descriptor.population,
            total_allocated,
            total_utilized,
            ward_count: wards.len(),
            wards,
            avg_governance_score,
        }
    }
}

/// Rounded arithmetic mean; 0 for an empty sequence
pub(crate) fn rounded_mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), v| (sum + v as u64, count + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RiskLevel;

    fn ward(allocated: u64, utilized: u64, score: u32) -> Ward {
        Ward {
            id: "test-ward-1".into(),
            name: "Ward 1".into(),
            district: "Test".into(),
            population: 100,
            fund_allocated: allocated,
            fund_utilized: utilized,
            utilization_rate: 0,
            complaint_count: 0,
            resolution_rate: 0,
            sla_score: 0,
            governance_score: score,
            risk_level: RiskLevel::from_score(score),
            schemes: Vec::new(),
        }
    }

    #[test]
    fn test_aggregate_sums_and_mean() {
        let descriptor = DistrictDescriptor::new("Test", 1000, 3);
        let data = DistrictData::aggregate(
            &descriptor,
            vec![ward(100, 80, 70), ward(200, 150, 75), ward(300, 200, 76)],
        );

        assert_eq!(data.total_allocated, 600);
        assert_eq!(data.total_utilized, 430);
        assert_eq!(data.ward_count, 3);
        // 221 / 3 = 73.67
        assert_eq!(data.avg_governance_score, 74);
        assert_eq!(data.population, 1000);
    }

    #[test]
    fn test_aggregate_empty_wards() {
        let descriptor = DistrictDescriptor::new("Empty", 10, 1);
        let data = DistrictData::aggregate(&descriptor, Vec::new());
        assert_eq!(data.total_allocated, 0);
        assert_eq!(data.avg_governance_score, 0);
        assert_eq!(data.ward_count, 0);
    }

    #[test]
    fn test_rounded_mean_half_rounds_up() {
        assert_eq!(rounded_mean([70, 71].into_iter()), 71);
        assert_eq!(rounded_mean(std::iter::empty()), 0);
    }
}
