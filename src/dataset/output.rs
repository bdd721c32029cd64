//! Dataset output and serialization

use serde::{Deserialize, Serialize};

use crate::core::types::FiscalYear;
use crate::dataset::district::DistrictData;
use crate::dataset::scheme::BudgetScheme;
use crate::dataset::systems::{AuditLedger, OverviewStats};
use crate::dataset::ward::Ward;

/// One fiscal year's districts and their overview
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearDataset {
    pub year: FiscalYear,
    pub districts: Vec<DistrictData>,
    pub overview: OverviewStats,
}

impl YearDataset {
    pub fn wards(&self) -> impl Iterator<Item = &Ward> {
        self.districts.iter().flat_map(|d| d.wards.iter())
    }
}

/// Complete build output
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub seed: u64,
    pub schemes: Vec<BudgetScheme>,
    pub years: Vec<YearDataset>,
    /// Year whose wards the ledger covers
    pub ledger_year: FiscalYear,
    pub ledger: AuditLedger,
    /// Random draws consumed by the whole build
    pub draws: u64,
}

impl Dataset {
    pub fn year(&self, year: FiscalYear) -> Option<&YearDataset> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Wards of the ledger year, in generation order
    pub fn ledger_wards(&self) -> Vec<&Ward> {
        self.year(self.ledger_year)
            .map(|y| y.wards().collect())
            .unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Seed {}: {} fiscal years, {} draws",
            self.seed,
            self.years.len(),
            self.draws
        )];

        for year in &self.years {
            let o = &year.overview;
            lines.push(format!(
                "{}: {} wards, {} allocated ({}% utilized), avg governance {}, risk {}/{}/{} (green/yellow/red), {} complaints",
                year.year,
                o.total_wards,
                o.total_allocated,
                o.utilization_percent(),
                o.avg_governance_score,
                o.green_wards,
                o.yellow_wards,
                o.red_wards,
                o.total_complaints,
            ));
        }

        let chain = match self.ledger.verify_chain() {
            Ok(()) => "chain intact".to_string(),
            Err(e) => format!("chain broken: {}", e),
        };
        lines.push(format!(
            "Ledger ({}): {} entries over {} wards, {}",
            self.ledger_year,
            self.ledger.len(),
            self.ledger.ward_count(),
            chain
        ));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::core::config::GeneratorConfig;
    use crate::core::types::FiscalYear;
    use crate::dataset::session::build_dataset;

    #[test]
    fn test_summary_mentions_every_year() {
        let dataset = build_dataset(GeneratorConfig::default()).unwrap();
        let summary = dataset.summary();

        for year in FiscalYear::ALL {
            assert!(summary.contains(year.label()), "missing {}", year);
        }
        assert!(summary.contains("chain intact"));
    }

    #[test]
    fn test_ledger_wards_are_last_year() {
        let dataset = build_dataset(GeneratorConfig::default()).unwrap();
        assert_eq!(dataset.ledger_year, FiscalYear::Fy2020_21);
        assert_eq!(dataset.ledger_wards().len(), 60);
    }

    #[test]
    fn test_json_round_trip() {
        let dataset = build_dataset(GeneratorConfig::default()).unwrap();
        let parsed: super::Dataset = serde_json::from_str(&dataset.to_json()).unwrap();
        assert_eq!(parsed, dataset);
    }
}
