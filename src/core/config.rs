//! Generator configuration
//!
//! The static inputs of a dataset build: seed, fiscal years, districts and
//! the budget table. `Default` carries the Karnataka dataset; a TOML file
//! with the same shape can replace any part of it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GovError, Result};
use crate::core::random::MODULUS;
use crate::core::types::FiscalYear;
use crate::dataset::district::DistrictDescriptor;
use crate::dataset::scheme::BudgetScheme;

/// Bundled configuration file, equal to `GeneratorConfig::default()`
pub const DEFAULT_CONFIG_PATH: &str = "data/karnataka.toml";

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Lehmer seed, 1..=2147483646
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Years in traversal order
    #[serde(default = "default_fiscal_years")]
    pub fiscal_years: Vec<FiscalYear>,

    /// Districts in traversal order
    #[serde(default = "default_districts")]
    pub districts: Vec<DistrictDescriptor>,

    /// Budget schemes in declared order; the first five get ward breakdowns
    #[serde(default = "default_schemes")]
    pub schemes: Vec<BudgetScheme>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            fiscal_years: default_fiscal_years(),
            districts: default_districts(),
            schemes: default_schemes(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject inputs that would divide by zero or break the traversal
    pub fn validate(&self) -> Result<()> {
        if self.seed == 0 || self.seed >= MODULUS {
            return Err(GovError::InvalidSeed(self.seed));
        }

        if self.fiscal_years.is_empty() {
            return Err(GovError::NoFiscalYears);
        }

        if self.districts.is_empty() {
            return Err(GovError::NoDistricts);
        }

        let mut names = HashSet::new();
        for district in &self.districts {
            if district.population == 0 {
                return Err(GovError::InvalidDistrict {
                    name: district.name.clone(),
                    reason: "population must be at least 1".into(),
                });
            }
            if district.wards == 0 {
                return Err(GovError::InvalidDistrict {
                    name: district.name.clone(),
                    reason: "ward count must be at least 1".into(),
                });
            }
            if !names.insert(district.name.as_str()) {
                return Err(GovError::DuplicateDistrict(district.name.clone()));
            }
        }

        for scheme in &self.schemes {
            for label in scheme.budgets.keys() {
                label.parse::<FiscalYear>()?;
            }
        }

        Ok(())
    }

    /// Last year in traversal order; the ledger is built over its wards
    pub fn ledger_year(&self) -> FiscalYear {
        self.fiscal_years
            .last()
            .copied()
            .unwrap_or_else(FiscalYear::latest)
    }

    pub fn total_wards(&self) -> u64 {
        self.districts.iter().map(|d| d.wards as u64).sum()
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

pub fn default_fiscal_years() -> Vec<FiscalYear> {
    FiscalYear::ALL.to_vec()
}

/// Karnataka districts with approximate populations
pub fn default_districts() -> Vec<DistrictDescriptor> {
    vec![
        DistrictDescriptor::new("Bengaluru Urban", 9_621_551, 8),
        DistrictDescriptor::new("Mysuru", 3_001_127, 6),
        DistrictDescriptor::new("Belagavi", 4_779_661, 6),
        DistrictDescriptor::new("Kalaburagi", 2_564_892, 5),
        DistrictDescriptor::new("Dakshina Kannada", 2_089_649, 5),
        DistrictDescriptor::new("Tumakuru", 2_678_980, 5),
        DistrictDescriptor::new("Ballari", 2_532_383, 5),
        DistrictDescriptor::new("Raichur", 1_924_773, 4),
        DistrictDescriptor::new("Dharwad", 1_846_993, 4),
        DistrictDescriptor::new("Shivamogga", 1_752_753, 4),
        DistrictDescriptor::new("Haveri", 1_598_506, 4),
        DistrictDescriptor::new("Chitradurga", 1_660_378, 4),
    ]
}

/// State-level agriculture schemes, in lakhs
pub fn default_schemes() -> Vec<BudgetScheme> {
    use FiscalYear::*;

    let scheme = |name: &str, code: &str, figures: [u64; 5]| {
        let years = [Fy2016_17, Fy2017_18, Fy2018_19, Fy2019_20, Fy2020_21];
        let pairs: Vec<(FiscalYear, u64)> = years.into_iter().zip(figures).collect();
        BudgetScheme::new(name, code, &pairs)
    };

    vec![
        scheme("Directorate of Agriculture", "2401_00_001_1_01", [2486, 6011, 5507, 6217, 7302]),
        scheme("Krishi Bhagya Yojane", "2401_00_102_0_27", [20000, 60000, 50000, 25000, 4000]),
        scheme("Supply of Seeds & Inputs", "2401_00_103_0_15", [69780, 72359, 61530, 62823, 52103]),
        scheme("Organic Farming", "2401_00_104_0_12", [5657, 4000, 10000, 8700, 4850]),
        scheme("Crop Insurance Scheme", "2401_00_110_0_07", [67538, 84511, 84511, 84500, 90000]),
        scheme("PM Kisan Samman Nidhi", "2401_00_800_0_05", [0, 0, 0, 0, 260000]),
        scheme("Farmer Support Schemes", "2401_00_102_0_28", [10000, 7270, 10000, 24119, 1188]),
        scheme("Agriculture Training & Extension", "2401_00_109_0_21", [8712, 9870, 7264, 5402, 5433]),
    ]
}
