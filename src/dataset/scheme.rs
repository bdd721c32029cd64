//! Budget schemes and the per-year budget table

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::FiscalYear;

/// How many schemes (in declared order) get a per-ward breakdown and a trend line
pub const LEADING_SCHEME_COUNT: usize = 5;

/// A state budget line item with figures per fiscal year (in lakhs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetScheme {
    pub name: String,
    pub code: String,
    /// Keyed by fiscal year label
    pub budgets: BTreeMap<String, u64>,
}

impl BudgetScheme {
    pub fn new(name: &str, code: &str, figures: &[(FiscalYear, u64)]) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            budgets: figures
                .iter()
                .map(|(year, amount)| (year.label().to_string(), *amount))
                .collect(),
        }
    }

    /// Budget for a year; years absent from the table count as zero
    pub fn budget_for(&self, year: FiscalYear) -> u64 {
        self.budgets.get(year.label()).copied().unwrap_or(0)
    }
}

/// The first `LEADING_SCHEME_COUNT` schemes in declared order
pub fn leading_schemes(schemes: &[BudgetScheme]) -> &[BudgetScheme] {
    &schemes[..schemes.len().min(LEADING_SCHEME_COUNT)]
}

/// Sum of every scheme's budget for a year
pub fn year_total(schemes: &[BudgetScheme], year: FiscalYear) -> u64 {
    schemes.iter().map(|s| s.budget_for(year)).sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendValue {
    pub scheme: String,
    pub amount: u64,
}

/// One year's figures for the leading schemes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: FiscalYear,
    pub values: Vec<TrendValue>,
}

/// Budget trend series over the leading schemes, one point per year
pub fn budget_trend(schemes: &[BudgetScheme], years: &[FiscalYear]) -> Vec<TrendPoint> {
    let leading = leading_schemes(schemes);
    years
        .iter()
        .map(|&year| TrendPoint {
            year,
            values: leading
                .iter()
                .map(|s| TrendValue {
                    scheme: s.name.clone(),
                    amount: s.budget_for(year),
                })
                .collect(),
        })
        .collect()
}
