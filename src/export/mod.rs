//! JSON and CSV renderings consumed by packaging and display collaborators

pub mod csv;
pub mod grievance;
pub mod package;

use serde::Serialize;

use crate::core::error::Result;
use crate::dataset::district::DistrictData;
use crate::dataset::scheme::BudgetScheme;
use crate::dataset::systems::AuditLedger;
use crate::dataset::ward::Ward;

pub use self::csv::{grievance_csv, wards_csv, GRIEVANCE_CSV_HEADER, WARD_CSV_HEADER};
pub use grievance::{grievance_stats, GrievanceStat};
pub use package::write_package;

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn schemes_json(schemes: &[BudgetScheme]) -> Result<String> {
    to_pretty_json(schemes)
}

pub fn districts_json(districts: &[DistrictData]) -> Result<String> {
    to_pretty_json(districts)
}

pub fn wards_json(wards: &[Ward]) -> Result<String> {
    to_pretty_json(wards)
}

/// Ledger in display (timestamp) order
pub fn ledger_json(ledger: &AuditLedger) -> Result<String> {
    to_pretty_json(ledger.entries())
}

pub fn grievance_json(stats: &[GrievanceStat]) -> Result<String> {
    to_pretty_json(stats)
}
