//! Generation systems

mod generation;
pub mod ledger;
mod overview;

pub use generation::{generate_districts, generate_wards, AllocationContext, SchemeShare};
pub use ledger::{build_ledger, verify_links, AuditLedger, ChainError, LedgerEntry};
pub use overview::OverviewStats;
