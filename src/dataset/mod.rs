//! Synthetic Dataset Generation
//!
//! Derives ward-level governance records from the district list and budget
//! table, then builds a hash-linked audit ledger over them. Everything is a
//! pure function of the configuration and the random-stream cursor.

pub mod district;
pub mod output;
pub mod scheme;
pub mod session;
pub mod systems;
pub mod ward;

pub use district::{DistrictData, DistrictDescriptor};
pub use output::{Dataset, YearDataset};
pub use scheme::{budget_trend, year_total, BudgetScheme, TrendPoint};
pub use session::{build_dataset, flatten_wards, GenerationSession, YearSnapshot};
pub use systems::{AuditLedger, ChainError, LedgerEntry, OverviewStats};
pub use ward::{SchemeAllocation, Ward};
