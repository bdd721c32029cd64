pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::GeneratorConfig;
pub use error::{GovError, Result};
pub use random::{LehmerRandom, RandomSource};
pub use types::{FiscalYear, RiskLevel};
