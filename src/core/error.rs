use thiserror::Error;

#[derive(Error, Debug)]
pub enum GovError {
    #[error("Invalid district '{name}': {reason}")]
    InvalidDistrict { name: String, reason: String },

    #[error("Duplicate district: {0}")]
    DuplicateDistrict(String),

    #[error("No districts configured")]
    NoDistricts,

    #[error("No fiscal years configured")]
    NoFiscalYears,

    #[error("Seed {0} is outside the generator range 1..=2147483646")]
    InvalidSeed(u64),

    #[error("Unknown fiscal year: {0}")]
    UnknownFiscalYear(String),

    #[error("Invalid ledger timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl From<toml::de::Error> for GovError {
    fn from(err: toml::de::Error) -> Self {
        GovError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GovError>;
