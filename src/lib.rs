//! GovTrace - Synthetic Ward Governance Dataset Generator

pub mod core;
pub mod dataset;
pub mod export;
