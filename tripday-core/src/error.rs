//! Error types for tripday.
//!
//! The scheduling functions never fail; these cover loading, saving and
//! exporting plans.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripdayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Day {0} is not part of this plan")]
    DayNotFound(chrono::NaiveDate),

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type TripdayResult<T> = Result<T, TripdayError>;
