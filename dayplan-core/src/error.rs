//! Error types for the dayplan ecosystem.

use thiserror::Error;

/// Errors that can occur in dayplan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Start time {start} must be before end time {end}")]
    TimeOrder { start: String, end: String },

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("Search term must not be empty")]
    EmptySearch,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("No remote configured (set remote_url in {0})")]
    NoRemoteConfigured(String),
}

/// Result type alias for dayplan operations.
pub type PlanResult<T> = Result<T, PlanError>;
