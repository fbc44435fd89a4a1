//! Error handling for the Sustainability Impact Dashboard
//!
//! Nothing in the dashboard is fatal. Every variant here has a recovery path
//! (sample data, retry, reset) and callers log rather than abort.

use thiserror::Error;

/// Dashboard error types
#[derive(Error, Debug)]
pub enum ImpactError {
    // Storage errors
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Stored dashboard data is unreadable: {0}")]
    StorageParse(#[from] serde_json::Error),

    // Report lifecycle errors
    #[error("A report is already being generated")]
    ReportInProgress,

    #[error("Report build {got} is stale (current build is {expected:?})")]
    StaleReport { expected: Option<u32>, got: u32 },

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Report generation failed: {0}")]
    ReportGeneration(String),

    #[error("Report generation timed out")]
    ReportTimedOut,

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ImpactError {
    /// Stable machine-readable code, surfaced to the host page
    pub fn code(&self) -> &'static str {
        match self {
            ImpactError::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            ImpactError::StorageParse(_) => "STORAGE_PARSE_ERROR",
            ImpactError::ReportInProgress => "REPORT_IN_PROGRESS",
            ImpactError::StaleReport { .. } => "STALE_REPORT",
            ImpactError::InvalidStateTransition(_) => "INVALID_STATE_TRANSITION",
            ImpactError::ReportGeneration(_) => "REPORT_GENERATION_FAILED",
            ImpactError::ReportTimedOut => "REPORT_TIMED_OUT",
            ImpactError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<config::ConfigError> for ImpactError {
    fn from(err: config::ConfigError) -> Self {
        ImpactError::Configuration(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ImpactError {
    fn from(err: validator::ValidationErrors) -> Self {
        ImpactError::Configuration(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type ImpactResult<T> = Result<T, ImpactError>;
