//! Configuration management for the Sustainability Impact Dashboard
//!
//! Supports layered configuration loading:
//! 1. Default values in code
//! 2. A JSON override document supplied by the host page

use config::{File, FileFormat};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::ImpactResult;
use crate::validation::{validate_file_name, validate_storage_key, NegativeInputPolicy};

pub const DEFAULT_STORAGE_KEY: &str = "dashboardData";
pub const DEFAULT_REPORT_FILE_NAME: &str = "olor-sustainability-report.pdf";
pub const DEFAULT_REPORT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;

/// Main dashboard configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DashboardConfig {
    /// Persisted state configuration
    #[validate]
    pub storage: StorageConfig,

    /// Bean input handling
    pub input: InputConfig,

    /// Report generation configuration
    #[validate]
    pub report: ReportConfig,

    /// Responsive layout configuration
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct StorageConfig {
    /// Key under which the last snapshot is stored
    #[validate(custom = "validate_config_storage_key")]
    pub key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// What to do with negative bean quantities
    pub negative_policy: NegativeInputPolicy,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct ReportConfig {
    /// Download file name
    #[validate(custom = "validate_report_file_name")]
    pub file_name: String,

    /// Upper bound on a single build before it is discarded
    #[validate(range(min = 1, max = 600000))]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Viewports at or below this width use the compact chart typography
    pub mobile_breakpoint_px: u32,
}

fn to_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(msg.into());
    err
}

fn validate_config_storage_key(key: &str) -> Result<(), ValidationError> {
    validate_storage_key(key).map_err(|msg| to_validation_error("storage_key", msg))
}

fn validate_report_file_name(name: &str) -> Result<(), ValidationError> {
    validate_file_name(name).map_err(|msg| to_validation_error("file_name", msg))
}

impl DashboardConfig {
    /// Load configuration from defaults and an optional JSON override document
    pub fn load(overrides: Option<&str>) -> ImpactResult<Self> {
        let mut builder = config::Config::builder()
            .set_default("storage.key", DEFAULT_STORAGE_KEY)?
            .set_default("input.negative_policy", "clamp")?
            .set_default("report.file_name", DEFAULT_REPORT_FILE_NAME)?
            .set_default("report.timeout_ms", DEFAULT_REPORT_TIMEOUT_MS as i64)?
            .set_default(
                "display.mobile_breakpoint_px",
                DEFAULT_MOBILE_BREAKPOINT_PX as i64,
            )?;

        if let Some(json) = overrides.filter(|s| !s.trim().is_empty()) {
            builder = builder.add_source(File::from_str(json, FileFormat::Json));
        }

        let config: DashboardConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        tracing::debug!(
            storage_key = %config.storage.key,
            timeout_ms = config.report.timeout_ms,
            "Dashboard configuration loaded"
        );

        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                key: DEFAULT_STORAGE_KEY.to_string(),
            },
            input: InputConfig {
                negative_policy: NegativeInputPolicy::Clamp,
            },
            report: ReportConfig {
                file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
                timeout_ms: DEFAULT_REPORT_TIMEOUT_MS,
            },
            display: DisplayConfig {
                mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config.storage.key, "dashboardData");
        assert_eq!(config.input.negative_policy, NegativeInputPolicy::Clamp);
        assert_eq!(config.report.file_name, "olor-sustainability-report.pdf");
        assert_eq!(config.report.timeout_ms, 5000);
        assert_eq!(config.display.mobile_breakpoint_px, 768);
    }

    #[test]
    fn test_load_with_overrides() {
        let overrides = r#"{
            "input": { "negative_policy": "pass_through" },
            "report": { "timeout_ms": 12000 }
        }"#;
        let config = DashboardConfig::load(Some(overrides)).unwrap();
        assert_eq!(config.input.negative_policy, NegativeInputPolicy::PassThrough);
        assert_eq!(config.report.timeout_ms, 12000);
        // untouched keys keep their defaults
        assert_eq!(config.report.file_name, "olor-sustainability-report.pdf");
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let config = DashboardConfig::load(Some("   ")).unwrap();
        assert_eq!(config.storage.key, "dashboardData");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = DashboardConfig::load(Some(r#"{"report": {"timeout_ms": 0}}"#)).unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_rejects_non_pdf_file_name() {
        let err = DashboardConfig::load(Some(r#"{"report": {"file_name": "report.txt"}}"#))
            .unwrap_err();
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_rejects_empty_storage_key() {
        assert!(DashboardConfig::load(Some(r#"{"storage": {"key": ""}}"#)).is_err());
    }

    #[test]
    fn test_default_matches_loaded() {
        let loaded = DashboardConfig::load(None).unwrap();
        let default = DashboardConfig::default();
        assert_eq!(loaded.storage.key, default.storage.key);
        assert_eq!(loaded.report.timeout_ms, default.report.timeout_ms);
    }
}
