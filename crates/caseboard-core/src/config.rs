//! Configuration constants and the runtime case configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum patient name length (characters, after trimming).
pub const MAX_PATIENT_NAME_LEN: usize = 50;

/// Maximum management category length (characters).
pub const MAX_CATEGORY_LEN: usize = 50;

/// Maximum initial assessment length (characters).
pub const MAX_ASSESSMENT_LEN: usize = 500;

/// Days since the last visit after which a case is pending follow-up.
pub const FOLLOW_UP_THRESHOLD_DAYS: i64 = 7;

/// Form value selecting a free-text management category.
pub const CUSTOM_CATEGORY_OPTION: &str = "custom";

/// Preset management categories offered by the form.
pub const DEFAULT_CATEGORIES: &[&str] = &["慢性病管理", "術後追蹤", "長期照護", "復健治療", "居家護理"];

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validation limits and thresholds used across the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaseConfig {
    /// Maximum patient name length
    pub max_patient_name_len: usize,
    /// Maximum management category length
    pub max_category_len: usize,
    /// Maximum initial assessment length
    pub max_assessment_len: usize,
    /// Follow-up threshold in whole days (strictly greater is pending)
    pub follow_up_threshold_days: i64,
    /// Preset management categories
    pub categories: Vec<String>,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            max_patient_name_len: MAX_PATIENT_NAME_LEN,
            max_category_len: MAX_CATEGORY_LEN,
            max_assessment_len: MAX_ASSESSMENT_LEN,
            follow_up_threshold_days: FOLLOW_UP_THRESHOLD_DAYS,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl CaseConfig {
    /// Parse a configuration from JSON; missing keys fall back to defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: CaseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every submission invalid.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_patient_name_len == 0 {
            return Err(ConfigError::Invalid("max_patient_name_len must be positive".into()));
        }
        if self.max_category_len == 0 {
            return Err(ConfigError::Invalid("max_category_len must be positive".into()));
        }
        if self.max_assessment_len == 0 {
            return Err(ConfigError::Invalid("max_assessment_len must be positive".into()));
        }
        if self.follow_up_threshold_days < 0 {
            return Err(ConfigError::Invalid(
                "follow_up_threshold_days cannot be negative".into(),
            ));
        }
        Ok(())
    }
}
