//! Caseboard Core Library
//!
//! In-memory patient case management: the data flow behind a case form and
//! case table.
//!
//! # Architecture
//!
//! ```text
//!   Front end (table, form, filters)
//!                │
//!        ┌───────▼────────┐
//!        │   CaseBoard    │  controller: owns state, config, clock
//!        └───┬────────┬───┘
//!            │        │
//!   ┌────────▼──┐  ┌──▼──────────┐
//!   │ Validator │  │ DataManager │──► AppState (cases, next id, UI state)
//!   └───────────┘  └─────────────┘
//!            │
//!   ┌────────▼──────────────────────┐
//!   │ analytics: filter / stats /   │
//!   │ follow-up / sort (pure)       │
//!   └───────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Limits, thresholds and preset categories
//! - [`models`]: Domain types (Case, CaseForm, RiskLevel, ...)
//! - [`state`]: Application state container
//! - [`validator`]: Field and form validation
//! - [`data_manager`]: CRUD over the case list
//! - [`analytics`]: Filtering, statistics and sorting
//! - [`board`]: Top-level controller
//! - [`export`]: JSON and CSV export
//! - [`logging`]: Tracing subscriber setup

pub mod analytics;
pub mod board;
pub mod clock;
pub mod config;
pub mod data_manager;
pub mod export;
pub mod logging;
pub mod models;
pub mod state;
pub mod text;
pub mod validator;

// Re-export commonly used types
pub use board::{CaseBoard, CaseBoardError, CaseBoardResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CaseConfig;
pub use data_manager::DataManager;
pub use models::{
    Case, CaseData, CaseField, CaseForm, CaseId, CaseStatistics, RiskLevel, SortDirection,
    SortField,
};
pub use state::AppState;
pub use validator::{ValidationErrors, ValidationResult, Validator};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum CaseboardError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CaseBoardError> for CaseboardError {
    fn from(e: CaseBoardError) -> Self {
        match e {
            CaseBoardError::NotFound(id) => CaseboardError::NotFound(format!("case {}", id)),
            CaseBoardError::Validation(errors) => CaseboardError::InvalidInput(errors.to_string()),
            CaseBoardError::Config(e) => CaseboardError::Configuration(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for CaseboardError {
    fn from(e: config::ConfigError) -> Self {
        CaseboardError::Configuration(e.to_string())
    }
}

impl From<serde_json::Error> for CaseboardError {
    fn from(e: serde_json::Error) -> Self {
        CaseboardError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CaseboardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        CaseboardError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open a board seeded with the sample cases and default configuration.
#[uniffi::export]
pub fn open_case_board() -> Result<Arc<CaseboardCore>, CaseboardError> {
    let board = CaseBoard::new(CaseConfig::default(), Box::new(SystemClock))?;
    Ok(CaseboardCore::wrap(board))
}

/// Open a seeded board with a JSON configuration (missing keys use defaults).
#[uniffi::export]
pub fn open_case_board_with_config(config_json: String) -> Result<Arc<CaseboardCore>, CaseboardError> {
    let config = CaseConfig::from_json(&config_json)?;
    let board = CaseBoard::new(config, Box::new(SystemClock))?;
    Ok(CaseboardCore::wrap(board))
}

/// Install the tracing subscriber. `format` is `pretty`, `compact` or `json`.
#[uniffi::export]
pub fn init_host_logging(verbosity: u8, format: String) -> Result<(), CaseboardError> {
    let format = logging::LogFormat::parse(&format)
        .ok_or_else(|| CaseboardError::InvalidInput(format!("unknown log format: {}", format)))?;
    let config = logging::LogConfig::from_verbosity(verbosity)
        .with_format(format)
        .with_ansi(false);
    logging::init_logging(&config).map_err(|e| CaseboardError::Internal(format!("{:#}", e)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe board wrapper for FFI.
#[derive(uniffi::Object)]
pub struct CaseboardCore {
    board: Arc<Mutex<CaseBoard>>,
}

impl CaseboardCore {
    /// Wrap an already-built board (also used by Rust hosts and tests).
    pub fn wrap(board: CaseBoard) -> Arc<Self> {
        Arc::new(Self {
            board: Arc::new(Mutex::new(board)),
        })
    }
}

#[uniffi::export]
impl CaseboardCore {
    // =========================================================================
    // Case Queries
    // =========================================================================

    /// All cases in insertion order.
    pub fn list_cases(&self) -> Result<Vec<FfiCase>, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.cases().iter().map(FfiCase::from).collect())
    }

    /// Cases after the current search, risk filter and sort.
    pub fn visible_cases(&self) -> Result<Vec<FfiCase>, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.visible_cases().iter().map(FfiCase::from).collect())
    }

    /// Get a case by id.
    pub fn get_case(&self, id: u64) -> Result<Option<FfiCase>, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.get_case(id).map(FfiCase::from))
    }

    /// Preset management categories for the category select.
    pub fn category_options(&self) -> Result<Vec<String>, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.config().categories.clone())
    }

    /// Current statistics.
    pub fn statistics(&self) -> Result<FfiStatistics, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.statistics().into())
    }

    // =========================================================================
    // Form Operations
    // =========================================================================

    /// Submit the form. Field failures come back in the outcome, not as an error.
    pub fn submit_form(&self, form: FfiCaseForm) -> Result<FfiSubmitOutcome, CaseboardError> {
        let mut board = self.board.lock()?;
        match board.submit(&form.into()) {
            Ok(case) => Ok(FfiSubmitOutcome {
                case: Some(FfiCase::from(&case)),
                errors: Vec::new(),
            }),
            Err(CaseBoardError::Validation(errors)) => Ok(FfiSubmitOutcome {
                case: None,
                errors: errors
                    .errors
                    .into_iter()
                    .map(|e| FfiFieldError {
                        field: e.field.as_str().to_string(),
                        message: e.message,
                    })
                    .collect(),
            }),
            Err(other) => Err(other.into()),
        }
    }

    /// Validate one field by name for live feedback.
    pub fn validate_field(
        &self,
        field: String,
        value: String,
    ) -> Result<FfiValidationResult, CaseboardError> {
        let field = CaseField::parse(&field)
            .ok_or_else(|| CaseboardError::InvalidInput(format!("unknown field: {}", field)))?;
        let board = self.board.lock()?;
        let result = board.validate_field(field, &value);
        Ok(FfiValidationResult {
            valid: result.valid,
            message: result.message,
        })
    }

    /// Validate the category select with its custom text, if any.
    pub fn validate_category(
        &self,
        selected: String,
        custom: Option<String>,
    ) -> Result<FfiValidationResult, CaseboardError> {
        let board = self.board.lock()?;
        let result = board.validate_category(&selected, custom.as_deref());
        Ok(FfiValidationResult {
            valid: result.valid,
            message: result.message,
        })
    }

    /// Enter edit mode and return the prefilled form.
    pub fn begin_edit(&self, id: u64) -> Result<FfiCaseForm, CaseboardError> {
        let mut board = self.board.lock()?;
        Ok(board.begin_edit(id)?.into())
    }

    /// Return to add mode.
    pub fn cancel_edit(&self) -> Result<(), CaseboardError> {
        self.board.lock()?.cancel_edit();
        Ok(())
    }

    pub fn is_edit_mode(&self) -> Result<bool, CaseboardError> {
        Ok(self.board.lock()?.is_edit_mode())
    }

    pub fn editing_case_id(&self) -> Result<Option<u64>, CaseboardError> {
        Ok(self.board.lock()?.editing_case_id())
    }

    /// Delete a case by id.
    pub fn delete_case(&self, id: u64) -> Result<(), CaseboardError> {
        self.board.lock()?.delete_case(id)?;
        Ok(())
    }

    // =========================================================================
    // Search, Filter and Sort
    // =========================================================================

    pub fn set_search_keyword(&self, keyword: String) -> Result<(), CaseboardError> {
        self.board.lock()?.set_search_keyword(&keyword);
        Ok(())
    }

    /// Set the risk filter; an empty string shows all levels.
    pub fn set_risk_filter(&self, level: String) -> Result<(), CaseboardError> {
        let level = parse_optional_risk(&level)?;
        self.board.lock()?.set_risk_filter(level);
        Ok(())
    }

    /// Sort by a column key (`name`, `id`, `category`, `risk`, `date`).
    pub fn set_sort(&self, field: String, direction: String) -> Result<(), CaseboardError> {
        let field = parse_sort_field(&field)?;
        let direction = SortDirection::parse(&direction).ok_or_else(|| {
            CaseboardError::InvalidInput(format!("unknown sort direction: {}", direction))
        })?;
        self.board.lock()?.set_sort(field, direction);
        Ok(())
    }

    /// Header click: sort by the column, flipping direction on repeat. Returns the direction.
    pub fn toggle_sort(&self, field: String) -> Result<String, CaseboardError> {
        let field = parse_sort_field(&field)?;
        let direction = self.board.lock()?.toggle_sort(field);
        Ok(direction.as_str().to_string())
    }

    pub fn clear_sort(&self) -> Result<(), CaseboardError> {
        self.board.lock()?.clear_sort();
        Ok(())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the visible cases as JSON.
    pub fn export_json(&self) -> Result<String, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.export_visible().to_json()?)
    }

    /// Export the visible cases as CSV.
    pub fn export_csv(&self) -> Result<String, CaseboardError> {
        let board = self.board.lock()?;
        Ok(board.export_visible().to_csv())
    }
}

fn parse_optional_risk(value: &str) -> Result<Option<RiskLevel>, CaseboardError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    RiskLevel::parse(value)
        .map(Some)
        .ok_or_else(|| CaseboardError::InvalidInput(format!("unknown risk level: {}", value)))
}

fn parse_sort_field(key: &str) -> Result<SortField, CaseboardError> {
    SortField::from_key(key)
        .ok_or_else(|| CaseboardError::InvalidInput(format!("unknown sort field: {}", key)))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe case.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCase {
    pub id: u64,
    pub patient_name: String,
    pub medical_record_number: String,
    pub management_category: String,
    pub risk_level: String,
    /// `YYYY-MM-DD`
    pub last_visit_date: String,
    pub initial_assessment: String,
}

impl From<&Case> for FfiCase {
    fn from(case: &Case) -> Self {
        Self {
            id: case.id,
            patient_name: case.patient_name.clone(),
            medical_record_number: case.medical_record_number.clone(),
            management_category: case.management_category.clone(),
            risk_level: case.risk_level.as_str().to_string(),
            last_visit_date: case.last_visit_date.format("%Y-%m-%d").to_string(),
            initial_assessment: case.initial_assessment.clone(),
        }
    }
}

/// FFI-safe form values.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCaseForm {
    pub patient_name: String,
    pub medical_record_number: String,
    pub management_category: String,
    pub custom_category: Option<String>,
    pub risk_level: String,
    pub last_visit_date: String,
    pub initial_assessment: String,
}

impl From<FfiCaseForm> for CaseForm {
    fn from(form: FfiCaseForm) -> Self {
        CaseForm {
            patient_name: form.patient_name,
            medical_record_number: form.medical_record_number,
            management_category: form.management_category,
            custom_category: form.custom_category,
            risk_level: form.risk_level,
            last_visit_date: form.last_visit_date,
            initial_assessment: form.initial_assessment,
        }
    }
}

impl From<CaseForm> for FfiCaseForm {
    fn from(form: CaseForm) -> Self {
        Self {
            patient_name: form.patient_name,
            medical_record_number: form.medical_record_number,
            management_category: form.management_category,
            custom_category: form.custom_category,
            risk_level: form.risk_level,
            last_visit_date: form.last_visit_date,
            initial_assessment: form.initial_assessment,
        }
    }
}

/// FFI-safe statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStatistics {
    pub total: u64,
    pub high_risk: u64,
    pub pending_follow_up: u64,
}

impl From<CaseStatistics> for FfiStatistics {
    fn from(stats: CaseStatistics) -> Self {
        Self {
            total: stats.total as u64,
            high_risk: stats.high_risk as u64,
            pending_follow_up: stats.pending_follow_up as u64,
        }
    }
}

/// FFI-safe single field result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiValidationResult {
    pub valid: bool,
    pub message: String,
}

/// FFI-safe field error.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

/// Result of a form submission: either the stored case or the field errors.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSubmitOutcome {
    pub case: Option<FfiCase>,
    pub errors: Vec<FfiFieldError>,
}
