//! Top-level controller tying state, validation and CRUD together.
//!
//! `CaseBoard` owns the application state, the configuration and the clock.
//! The front end calls into it for every user action and re-renders from
//! [`CaseBoard::visible_cases`] and [`CaseBoard::statistics`].

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::{calculate_statistics, filter_cases, is_pending_follow_up, sort_cases};
use crate::clock::Clock;
use crate::config::{CaseConfig, ConfigError};
use crate::data_manager::{medical_record_number_exists, DataManager};
use crate::export::CaseExport;
use crate::models::{
    Case, CaseField, CaseForm, CaseId, CaseStatistics, RiskLevel, SortDirection, SortField,
};
use crate::state::AppState;
use crate::text::resolve_category;
use crate::validator::{ValidationErrors, ValidationResult, Validator};

/// Controller errors.
#[derive(Error, Debug)]
pub enum CaseBoardError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Case not found: {0}")]
    NotFound(CaseId),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type CaseBoardResult<T> = Result<T, CaseBoardError>;

/// The case-management application.
pub struct CaseBoard {
    state: AppState,
    config: CaseConfig,
    clock: Box<dyn Clock>,
}

impl CaseBoard {
    /// Create a board seeded with the sample cases.
    pub fn new(config: CaseConfig, clock: Box<dyn Clock>) -> CaseBoardResult<Self> {
        Self::with_state(AppState::seeded(), config, clock)
    }

    /// Create a board with no cases.
    pub fn empty(config: CaseConfig, clock: Box<dyn Clock>) -> CaseBoardResult<Self> {
        Self::with_state(AppState::new(), config, clock)
    }

    /// Create a board over existing state. The config is validated up front.
    ///
    /// An editing id that names no stored case is dropped, so the board
    /// starts in add mode.
    pub fn with_state(mut state: AppState, config: CaseConfig, clock: Box<dyn Clock>) -> CaseBoardResult<Self> {
        config.validate()?;
        if let Some(id) = state.editing_case_id() {
            if !state.case_list().iter().any(|c| c.id == id) {
                warn!(case_id = id, "Editing id not in case list, returning to add mode");
                state.set_edit_mode(false, None);
            }
        }
        info!(cases = state.case_list().len(), "Case board ready");
        Ok(Self {
            state,
            config,
            clock,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &CaseConfig {
        &self.config
    }

    /// All cases in insertion order.
    pub fn cases(&self) -> &[Case] {
        self.state.case_list()
    }

    pub fn get_case(&self, id: CaseId) -> Option<&Case> {
        self.cases().iter().find(|c| c.id == id)
    }

    fn data_manager(&mut self) -> DataManager<'_> {
        DataManager::new(&mut self.state, self.clock.as_ref())
    }

    // =========================================================================
    // Form Operations
    // =========================================================================

    /// Validate and store a form submission.
    ///
    /// In add mode a new case is created. In edit mode the case being edited
    /// is overwritten and the board returns to add mode. Validation failures
    /// leave state untouched and report every failing field.
    pub fn submit(&mut self, form: &CaseForm) -> CaseBoardResult<Case> {
        let editing = self.state.editing_case_id();
        let validator = Validator::new(&self.config);
        let cases = self.state.case_list();
        let data = validator
            .validate_form(form, |number| {
                medical_record_number_exists(cases, number, editing)
            })
            .map_err(|errors| {
                warn!(fields = ?errors.fields(), "Case form rejected");
                errors
            })?;

        match editing {
            Some(id) => {
                let updated = self.data_manager().update_case(id, data);
                self.state.set_edit_mode(false, None);
                updated.ok_or(CaseBoardError::NotFound(id))
            }
            None => Ok(self.data_manager().add_case(data)),
        }
    }

    /// Validate a single field for live form feedback.
    ///
    /// A bare custom-category marker is checked as an empty category, the
    /// same way a submission resolves it.
    pub fn validate_field(&self, field: CaseField, value: &str) -> ValidationResult {
        if field == CaseField::ManagementCategory {
            return self.validate_category(value, None);
        }
        let editing = self.state.editing_case_id();
        let cases = self.state.case_list();
        Validator::new(&self.config).validate_field(field, value, |number| {
            medical_record_number_exists(cases, number, editing)
        })
    }

    /// Validate the category select together with its free-text companion.
    pub fn validate_category(&self, selected: &str, custom: Option<&str>) -> ValidationResult {
        let category = resolve_category(selected, custom);
        Validator::new(&self.config).validate_management_category(&category)
    }

    /// Bind the form to case `id` and return its prefilled values.
    pub fn begin_edit(&mut self, id: CaseId) -> CaseBoardResult<CaseForm> {
        let form = self
            .get_case(id)
            .map(CaseForm::from_case)
            .ok_or(CaseBoardError::NotFound(id))?;
        self.state.set_edit_mode(true, Some(id));
        debug!(case_id = id, "Editing case");
        Ok(form)
    }

    /// Return the form to add mode.
    pub fn cancel_edit(&mut self) {
        self.state.set_edit_mode(false, None);
    }

    pub fn is_edit_mode(&self) -> bool {
        self.state.is_edit_mode()
    }

    pub fn editing_case_id(&self) -> Option<CaseId> {
        self.state.editing_case_id()
    }

    /// Delete case `id`. Deleting the case under edit returns to add mode.
    pub fn delete_case(&mut self, id: CaseId) -> CaseBoardResult<()> {
        if !self.data_manager().delete_case(id) {
            return Err(CaseBoardError::NotFound(id));
        }
        if self.state.editing_case_id() == Some(id) {
            self.state.set_edit_mode(false, None);
        }
        Ok(())
    }

    // =========================================================================
    // Search, Filter and Sort
    // =========================================================================

    pub fn set_search_keyword(&mut self, keyword: &str) {
        self.state.set_search_keyword(keyword.trim());
    }

    pub fn set_risk_filter(&mut self, level: Option<RiskLevel>) {
        self.state.set_risk_filter(level);
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        debug!(field = field.key(), direction = direction.as_str(), "Sort changed");
        self.state.set_sort(field, direction);
    }

    /// Sort by `field`, flipping direction when it is already the sort column.
    pub fn toggle_sort(&mut self, field: SortField) -> SortDirection {
        let direction = match self.state.sort() {
            Some(current) if current.field == field => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        debug!(field = field.key(), direction = direction.as_str(), "Sort toggled");
        self.state.set_sort(field, direction);
        direction
    }

    pub fn clear_sort(&mut self) {
        self.state.clear_sort();
    }

    /// Cases after the current search, risk filter and sort.
    pub fn visible_cases(&self) -> Vec<Case> {
        let filtered = filter_cases(
            self.cases(),
            self.state.search_keyword(),
            self.state.risk_filter(),
        );
        match self.state.sort() {
            Some(spec) => sort_cases(&filtered, spec.field, spec.direction),
            None => filtered,
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Statistics over every stored case as of today.
    pub fn statistics(&self) -> CaseStatistics {
        calculate_statistics(
            self.cases(),
            self.clock.today(),
            self.config.follow_up_threshold_days,
        )
    }

    /// Whether case `id` is overdue, or `None` if it does not exist.
    pub fn is_pending_follow_up(&self, id: CaseId) -> Option<bool> {
        let today = self.clock.today();
        self.get_case(id)
            .map(|c| is_pending_follow_up(c, today, self.config.follow_up_threshold_days))
    }

    /// Snapshot of the currently visible cases.
    pub fn export_visible(&self) -> CaseExport {
        CaseExport::from_cases(
            &self.visible_cases(),
            self.clock.today(),
            self.config.follow_up_threshold_days,
        )
    }
}
