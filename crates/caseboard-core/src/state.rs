//! Application state: the case list, the id counter and transient UI state.
//!
//! `AppState` is a plain container. It performs no validation; callers go
//! through [`crate::data_manager::DataManager`] to mutate cases.

use crate::models::{sample_cases, Case, CaseId, RiskLevel, SortDirection, SortField, SortSpec};

/// Whether the form is adding a new case or editing an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Adding,
    Editing(CaseId),
}

/// Transient UI state.
#[derive(Debug, Clone, Default, PartialEq)]
struct UiState {
    /// Search keyword (empty = no keyword filter)
    search_keyword: String,
    /// Risk filter (`None` = all levels)
    risk_filter: Option<RiskLevel>,
    /// Add or edit mode
    edit_mode: EditMode,
    /// Current column sort
    sort: Option<SortSpec>,
}

/// Sole owner of mutable application data.
#[derive(Debug, Clone)]
pub struct AppState {
    cases: Vec<Case>,
    next_id: CaseId,
    ui: UiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty state; ids start at 1.
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            next_id: 1,
            ui: UiState::default(),
        }
    }

    /// State seeded with the sample cases; the counter continues after them.
    pub fn seeded() -> Self {
        let mut state = Self::new();
        state.set_case_list(sample_cases());
        state
    }

    /// The live case list.
    pub fn case_list(&self) -> &[Case] {
        &self.cases
    }

    pub(crate) fn case_list_mut(&mut self) -> &mut Vec<Case> {
        &mut self.cases
    }

    /// Replace the case list wholesale.
    ///
    /// The id counter is bumped past the largest id in the new list so a
    /// later `next_id` can never collide with a stored case.
    pub fn set_case_list(&mut self, cases: Vec<Case>) {
        if let Some(max_id) = cases.iter().map(|c| c.id).max() {
            self.next_id = self.next_id.max(max_id.saturating_add(1));
        }
        self.cases = cases;
    }

    /// Return the current counter value and advance it.
    pub fn next_id(&mut self) -> CaseId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Peek at the counter without consuming it.
    pub fn peek_next_id(&self) -> CaseId {
        self.next_id
    }

    pub fn search_keyword(&self) -> &str {
        &self.ui.search_keyword
    }

    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) {
        self.ui.search_keyword = keyword.into();
    }

    pub fn risk_filter(&self) -> Option<RiskLevel> {
        self.ui.risk_filter
    }

    pub fn set_risk_filter(&mut self, level: Option<RiskLevel>) {
        self.ui.risk_filter = level;
    }

    /// Enter edit mode for `id`, or return to add mode.
    ///
    /// `enabled = false` always clears the editing id. `enabled = true`
    /// without an id stays in add mode.
    pub fn set_edit_mode(&mut self, enabled: bool, id: Option<CaseId>) {
        self.ui.edit_mode = match (enabled, id) {
            (true, Some(id)) => EditMode::Editing(id),
            _ => EditMode::Adding,
        };
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.ui.edit_mode, EditMode::Editing(_))
    }

    pub fn editing_case_id(&self) -> Option<CaseId> {
        match self.ui.edit_mode {
            EditMode::Editing(id) => Some(id),
            EditMode::Adding => None,
        }
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.ui.sort
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.ui.sort = Some(SortSpec { field, direction });
    }

    pub fn clear_sort(&mut self) {
        self.ui.sort = None;
    }
}
