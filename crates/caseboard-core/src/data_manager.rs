//! CRUD operations over the state's case list.
//!
//! No validation happens here; callers validate with
//! [`crate::validator::Validator`] first.

use tracing::{debug, info};

use crate::clock::Clock;
use crate::models::{Case, CaseData, CaseId};
use crate::state::AppState;

/// Case list operations bound to one state and clock.
pub struct DataManager<'a> {
    state: &'a mut AppState,
    clock: &'a dyn Clock,
}

impl<'a> DataManager<'a> {
    /// Create a data manager over `state`.
    pub fn new(state: &'a mut AppState, clock: &'a dyn Clock) -> Self {
        Self { state, clock }
    }

    /// Store a new case under a fresh id and return it.
    pub fn add_case(&mut self, data: CaseData) -> Case {
        let id = self.state.next_id();
        let case = Case::from_data(id, data, self.clock.today());
        self.state.case_list_mut().push(case.clone());
        info!(case_id = id, total = self.state.case_list().len(), "Case added");
        case
    }

    /// Overwrite every field of case `id` except the id.
    ///
    /// Returns `None` (and leaves the list untouched) when no case has that id.
    pub fn update_case(&mut self, id: CaseId, data: CaseData) -> Option<Case> {
        let today = self.clock.today();
        let Some(case) = self.state.case_list_mut().iter_mut().find(|c| c.id == id) else {
            debug!(case_id = id, "Update skipped: case not found");
            return None;
        };
        case.apply(data, today);
        info!(case_id = id, "Case updated");
        Some(case.clone())
    }

    /// Remove case `id`. Returns whether a case was removed.
    pub fn delete_case(&mut self, id: CaseId) -> bool {
        let cases = self.state.case_list_mut();
        let before = cases.len();
        cases.retain(|c| c.id != id);
        let removed = cases.len() < before;
        if removed {
            info!(case_id = id, total = cases.len(), "Case deleted");
        } else {
            debug!(case_id = id, "Delete skipped: case not found");
        }
        removed
    }

    /// Look up a case by id.
    pub fn get_case(&self, id: CaseId) -> Option<&Case> {
        self.state.case_list().iter().find(|c| c.id == id)
    }

    /// Check whether `number` is already used by a case other than `exclude_id`.
    pub fn medical_record_number_exists(&self, number: &str, exclude_id: Option<CaseId>) -> bool {
        medical_record_number_exists(self.state.case_list(), number, exclude_id)
    }
}

/// Case-sensitive exact match over `cases`, skipping `exclude_id`.
pub fn medical_record_number_exists(
    cases: &[Case],
    number: &str,
    exclude_id: Option<CaseId>,
) -> bool {
    cases
        .iter()
        .filter(|c| Some(c.id) != exclude_id)
        .any(|c| c.medical_record_number == number)
}
