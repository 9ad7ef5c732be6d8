//! Raw form input.

use serde::{Deserialize, Serialize};

use super::case::Case;

/// Raw values as submitted by the case form. Nothing here is validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseForm {
    pub patient_name: String,
    pub medical_record_number: String,
    /// Preset category, or the custom option marker
    pub management_category: String,
    /// Free text used when the custom option is selected
    pub custom_category: Option<String>,
    pub risk_level: String,
    /// `YYYY-MM-DD` or empty
    pub last_visit_date: String,
    pub initial_assessment: String,
}

impl CaseForm {
    /// Prefill the form from a stored case.
    pub fn from_case(case: &Case) -> Self {
        Self {
            patient_name: case.patient_name.clone(),
            medical_record_number: case.medical_record_number.clone(),
            management_category: case.management_category.clone(),
            custom_category: None,
            risk_level: case.risk_level.as_str().to_string(),
            last_visit_date: case.last_visit_date.format("%Y-%m-%d").to_string(),
            initial_assessment: case.initial_assessment.clone(),
        }
    }
}
