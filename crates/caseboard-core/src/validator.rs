//! Field and form validation.
//!
//! Every field validator returns a [`ValidationResult`]; none of them panic or
//! short-circuit the others. [`Validator::validate_form`] runs them in form
//! order and collects every failure before deciding.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CaseConfig;
use crate::models::{CaseData, CaseField, CaseForm, RiskLevel};
use crate::text::{char_len, sanitize_form};

/// Outcome of validating one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    /// Empty when valid
    pub message: String,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}

/// A failing field and its message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: CaseField,
    pub message: String,
}

/// Every field that failed in one submission, in form order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid case form: {}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Message for one field, if it failed.
    pub fn message_for(&self, field: CaseField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn fields(&self) -> Vec<CaseField> {
        self.errors.iter().map(|e| e.field).collect()
    }
}

/// Parse a strict `YYYY-MM-DD` date that exists on the calendar.
pub fn parse_visit_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Field validators bound to the configured limits.
pub struct Validator<'a> {
    config: &'a CaseConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a CaseConfig) -> Self {
        Self { config }
    }

    /// Required, at most `max_patient_name_len` characters after trimming.
    pub fn validate_patient_name(&self, value: &str) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::fail("Patient name is required");
        }
        if char_len(value) > self.config.max_patient_name_len {
            return ValidationResult::fail(format!(
                "Patient name must be at most {} characters",
                self.config.max_patient_name_len
            ));
        }
        ValidationResult::ok()
    }

    /// Required, `[A-Za-z0-9]+`, then unique.
    ///
    /// `is_taken` is only called once the format check has passed.
    pub fn validate_medical_record_number<F>(&self, value: &str, is_taken: F) -> ValidationResult
    where
        F: FnOnce(&str) -> bool,
    {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::fail("Medical record number is required");
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return ValidationResult::fail(
                "Medical record number may only contain letters and digits",
            );
        }
        if is_taken(value) {
            return ValidationResult::fail(format!(
                "Medical record number {} is already in use",
                value
            ));
        }
        ValidationResult::ok()
    }

    /// Required, at most `max_category_len` characters.
    pub fn validate_management_category(&self, value: &str) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::fail("Management category is required");
        }
        if char_len(value) > self.config.max_category_len {
            return ValidationResult::fail(format!(
                "Management category must be at most {} characters",
                self.config.max_category_len
            ));
        }
        ValidationResult::ok()
    }

    /// Required, one of `high`, `medium`, `low`.
    pub fn validate_risk_level(&self, value: &str) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::fail("Risk level is required");
        }
        if RiskLevel::parse(value).is_none() {
            return ValidationResult::fail("Risk level must be one of high, medium, low");
        }
        ValidationResult::ok()
    }

    /// Optional; when present must be a real `YYYY-MM-DD` date.
    pub fn validate_last_visit_date(&self, value: &str) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::ok();
        }
        if parse_visit_date(value).is_none() {
            return ValidationResult::fail("Last visit date must be a valid YYYY-MM-DD date");
        }
        ValidationResult::ok()
    }

    /// Required, at most `max_assessment_len` characters.
    pub fn validate_initial_assessment(&self, value: &str) -> ValidationResult {
        let value = value.trim();
        if value.is_empty() {
            return ValidationResult::fail("Initial assessment is required");
        }
        if char_len(value) > self.config.max_assessment_len {
            return ValidationResult::fail(format!(
                "Initial assessment must be at most {} characters",
                self.config.max_assessment_len
            ));
        }
        ValidationResult::ok()
    }

    /// Validate one field of a form by name.
    pub fn validate_field<F>(&self, field: CaseField, value: &str, is_taken: F) -> ValidationResult
    where
        F: FnOnce(&str) -> bool,
    {
        match field {
            CaseField::PatientName => self.validate_patient_name(value),
            CaseField::MedicalRecordNumber => self.validate_medical_record_number(value, is_taken),
            CaseField::ManagementCategory => self.validate_management_category(value),
            CaseField::RiskLevel => self.validate_risk_level(value),
            CaseField::LastVisitDate => self.validate_last_visit_date(value),
            CaseField::InitialAssessment => self.validate_initial_assessment(value),
        }
    }

    /// Validate a whole submission.
    ///
    /// The form is trimmed and its category resolved first. All fields are
    /// checked in form order; on success the typed payload is returned.
    pub fn validate_form<F>(&self, form: &CaseForm, is_taken: F) -> Result<CaseData, ValidationErrors>
    where
        F: FnOnce(&str) -> bool,
    {
        let form = sanitize_form(form);
        let mut is_taken = Some(is_taken);
        let mut errors = Vec::new();

        for field in CaseField::ORDER {
            let value = form_value(&form, field);
            let result = self.validate_field(field, value, |number| {
                is_taken.take().is_some_and(|check| check(number))
            });
            if !result.valid {
                errors.push(FieldError {
                    field,
                    message: result.message,
                });
            }
        }

        if !errors.is_empty() {
            return Err(ValidationErrors { errors });
        }

        let risk_level = RiskLevel::parse(&form.risk_level)
            .ok_or_else(|| single_error(CaseField::RiskLevel, "Risk level is required"))?;
        let last_visit_date = if form.last_visit_date.is_empty() {
            None
        } else {
            Some(parse_visit_date(&form.last_visit_date).ok_or_else(|| {
                single_error(CaseField::LastVisitDate, "Last visit date is invalid")
            })?)
        };

        Ok(CaseData {
            patient_name: form.patient_name,
            medical_record_number: form.medical_record_number,
            management_category: form.management_category,
            risk_level,
            last_visit_date,
            initial_assessment: form.initial_assessment,
        })
    }
}

fn form_value(form: &CaseForm, field: CaseField) -> &str {
    match field {
        CaseField::PatientName => &form.patient_name,
        CaseField::MedicalRecordNumber => &form.medical_record_number,
        CaseField::ManagementCategory => &form.management_category,
        CaseField::RiskLevel => &form.risk_level,
        CaseField::LastVisitDate => &form.last_visit_date,
        CaseField::InitialAssessment => &form.initial_assessment,
    }
}

fn single_error(field: CaseField, message: &str) -> ValidationErrors {
    ValidationErrors {
        errors: vec![FieldError {
            field,
            message: message.to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn valid_form() -> CaseForm {
        CaseForm {
            patient_name: "王小明".into(),
            medical_record_number: "Z999999".into(),
            management_category: "慢性病管理".into(),
            custom_category: None,
            risk_level: "medium".into(),
            last_visit_date: "2026-01-01".into(),
            initial_assessment: "血壓偏高".into(),
        }
    }

    #[test]
    fn test_patient_name_rules() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        assert!(v.validate_patient_name("王小明").valid);
        assert!(!v.validate_patient_name("   ").valid);
        assert!(v.validate_patient_name(&"名".repeat(50)).valid);
        assert!(!v.validate_patient_name(&"名".repeat(51)).valid);
        // Surrounding whitespace does not count toward the limit
        assert!(v.validate_patient_name(&format!("  {}  ", "a".repeat(50))).valid);
    }

    #[test]
    fn test_record_number_format_checked_before_uniqueness() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);
        let called = Cell::new(false);

        let result = v.validate_medical_record_number("A1 2", |_| {
            called.set(true);
            false
        });

        assert!(!result.valid);
        assert!(!called.get());
    }

    #[test]
    fn test_record_number_uniqueness() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        assert!(v.validate_medical_record_number("A123456", |_| false).valid);
        let taken = v.validate_medical_record_number("A123456", |n| n == "A123456");
        assert!(!taken.valid);
        assert!(taken.message.contains("already in use"));
        assert!(!v.validate_medical_record_number("", |_| false).valid);
        assert!(!v.validate_medical_record_number("A-1", |_| false).valid);
        assert!(!v.validate_medical_record_number("編號1", |_| false).valid);
    }

    #[test]
    fn test_category_and_assessment_limits() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        assert!(v.validate_management_category(&"類".repeat(50)).valid);
        assert!(!v.validate_management_category(&"類".repeat(51)).valid);
        assert!(!v.validate_management_category("").valid);

        assert!(v.validate_initial_assessment(&"x".repeat(500)).valid);
        assert!(!v.validate_initial_assessment(&"x".repeat(501)).valid);
        assert!(!v.validate_initial_assessment(" ").valid);
    }

    #[test]
    fn test_risk_level_rules() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        assert!(v.validate_risk_level("low").valid);
        assert!(!v.validate_risk_level("").valid);
        assert!(!v.validate_risk_level("critical").valid);
    }

    #[test]
    fn test_date_rules() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        assert!(v.validate_last_visit_date("").valid);
        assert!(v.validate_last_visit_date("2024-02-29").valid);
        assert!(!v.validate_last_visit_date("2023-02-29").valid);
        assert!(!v.validate_last_visit_date("2026-13-01").valid);
        assert!(!v.validate_last_visit_date("2026-1-5").valid);
        assert!(!v.validate_last_visit_date("2026/01/05").valid);
        assert!(!v.validate_last_visit_date("+2026-01-0").valid);
    }

    #[test]
    fn test_validate_form_success() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        let data = v.validate_form(&valid_form(), |_| false).unwrap();
        assert_eq!(data.risk_level, RiskLevel::Medium);
        assert_eq!(data.last_visit_date, NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[test]
    fn test_validate_form_empty_date_is_none() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        let mut form = valid_form();
        form.last_visit_date = "  ".into();
        let data = v.validate_form(&form, |_| false).unwrap();
        assert_eq!(data.last_visit_date, None);
    }

    #[test]
    fn test_validate_form_collects_all_errors_in_order() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        let form = CaseForm {
            patient_name: "".into(),
            medical_record_number: "A 1".into(),
            management_category: "".into(),
            custom_category: None,
            risk_level: "extreme".into(),
            last_visit_date: "yesterday".into(),
            initial_assessment: "".into(),
        };
        let errors = v.validate_form(&form, |_| false).unwrap_err();
        assert_eq!(errors.fields(), CaseField::ORDER.to_vec());
        assert!(errors.to_string().starts_with("invalid case form: patient_name"));
    }

    #[test]
    fn test_validate_form_reports_duplicate_with_other_errors() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        let mut form = valid_form();
        form.initial_assessment = String::new();
        let errors = v.validate_form(&form, |n| n == "Z999999").unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![CaseField::MedicalRecordNumber, CaseField::InitialAssessment]
        );
        assert!(errors
            .message_for(CaseField::MedicalRecordNumber)
            .unwrap()
            .contains("already in use"));
    }

    #[test]
    fn test_validate_form_custom_category() {
        let config = CaseConfig::default();
        let v = Validator::new(&config);

        let mut form = valid_form();
        form.management_category = "custom".into();
        form.custom_category = None;
        let errors = v.validate_form(&form, |_| false).unwrap_err();
        assert_eq!(errors.fields(), vec![CaseField::ManagementCategory]);

        form.custom_category = Some("營養諮詢".into());
        let data = v.validate_form(&form, |_| false).unwrap();
        assert_eq!(data.management_category, "營養諮詢");
    }

    #[test]
    fn test_limits_follow_config() {
        let config = CaseConfig {
            max_patient_name_len: 3,
            ..CaseConfig::default()
        };
        let v = Validator::new(&config);
        assert!(v.validate_patient_name("王小明").valid);
        assert!(!v.validate_patient_name("歐陽小明").valid);
    }
}
