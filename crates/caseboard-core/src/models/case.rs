//! Patient case models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Case identifier, assigned by the application state.
pub type CaseId = u64;

/// Ordinal risk classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// All levels, most severe first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Parse the form value (`high`, `medium`, `low`). Exact match only.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(RiskLevel::High),
            "medium" => Some(RiskLevel::Medium),
            "low" => Some(RiskLevel::Low),
            _ => None,
        }
    }

    /// Form value for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }

    /// Sort weight: high=3, medium=2, low=1.
    pub fn severity(&self) -> u8 {
        match self {
            RiskLevel::High => 3,
            RiskLevel::Medium => 2,
            RiskLevel::Low => 1,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored patient case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Case {
    /// Unique id, never reused
    pub id: CaseId,
    /// Patient name
    pub patient_name: String,
    /// Medical record number (alphanumeric, unique)
    pub medical_record_number: String,
    /// Management category (preset or custom text)
    pub management_category: String,
    /// Risk level
    pub risk_level: RiskLevel,
    /// Date of the last visit
    pub last_visit_date: NaiveDate,
    /// Initial assessment summary
    pub initial_assessment: String,
}

/// Case fields without an id; the payload for add and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseData {
    pub patient_name: String,
    pub medical_record_number: String,
    pub management_category: String,
    pub risk_level: RiskLevel,
    /// `None` means "today" at the time the case is stored
    pub last_visit_date: Option<NaiveDate>,
    pub initial_assessment: String,
}

impl Case {
    /// Build a stored case from its payload, filling an absent visit date with `today`.
    pub fn from_data(id: CaseId, data: CaseData, today: NaiveDate) -> Self {
        Self {
            id,
            patient_name: data.patient_name,
            medical_record_number: data.medical_record_number,
            management_category: data.management_category,
            risk_level: data.risk_level,
            last_visit_date: data.last_visit_date.unwrap_or(today),
            initial_assessment: data.initial_assessment,
        }
    }

    /// Overwrite every field except the id.
    pub fn apply(&mut self, data: CaseData, today: NaiveDate) {
        *self = Self::from_data(self.id, data, today);
    }

    /// Whole days from the last visit to `today`; negative for future visits.
    pub fn days_since_last_visit(&self, today: NaiveDate) -> i64 {
        (today - self.last_visit_date).num_days()
    }
}

/// Form fields, in validation order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CaseField {
    PatientName,
    MedicalRecordNumber,
    ManagementCategory,
    RiskLevel,
    LastVisitDate,
    InitialAssessment,
}

impl CaseField {
    /// All fields in the order a submission is validated.
    pub const ORDER: [CaseField; 6] = [
        CaseField::PatientName,
        CaseField::MedicalRecordNumber,
        CaseField::ManagementCategory,
        CaseField::RiskLevel,
        CaseField::LastVisitDate,
        CaseField::InitialAssessment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseField::PatientName => "patient_name",
            CaseField::MedicalRecordNumber => "medical_record_number",
            CaseField::ManagementCategory => "management_category",
            CaseField::RiskLevel => "risk_level",
            CaseField::LastVisitDate => "last_visit_date",
            CaseField::InitialAssessment => "initial_assessment",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|f| f.as_str() == value)
    }
}

impl std::fmt::Display for CaseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
