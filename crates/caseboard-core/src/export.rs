//! JSON and CSV export of a case view.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{calculate_statistics, is_pending_follow_up};
use crate::models::{Case, CaseStatistics};

/// Export metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Export timestamp
    pub exported_at: String,
    /// Date used for follow-up evaluation
    pub as_of: NaiveDate,
    /// Statistics over the exported cases
    pub statistics: CaseStatistics,
}

/// One exported row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedCase {
    #[serde(flatten)]
    pub case: Case,
    /// Overdue for follow-up as of the export date
    pub pending_follow_up: bool,
}

/// Snapshot of a list of cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseExport {
    pub metadata: ExportMetadata,
    pub cases: Vec<ExportedCase>,
}

impl CaseExport {
    /// Snapshot `cases` as of `today`.
    pub fn from_cases(cases: &[Case], today: NaiveDate, threshold_days: i64) -> Self {
        Self {
            metadata: ExportMetadata {
                exported_at: chrono::Utc::now().to_rfc3339(),
                as_of: today,
                statistics: calculate_statistics(cases, today, threshold_days),
            },
            cases: cases
                .iter()
                .map(|c| ExportedCase {
                    case: c.clone(),
                    pending_follow_up: is_pending_follow_up(c, today, threshold_days),
                })
                .collect(),
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("id,patient_name,medical_record_number,management_category,risk_level,last_visit_date,pending_follow_up,initial_assessment\n");

        for row in &self.cases {
            let case = &row.case;
            csv.push_str(&format!(
                "{},{},{},{},{},{},{},{}\n",
                case.id,
                escape_csv(&case.patient_name),
                escape_csv(&case.medical_record_number),
                escape_csv(&case.management_category),
                case.risk_level,
                case.last_visit_date.format("%Y-%m-%d"),
                row.pending_follow_up,
                escape_csv(&case.initial_assessment),
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
