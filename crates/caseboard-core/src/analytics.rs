//! Filtering, statistics and sorting over a case collection.
//!
//! Everything here is a pure function of its arguments: inputs are borrowed,
//! never mutated, and results are fresh vectors.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{Case, CaseStatistics, RiskLevel, SortDirection, SortField};

/// Keep cases matching the keyword and the risk filter.
///
/// The keyword is a case-sensitive substring of the patient name or the
/// medical record number. An empty keyword or `None` filter is a no-op; the
/// two compose with AND.
pub fn filter_cases(cases: &[Case], keyword: &str, risk_filter: Option<RiskLevel>) -> Vec<Case> {
    cases
        .iter()
        .filter(|c| {
            keyword.is_empty()
                || c.patient_name.contains(keyword)
                || c.medical_record_number.contains(keyword)
        })
        .filter(|c| risk_filter.map_or(true, |level| c.risk_level == level))
        .cloned()
        .collect()
}

/// Whether a case is overdue for follow-up.
///
/// Pending when the whole days from the last visit to `today` are strictly
/// greater than `threshold_days`. Future visits are never pending.
pub fn is_pending_follow_up(case: &Case, today: NaiveDate, threshold_days: i64) -> bool {
    case.days_since_last_visit(today) > threshold_days
}

/// Total, high-risk and pending follow-up counts.
pub fn calculate_statistics(cases: &[Case], today: NaiveDate, threshold_days: i64) -> CaseStatistics {
    CaseStatistics {
        total: cases.len(),
        high_risk: cases
            .iter()
            .filter(|c| c.risk_level == RiskLevel::High)
            .count(),
        pending_follow_up: cases
            .iter()
            .filter(|c| is_pending_follow_up(c, today, threshold_days))
            .count(),
    }
}

/// Stable sort by one column.
pub fn sort_cases(cases: &[Case], field: SortField, direction: SortDirection) -> Vec<Case> {
    let mut sorted = cases.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_by(a, b, field);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Sort by a column key (`name`, `id`, `category`, `risk`, `date`).
///
/// An unknown key returns the input order unchanged.
pub fn sort_cases_by_key(cases: &[Case], key: &str, direction: SortDirection) -> Vec<Case> {
    match SortField::from_key(key) {
        Some(field) => sort_cases(cases, field, direction),
        None => cases.to_vec(),
    }
}

fn compare_by(a: &Case, b: &Case, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.patient_name.cmp(&b.patient_name),
        SortField::RecordNumber => a.medical_record_number.cmp(&b.medical_record_number),
        SortField::Category => a.management_category.cmp(&b.management_category),
        SortField::Risk => a.risk_level.severity().cmp(&b.risk_level.severity()),
        SortField::Date => a.last_visit_date.cmp(&b.last_visit_date),
    }
}
