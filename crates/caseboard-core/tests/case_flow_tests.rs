//! End-to-end tests over the seeded case board.

use caseboard_core::analytics::{calculate_statistics, filter_cases, sort_cases_by_key};
use caseboard_core::models::sample_cases;
use caseboard_core::{
    AppState, CaseBoard, CaseBoardError, CaseConfig, CaseData, CaseField, CaseForm, DataManager,
    FixedClock, RiskLevel, SortDirection, SortField, Validator,
};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
}

fn seeded_board() -> CaseBoard {
    CaseBoard::new(CaseConfig::default(), Box::new(FixedClock(today()))).unwrap()
}

fn make_data(record: &str, risk: RiskLevel) -> CaseData {
    CaseData {
        patient_name: "測試".to_string(),
        medical_record_number: record.to_string(),
        management_category: "長期照護".to_string(),
        risk_level: risk,
        last_visit_date: None,
        initial_assessment: "初評".to_string(),
    }
}

#[test]
fn test_record_number_exists_after_add() {
    let mut state = AppState::seeded();
    let clock = FixedClock(today());
    let mut dm = DataManager::new(&mut state, &clock);

    assert!(!dm.medical_record_number_exists("Q1W2E3", None));
    dm.add_case(make_data("Q1W2E3", RiskLevel::Low));
    assert!(dm.medical_record_number_exists("Q1W2E3", None));
}

#[test]
fn test_delete_fresh_case_once() {
    let mut state = AppState::seeded();
    let clock = FixedClock(today());
    let mut dm = DataManager::new(&mut state, &clock);

    let case = dm.add_case(make_data("Z1", RiskLevel::Medium));
    assert!(dm.delete_case(case.id));
    assert!(!dm.delete_case(case.id));
    assert_eq!(state.case_list().len(), 6);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let mut state = AppState::seeded();
    let before = state.case_list().to_vec();
    let clock = FixedClock(today());
    let mut dm = DataManager::new(&mut state, &clock);

    assert!(dm.update_case(1000, make_data("Z2", RiskLevel::Low)).is_none());
    assert_eq!(state.case_list(), before.as_slice());
}

#[test]
fn test_seed_filter_by_record_number() {
    let cases = sample_cases();
    let result = filter_cases(&cases, "A123456", None);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
    assert_eq!(result[0].patient_name, "王小明");
}

#[test]
fn test_seed_statistics() {
    let stats = calculate_statistics(&sample_cases(), today(), 7);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.high_risk, 2);
    // ids 1 (16 days), 4 (8 days), 6 (36 days); id 3 is exactly 7 days
    assert_eq!(stats.pending_follow_up, 3);

    let high: Vec<_> = filter_cases(&sample_cases(), "", Some(RiskLevel::High))
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(high, vec![1, 3]);
}

#[test]
fn test_sort_risk_desc_keeps_tie_order() {
    let sorted = sort_cases_by_key(&sample_cases(), "risk", SortDirection::Desc);
    let ids: Vec<_> = sorted.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3, 2, 5, 4, 6]);
}

#[test]
fn test_record_number_format_short_circuits_uniqueness() {
    let config = CaseConfig::default();
    let validator = Validator::new(&config);
    let mut calls = 0;

    let result = validator.validate_medical_record_number("A1 2", |_| {
        calls += 1;
        true
    });

    assert!(!result.valid);
    assert_eq!(calls, 0);
}

#[test]
fn test_full_form_lifecycle() {
    let mut board = seeded_board();

    let form = CaseForm {
        patient_name: " 蔡依林 ".to_string(),
        medical_record_number: "G765432".to_string(),
        management_category: "術後追蹤".to_string(),
        custom_category: None,
        risk_level: "low".to_string(),
        last_visit_date: "2025-12-25".to_string(),
        initial_assessment: "闌尾切除術後".to_string(),
    };
    let created = board.submit(&form).unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(created.patient_name, "蔡依林");
    assert_eq!(board.statistics().pending_follow_up, 4);

    let mut edit = board.begin_edit(created.id).unwrap();
    edit.last_visit_date = "2026-01-04".to_string();
    edit.risk_level = "high".to_string();
    let updated = board.submit(&edit).unwrap();
    assert_eq!(updated.id, created.id);

    let stats = board.statistics();
    assert_eq!(stats.total, 7);
    assert_eq!(stats.high_risk, 3);
    assert_eq!(stats.pending_follow_up, 3);

    board.delete_case(created.id).unwrap();
    assert!(matches!(
        board.delete_case(created.id),
        Err(CaseBoardError::NotFound(_))
    ));

    // Ids are never reused
    let again = board.submit(&CaseForm {
        medical_record_number: "G765433".to_string(),
        ..form
    });
    assert_eq!(again.unwrap().id, 8);
}

#[test]
fn test_rejected_submission_reports_every_field() {
    let mut board = seeded_board();
    let form = CaseForm {
        risk_level: "urgent".to_string(),
        last_visit_date: "2026-02-30".to_string(),
        ..CaseForm::default()
    };

    match board.submit(&form) {
        Err(CaseBoardError::Validation(errors)) => {
            assert_eq!(errors.fields(), CaseField::ORDER.to_vec());
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(board.cases().len(), 6);
}

#[test]
fn test_visible_cases_with_sort_and_search() {
    let mut board = seeded_board();
    board.set_sort(SortField::RecordNumber, SortDirection::Desc);
    let ids: Vec<_> = board.visible_cases().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);

    board.set_search_keyword("B2");
    let ids: Vec<_> = board.visible_cases().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![2]);
}
