//! Input clean-up helpers applied before validation.

use crate::config::CUSTOM_CATEGORY_OPTION;
use crate::models::CaseForm;

/// Trim surrounding whitespace.
pub fn clean(value: &str) -> String {
    value.trim().to_string()
}

/// Length in characters, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Pick the effective category: the custom text when the custom option is selected.
pub fn resolve_category(selected: &str, custom: Option<&str>) -> String {
    let selected = selected.trim();
    if selected == CUSTOM_CATEGORY_OPTION {
        custom.map(clean).unwrap_or_default()
    } else {
        selected.to_string()
    }
}

/// Trimmed copy of a form with the category resolved.
pub fn sanitize_form(form: &CaseForm) -> CaseForm {
    CaseForm {
        patient_name: clean(&form.patient_name),
        medical_record_number: clean(&form.medical_record_number),
        management_category: resolve_category(
            &form.management_category,
            form.custom_category.as_deref(),
        ),
        custom_category: None,
        risk_level: clean(&form.risk_level),
        last_visit_date: clean(&form.last_visit_date),
        initial_assessment: clean(&form.initial_assessment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_len_counts_cjk_as_one() {
        assert_eq!(char_len("王小明"), 3);
        assert_eq!("王小明".len(), 9);
    }

    #[test]
    fn test_resolve_category() {
        assert_eq!(resolve_category("術後追蹤", Some("ignored")), "術後追蹤");
        assert_eq!(resolve_category("custom", Some("  安寧療護 ")), "安寧療護");
        assert_eq!(resolve_category("custom", None), "");
    }

    #[test]
    fn test_sanitize_form_trims_everything() {
        let form = CaseForm {
            patient_name: "  王小明 ".into(),
            medical_record_number: " A123456".into(),
            management_category: "custom".into(),
            custom_category: Some(" 營養諮詢 ".into()),
            risk_level: "high ".into(),
            last_visit_date: " 2026-01-01 ".into(),
            initial_assessment: "\t評估\n".into(),
        };
        let clean = sanitize_form(&form);
        assert_eq!(clean.patient_name, "王小明");
        assert_eq!(clean.medical_record_number, "A123456");
        assert_eq!(clean.management_category, "營養諮詢");
        assert_eq!(clean.custom_category, None);
        assert_eq!(clean.risk_level, "high");
        assert_eq!(clean.last_visit_date, "2026-01-01");
        assert_eq!(clean.initial_assessment, "評估");
    }
}
