//! Sample cases loaded at start-up.

use chrono::NaiveDate;

use super::case::{Case, RiskLevel};

struct SeedRow {
    name: &'static str,
    record: &'static str,
    category: &'static str,
    risk: RiskLevel,
    date: (i32, u32, u32),
    assessment: &'static str,
}

const SEED_ROWS: [SeedRow; 6] = [
    SeedRow {
        name: "王小明",
        record: "A123456",
        category: "慢性病管理",
        risk: RiskLevel::High,
        date: (2025, 12, 20),
        assessment: "糖尿病合併高血壓，血糖控制不穩定，需密切追蹤。",
    },
    SeedRow {
        name: "李美華",
        record: "B234567",
        category: "術後追蹤",
        risk: RiskLevel::Medium,
        date: (2026, 1, 2),
        assessment: "膝關節置換術後兩週，傷口癒合良好。",
    },
    SeedRow {
        name: "陳大同",
        record: "C345678",
        category: "長期照護",
        risk: RiskLevel::High,
        date: (2025, 12, 29),
        assessment: "中風後遺症，行動不便，有跌倒風險。",
    },
    SeedRow {
        name: "林淑芬",
        record: "D456789",
        category: "慢性病管理",
        risk: RiskLevel::Low,
        date: (2025, 12, 28),
        assessment: "高血脂，規律服藥，指數穩定。",
    },
    SeedRow {
        name: "張志明",
        record: "E567890",
        category: "復健治療",
        risk: RiskLevel::Medium,
        date: (2026, 1, 5),
        assessment: "腰椎間盤突出，持續物理治療中。",
    },
    SeedRow {
        name: "黃雅婷",
        record: "F678901",
        category: "居家護理",
        risk: RiskLevel::Low,
        date: (2025, 11, 30),
        assessment: "產後居家訪視，母嬰狀況良好。",
    },
];

/// The six sample cases, ids 1 through 6.
pub fn sample_cases() -> Vec<Case> {
    SEED_ROWS
        .iter()
        .zip(1..)
        .filter_map(|(row, id)| {
            let (y, m, d) = row.date;
            let last_visit_date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Case {
                id,
                patient_name: row.name.to_string(),
                medical_record_number: row.record.to_string(),
                management_category: row.category.to_string(),
                risk_level: row.risk,
                last_visit_date,
                initial_assessment: row.assessment.to_string(),
            })
        })
        .collect()
}
