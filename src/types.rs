use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::lang::Language;

/// One district-month snapshot as served by `/performance/{district_code}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PerformanceRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub state_code: String,
    pub state_name: String,
    #[serde(default)]
    pub district_code: String,
    pub district_name: String,
    pub year: i32,
    pub month: u32,

    pub total_job_cards: u64,
    pub active_job_cards: u64,
    pub total_workers: u64,
    pub active_workers: u64,
    pub person_days_generated: u64,
    pub average_days_per_household: f64,
    pub women_person_days: u64,
    pub sc_person_days: u64,
    #[serde(default)]
    pub st_person_days: u64,

    pub total_budget_allocated: f64,
    pub total_expenditure: f64,
    pub wage_expenditure: f64,
    pub material_expenditure: f64,
    pub average_wage_per_day: f64,

    pub total_works: u64,
    pub completed_works: u64,
    pub ongoing_works: u64,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PerformanceRecord {
    /// Sort key for newest-first ordering.
    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StateRef {
    pub state_code: String,
    pub state_name: String,
    #[serde(default)]
    pub state_name_hi: String,
}

impl StateRef {
    pub fn display_name(&self, lang: Language) -> &str {
        localized(&self.state_name, &self.state_name_hi, lang)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DistrictRef {
    pub district_code: String,
    pub district_name: String,
    #[serde(default)]
    pub district_name_hi: String,
    #[serde(default)]
    pub state_code: String,
    #[serde(default)]
    pub state_name: String,
}

impl DistrictRef {
    pub fn display_name(&self, lang: Language) -> &str {
        localized(&self.district_name, &self.district_name_hi, lang)
    }
}

// Only a Hindi form is served; every other language shows the English name.
fn localized<'a>(english: &'a str, hindi: &'a str, lang: Language) -> &'a str {
    if lang == Language::Hi && !hindi.is_empty() {
        hindi
    } else {
        english
    }
}

#[derive(Debug, Clone, Tabled)]
pub struct StatCardRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct StatCardChangeRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Change")]
    pub change: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct ProgressRow {
    #[tabled(rename = "Indicator")]
    pub indicator: String,
    #[tabled(rename = "Progress")]
    pub bar: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct DetailRow {
    #[tabled(rename = "Detail")]
    pub label: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "Workers")]
    pub workers: String,
    #[tabled(rename = "Person Days")]
    pub person_days: String,
    #[tabled(rename = "Budget Used")]
    pub budget_ratio: String,
}

/// Flat CSV row written by the history export.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryExportRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Period")]
    pub period: String,
    #[serde(rename = "ActiveWorkers")]
    pub active_workers: u64,
    #[serde(rename = "PersonDays")]
    pub person_days: u64,
    #[serde(rename = "AvgWagePerDay")]
    pub average_wage_per_day: f64,
    #[serde(rename = "TotalExpenditure")]
    pub total_expenditure: f64,
    #[serde(rename = "BudgetAllocated")]
    pub total_budget_allocated: f64,
    #[serde(rename = "BudgetRatio")]
    pub budget_ratio: f64,
}
