//! Derived dashboard figures: ratio tiers, period-over-period changes and
//! the bounded history list.
//!
//! Everything here is a pure function of the fetched records so it can be
//! recomputed on every render (for instance after a language change) at no
//! network cost.

use serde::Serialize;

use crate::lang::{period_label, Language};
use crate::types::PerformanceRecord;
use crate::util::{percent, percent_change};

/// Number of history entries shown under the stat cards.
pub const HISTORY_LEN: usize = 6;

/// Qualitative bucket for a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Good,
    Fair,
    NeedsImprovement,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Good => "Good",
            Tier::Fair => "Fair",
            Tier::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Good => "green",
            Tier::Fair => "yellow",
            Tier::NeedsImprovement => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub good: f64,
    pub fair: f64,
}

pub const BUDGET_UTILIZATION: Thresholds = Thresholds { good: 80.0, fair: 60.0 };
pub const COMPLETION_RATE: Thresholds = Thresholds { good: 75.0, fair: 50.0 };
pub const WOMEN_PARTICIPATION: Thresholds = Thresholds { good: 45.0, fair: 33.0 };

pub fn tier_for(value: f64, thresholds: Thresholds) -> Tier {
    if value >= thresholds.good {
        Tier::Good
    } else if value >= thresholds.fair {
        Tier::Fair
    } else {
        Tier::NeedsImprovement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    BudgetUtilization,
    CompletionRate,
    WomenParticipation,
}

impl RatioKind {
    pub const ALL: [RatioKind; 3] = [
        RatioKind::BudgetUtilization,
        RatioKind::CompletionRate,
        RatioKind::WomenParticipation,
    ];

    pub fn thresholds(self) -> Thresholds {
        match self {
            RatioKind::BudgetUtilization => BUDGET_UTILIZATION,
            RatioKind::CompletionRate => COMPLETION_RATE,
            RatioKind::WomenParticipation => WOMEN_PARTICIPATION,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            RatioKind::BudgetUtilization => "budget_utilization",
            RatioKind::CompletionRate => "completion_rate",
            RatioKind::WomenParticipation => "women_participation",
        }
    }

    fn compute(self, r: &PerformanceRecord) -> f64 {
        match self {
            RatioKind::BudgetUtilization => percent(r.total_expenditure, r.total_budget_allocated),
            RatioKind::CompletionRate => percent(r.completed_works as f64, r.total_works as f64),
            RatioKind::WomenParticipation => {
                percent(r.women_person_days as f64, r.person_days_generated as f64)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ratio {
    pub kind: RatioKind,
    /// Percentage, one decimal.
    pub value: f64,
    pub tier: Tier,
}

impl Ratio {
    pub fn of(kind: RatioKind, record: &PerformanceRecord) -> Self {
        let value = kind.compute(record);
        Ratio {
            kind,
            value,
            tier: tier_for(value, kind.thresholds()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Headline {
    ActiveWorkers,
    PersonDays,
    AverageWage,
    CompletedWorks,
}

impl Headline {
    pub const ALL: [Headline; 4] = [
        Headline::ActiveWorkers,
        Headline::PersonDays,
        Headline::AverageWage,
        Headline::CompletedWorks,
    ];

    pub fn label_key(self) -> &'static str {
        match self {
            Headline::ActiveWorkers => "active_workers",
            Headline::PersonDays => "person_days",
            Headline::AverageWage => "avg_wage",
            Headline::CompletedWorks => "works_completed",
        }
    }

    pub fn value(self, r: &PerformanceRecord) -> f64 {
        match self {
            Headline::ActiveWorkers => r.active_workers as f64,
            Headline::PersonDays => r.person_days_generated as f64,
            Headline::AverageWage => r.average_wage_per_day,
            Headline::CompletedWorks => r.completed_works as f64,
        }
    }

    pub fn is_currency(self) -> bool {
        matches!(self, Headline::AverageWage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineStat {
    pub metric: Headline,
    pub value: f64,
    /// Absent without a previous period or when the previous value is zero.
    pub change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub active_workers: u64,
    pub person_days: u64,
    pub budget_ratio: f64,
}

/// Everything the metrics screen renders for a non-empty record list.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary<'a> {
    pub current: &'a PerformanceRecord,
    pub previous: Option<&'a PerformanceRecord>,
    pub headlines: Vec<HeadlineStat>,
    pub ratios: Vec<Ratio>,
}

impl<'a> Summary<'a> {
    /// `None` for an empty list; element 0 is the current period.
    pub fn derive(records: &'a [PerformanceRecord]) -> Option<Self> {
        let current = records.first()?;
        let previous = records.get(1);
        let headlines = Headline::ALL
            .into_iter()
            .map(|metric| HeadlineStat {
                metric,
                value: metric.value(current),
                change: previous
                    .and_then(|p| percent_change(metric.value(current), metric.value(p))),
            })
            .collect();
        let ratios = RatioKind::ALL
            .into_iter()
            .map(|kind| Ratio::of(kind, current))
            .collect();
        Some(Summary {
            current,
            previous,
            headlines,
            ratios,
        })
    }

    pub fn has_comparison(&self) -> bool {
        self.previous.is_some()
    }
}

pub fn history(records: &[PerformanceRecord], lang: Language, limit: usize) -> Vec<HistoryEntry> {
    records
        .iter()
        .take(limit)
        .map(|r| HistoryEntry {
            year: r.year,
            month: r.month,
            label: period_label(lang, r.year, r.month),
            active_workers: r.active_workers,
            person_days: r.person_days_generated,
            budget_ratio: percent(r.total_expenditure, r.total_budget_allocated),
        })
        .collect()
}

/// Put records newest-first. Returns `true` if the input was not already
/// in that order.
pub fn order_newest_first(records: &mut [PerformanceRecord]) -> bool {
    let sorted = records.windows(2).all(|w| w[0].period() >= w[1].period());
    if !sorted {
        records.sort_by(|a, b| b.period().cmp(&a.period()));
    }
    !sorted
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(year: i32, month: u32) -> PerformanceRecord {
        PerformanceRecord {
            id: format!("{}-{}", year, month),
            state_code: "RJ".into(),
            state_name: "Rajasthan".into(),
            district_code: "RJ001".into(),
            district_name: "Jaipur".into(),
            year,
            month,
            total_job_cards: 120_000,
            active_job_cards: 80_000,
            total_workers: 150_000,
            active_workers: 50_000,
            person_days_generated: 1_000_000,
            average_days_per_household: 42.5,
            women_person_days: 500_000,
            sc_person_days: 200_000,
            st_person_days: 100_000,
            total_budget_allocated: 100_000_000.0,
            total_expenditure: 85_000_000.0,
            wage_expenditure: 60_000_000.0,
            material_expenditure: 25_000_000.0,
            average_wage_per_day: 250.0,
            total_works: 1_000,
            completed_works: 800,
            ongoing_works: 200,
            updated_at: None,
        }
    }

    #[test]
    fn budget_tiers() {
        assert_eq!(tier_for(80.0, BUDGET_UTILIZATION), Tier::Good);
        assert_eq!(tier_for(79.9, BUDGET_UTILIZATION), Tier::Fair);
        assert_eq!(tier_for(60.0, BUDGET_UTILIZATION), Tier::Fair);
        assert_eq!(tier_for(59.9, BUDGET_UTILIZATION), Tier::NeedsImprovement);
    }

    #[test]
    fn completion_and_women_tiers_use_their_own_thresholds() {
        assert_eq!(tier_for(75.0, COMPLETION_RATE), Tier::Good);
        assert_eq!(tier_for(50.0, COMPLETION_RATE), Tier::Fair);
        assert_eq!(tier_for(49.9, COMPLETION_RATE), Tier::NeedsImprovement);
        assert_eq!(tier_for(45.0, WOMEN_PARTICIPATION), Tier::Good);
        assert_eq!(tier_for(33.0, WOMEN_PARTICIPATION), Tier::Fair);
        assert_eq!(tier_for(32.9, WOMEN_PARTICIPATION), Tier::NeedsImprovement);
    }

    #[test]
    fn tier_labels_and_colors_pair_up() {
        assert_eq!((Tier::Good.label(), Tier::Good.color()), ("Good", "green"));
        assert_eq!((Tier::Fair.label(), Tier::Fair.color()), ("Fair", "yellow"));
        assert_eq!(
            (Tier::NeedsImprovement.label(), Tier::NeedsImprovement.color()),
            ("Needs Improvement", "red")
        );
    }

    #[test]
    fn ratios_round_to_one_decimal() {
        let mut r = record(2024, 6);
        r.total_expenditure = 2.0;
        r.total_budget_allocated = 3.0;
        let ratio = Ratio::of(RatioKind::BudgetUtilization, &r);
        assert_eq!(ratio.value, 66.7);
        assert_eq!(ratio.tier, Tier::Fair);
    }

    #[test]
    fn zero_denominators_yield_zero() {
        let mut r = record(2024, 6);
        r.total_works = 0;
        r.completed_works = 0;
        r.person_days_generated = 0;
        r.total_budget_allocated = 0.0;
        for kind in RatioKind::ALL {
            let ratio = Ratio::of(kind, &r);
            assert_eq!(ratio.value, 0.0);
            assert_eq!(ratio.tier, Tier::NeedsImprovement);
        }
    }

    #[test]
    fn empty_list_has_no_summary() {
        assert!(Summary::derive(&[]).is_none());
    }

    #[test]
    fn single_record_has_no_changes() {
        let records = vec![record(2024, 6)];
        let s = Summary::derive(&records).unwrap();
        assert!(!s.has_comparison());
        assert!(s.headlines.iter().all(|h| h.change.is_none()));
    }

    #[test]
    fn two_records_produce_changes() {
        let mut prev = record(2024, 5);
        prev.active_workers = 40_000;
        prev.person_days_generated = 1_250_000;
        prev.average_wage_per_day = 240.0;
        prev.completed_works = 0;
        let records = vec![record(2024, 6), prev];
        let s = Summary::derive(&records).unwrap();
        let change = |m: Headline| s.headlines.iter().find(|h| h.metric == m).unwrap().change;
        assert_eq!(change(Headline::ActiveWorkers), Some(25.0));
        assert_eq!(change(Headline::PersonDays), Some(-20.0));
        assert_eq!(change(Headline::AverageWage), Some(4.2));
        // previous zero: skipped, not rendered as 0
        assert_eq!(change(Headline::CompletedWorks), None);
    }

    #[test]
    fn summary_ratios_reflect_current_record() {
        let records = vec![record(2024, 6)];
        let s = Summary::derive(&records).unwrap();
        let kinds: Vec<_> = s.ratios.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, RatioKind::ALL.to_vec());
        assert_eq!(s.ratios[0].value, 85.0);
        assert_eq!(s.ratios[1].tier, Tier::Good);
        assert_eq!(s.ratios[2].value, 50.0);
    }

    #[test]
    fn history_is_bounded_and_localized() {
        let records: Vec<_> = (1..=12).rev().map(|m| record(2024, m)).collect();
        let entries = history(&records, Language::Hi, HISTORY_LEN);
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].label, "दिसंबर 2024");
        assert_eq!(entries[5].label, "जुलाई 2024");
        assert_eq!(entries[0].budget_ratio, 85.0);
    }

    #[test]
    fn reorders_when_server_order_is_wrong() {
        let mut records = vec![record(2023, 12), record(2024, 2), record(2024, 1)];
        assert!(order_newest_first(&mut records));
        let periods: Vec<_> = records.iter().map(|r| r.period()).collect();
        assert_eq!(periods, vec![(2024, 2), (2024, 1), (2023, 12)]);
        assert!(!order_newest_first(&mut records));
    }
}
