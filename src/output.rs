use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::dashboard::{DashboardScreen, Phase};
use crate::error::Result;
use crate::lang::{period_label, LabelSet, Language};
use crate::metrics::{HeadlineStat, Ratio, Summary};
use crate::selector::SelectorScreen;
use crate::types::{
    DetailRow, HistoryExportRow, HistoryRow, PerformanceRecord, ProgressRow, StatCardChangeRow,
    StatCardRow,
};
use crate::util::{
    format_change, format_currency, format_int, format_number, format_percent, percent,
    progress_bar,
};

const BAR_WIDTH: usize = 20;

/// Serialize `rows` to a CSV file with a header row.
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

fn table_rows<T>(rows: Vec<T>) -> String
where
    T: Tabled,
{
    if rows.is_empty() {
        return "(no rows)\n".to_string();
    }
    format!("{}\n", Table::new(rows).with(Style::markdown()))
}

/// Numbered list of states in the screen's language.
pub fn render_states(screen: &SelectorScreen) -> String {
    let lang = screen.language();
    let mut out = format!("{}\n", screen.labels().get("select_state"));
    for (i, s) in screen.states().iter().enumerate() {
        let _ = writeln!(out, "[{}] {} ({})", i + 1, s.display_name(lang), s.state_code);
    }
    if screen.states().is_empty() {
        out.push_str("(no states)\n");
    }
    out
}

/// Numbered district list for the selected state.
pub fn render_districts(screen: &SelectorScreen) -> String {
    let lang = screen.language();
    let mut out = format!("{}\n", screen.labels().get("select_district"));
    for (i, d) in screen.districts().iter().enumerate() {
        let _ = writeln!(out, "[{}] {} ({})", i + 1, d.display_name(lang), d.district_code);
    }
    if screen.districts().is_empty() {
        out.push_str("(no districts)\n");
    }
    out
}

fn headline_value(stat: &HeadlineStat) -> String {
    if stat.metric.is_currency() {
        format_currency(stat.value)
    } else {
        format_number(stat.value)
    }
}

fn stat_cards(summary: &Summary<'_>, labels: &LabelSet) -> String {
    // The change column exists only when there is a previous period; a
    // single record shows no indicator at all rather than "0%".
    if summary.has_comparison() {
        let rows: Vec<StatCardChangeRow> = summary
            .headlines
            .iter()
            .map(|h| StatCardChangeRow {
                metric: labels.get(h.metric.label_key()).to_string(),
                value: headline_value(h),
                change: h.change.map(format_change).unwrap_or_default(),
            })
            .collect();
        table_rows(rows)
    } else {
        let rows: Vec<StatCardRow> = summary
            .headlines
            .iter()
            .map(|h| StatCardRow {
                metric: labels.get(h.metric.label_key()).to_string(),
                value: headline_value(h),
            })
            .collect();
        table_rows(rows)
    }
}

fn progress(ratios: &[Ratio], labels: &LabelSet) -> String {
    let rows: Vec<ProgressRow> = ratios
        .iter()
        .map(|r| ProgressRow {
            indicator: labels.get(r.kind.label_key()).to_string(),
            bar: progress_bar(r.value, BAR_WIDTH),
            value: format_percent(r.value),
            status: format!("{} ({})", r.tier.label(), r.tier.color()),
        })
        .collect();
    table_rows(rows)
}

fn details(summary: &Summary<'_>, labels: &LabelSet) -> String {
    let c = summary.current;
    let rows = vec![
        DetailRow {
            label: labels.get("job_cards").to_string(),
            value: format!(
                "{} / {}",
                format_int(c.active_job_cards),
                format_int(c.total_job_cards)
            ),
        },
        DetailRow {
            label: labels.get("budget_allocated").to_string(),
            value: format_currency(c.total_budget_allocated),
        },
        DetailRow {
            label: labels.get("total_expenditure").to_string(),
            value: format_currency(c.total_expenditure),
        },
        DetailRow {
            label: labels.get("wage_expenditure").to_string(),
            value: format_currency(c.wage_expenditure),
        },
        DetailRow {
            label: labels.get("material_expenditure").to_string(),
            value: format_currency(c.material_expenditure),
        },
        DetailRow {
            label: labels.get("ongoing_works").to_string(),
            value: format_int(c.ongoing_works),
        },
        DetailRow {
            label: labels.get("days_per_household").to_string(),
            value: format!("{:.1}", c.average_days_per_household),
        },
    ];
    table_rows(rows)
}

fn history(screen: &DashboardScreen) -> String {
    let rows: Vec<HistoryRow> = screen
        .history()
        .into_iter()
        .map(|h| HistoryRow {
            period: h.label,
            workers: format_number(h.active_workers as f64),
            person_days: format_number(h.person_days as f64),
            budget_ratio: format_percent(h.budget_ratio),
        })
        .collect();
    table_rows(rows)
}

/// Full text rendering of the metrics screen in its current phase.
pub fn render_dashboard(screen: &DashboardScreen) -> String {
    let labels = screen.labels();
    let mut out = format!("{}\n\n", labels.get("app_title"));
    match screen.phase() {
        Phase::Loading => out.push_str("Loading...\n"),
        Phase::Empty => {
            let _ = writeln!(out, "{}", labels.get("no_data"));
            let _ = writeln!(out, "[B] {}", labels.get("back"));
        }
        Phase::Loaded => {
            let Some(summary) = screen.summary() else {
                return out;
            };
            let c = summary.current;
            let _ = writeln!(out, "{}, {}", c.district_name, c.state_name);
            let _ = writeln!(
                out,
                "{}: {}\n",
                labels.get("performance_summary"),
                period_label(screen.language(), c.year, c.month)
            );
            out.push_str(&stat_cards(&summary, labels));
            out.push('\n');
            out.push_str(&progress(&summary.ratios, labels));
            if screen.details_open() {
                let _ = writeln!(out, "\n{}", labels.get("view_details"));
                out.push_str(&details(&summary, labels));
            }
            let _ = writeln!(out, "\n{}", labels.get("history"));
            out.push_str(&history(screen));
        }
    }
    out
}

/// Headline snapshot written to `summary_{district}.json`.
#[derive(Debug, Serialize)]
pub struct ExportSummary<'a> {
    pub district_code: &'a str,
    pub district_name: &'a str,
    pub state_name: &'a str,
    pub year: i32,
    pub month: u32,
    pub language: &'static str,
    pub ratios: &'a [Ratio],
    pub headlines: &'a [HeadlineStat],
}

/// Written files, in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub history_csv: PathBuf,
    pub summary_json: PathBuf,
}

/// One CSV row per loaded month, with the period label in `lang`.
pub fn history_export_rows(records: &[PerformanceRecord], lang: Language) -> Vec<HistoryExportRow> {
    records
        .iter()
        .map(|r| HistoryExportRow {
            year: r.year,
            month: r.month,
            period: period_label(lang, r.year, r.month),
            active_workers: r.active_workers,
            person_days: r.person_days_generated,
            average_wage_per_day: r.average_wage_per_day,
            total_expenditure: r.total_expenditure,
            total_budget_allocated: r.total_budget_allocated,
            budget_ratio: percent(r.total_expenditure, r.total_budget_allocated),
        })
        .collect()
}

/// Write `history_{district}.csv` and `summary_{district}.json` into `dir`.
/// Returns `None` when there is nothing loaded to export.
pub fn export_dashboard(screen: &DashboardScreen, dir: &Path) -> Result<Option<ExportPaths>> {
    let Some(summary) = screen.summary() else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir)?;
    let code = screen.district_code();
    let history_csv = dir.join(format!("history_{}.csv", code));
    let summary_json = dir.join(format!("summary_{}.json", code));

    write_csv(&history_csv, &history_export_rows(screen.records(), screen.language()))?;
    let c = summary.current;
    write_json(
        &summary_json,
        &ExportSummary {
            district_code: code,
            district_name: &c.district_name,
            state_name: &c.state_name,
            year: c.year,
            month: c.month,
            language: screen.language().code(),
            ratios: &summary.ratios,
            headlines: &summary.headlines,
        },
    )?;
    Ok(Some(ExportPaths {
        history_csv,
        summary_json,
    }))
}
