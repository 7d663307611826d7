// Number formatting and percentage helpers.
//
// Everything here is pure so the screens can assume clean, display-ready
// strings.
use num_format::{CustomFormat, Grouping, Locale, ToFormattedString};
use once_cell::sync::Lazy;

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

// Indian digit grouping (12,34,567). Building a custom format can only fail
// on malformed separators, in which case plain `en` grouping is used.
static INDIAN: Lazy<Option<CustomFormat>> = Lazy::new(|| {
    CustomFormat::builder()
        .grouping(Grouping::Indian)
        .separator(",")
        .minus_sign("-")
        .build()
        .ok()
});

/// Locale-grouped integer (Indian grouping), e.g. `12,34,567`.
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    match INDIAN.as_ref() {
        Some(fmt) => n.to_formatted_string(fmt),
        None => n.to_formatted_string(&Locale::en),
    }
}

/// Abbreviate large magnitudes with Indian units.
///
/// - `>= 1,00,00,000` → `"X.XX Cr"`
/// - `>= 1,00,000` → `"X.XX L"`
/// - `>= 1,000` → `"X.XX K"`
/// - anything else → grouped integer
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    if n >= CRORE {
        format!("{:.2} Cr", n / CRORE)
    } else if n >= LAKH {
        format!("{:.2} L", n / LAKH)
    } else if n >= THOUSAND {
        format!("{:.2} K", n / THOUSAND)
    } else {
        format_int(n.round() as i64)
    }
}

/// Rupee-prefixed [`format_number`].
pub fn format_currency(n: f64) -> String {
    format!("₹{}", format_number(n))
}

/// Round to one decimal. Halves go away from zero (`f64::round`), so
/// `-0.25` becomes `-0.3` where a JS `toFixed(1)` would print `-0.2`.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// `numerator / denominator * 100`, rounded to one decimal. A zero (or
/// non-finite) result collapses to `0.0`.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let p = round1(numerator / denominator * 100.0);
    if p.is_finite() {
        p
    } else {
        0.0
    }
}

/// Period-over-period change in percent, rounded to one decimal with
/// [`round1`] (halves away from zero, symmetric for rises and falls).
///
/// `None` when there is nothing meaningful to compare against: a zero
/// previous value would divide by zero.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    let change = round1((current - previous) / previous * 100.0);
    // -0.0 prints as "-0.0"
    Some(if change == 0.0 { 0.0 } else { change })
}

/// Sign-aware change label: `"+5.2%"`, `"-3.1%"`, `"0.0%"`.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

pub fn format_percent(v: f64) -> String {
    format!("{:.1}%", v)
}

/// Fixed-width text progress bar for a 0..=100 value.
pub fn progress_bar(value: f64, width: usize) -> String {
    let clamped = if value.is_finite() { value.clamp(0.0, 100.0) } else { 0.0 };
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
