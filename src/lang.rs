// Supported languages, month-name tables and the label set served by
// `/translations/{language}`.
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
    Ta,
    Te,
    Bn,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Hi,
        Language::Ta,
        Language::Te,
        Language::Bn,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Te => "te",
            Language::Bn => "bn",
        }
    }

    /// Name of the language in its own script, used by the language menu.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Ta => "தமிழ்",
            Language::Te => "తెలుగు",
            Language::Bn => "বাংলা",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim().to_ascii_lowercase();
        Language::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Like [`Language::from_code`], but any code outside the supported set
    /// resolves to English so labels and month names still render.
    pub fn resolve(code: &str) -> Language {
        match code.parse::<Language>() {
            Ok(lang) => lang,
            Err(e) => {
                warn!(error = %e, "falling back to English");
                Language::En
            }
        }
    }

    pub fn months(self) -> &'static [&'static str; 12] {
        match self {
            Language::En => &MONTHS_EN,
            Language::Hi => &MONTHS_HI,
            Language::Ta => &MONTHS_TA,
            Language::Te => &MONTHS_TE,
            Language::Bn => &MONTHS_BN,
        }
    }

    pub fn month_name(self, month: u32) -> Option<&'static str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.months().get(idx).copied()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language code {0:?} (expected one of en, hi, ta, te, bn)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];
const MONTHS_HI: [&str; 12] = [
    "जनवरी", "फ़रवरी", "मार्च", "अप्रैल", "मई", "जून", "जुलाई", "अगस्त", "सितंबर", "अक्टूबर",
    "नवंबर", "दिसंबर",
];
const MONTHS_TA: [&str; 12] = [
    "ஜனவரி", "பிப்ரவரி", "மார்ச்", "ஏப்ரல்", "மே", "ஜூன்", "ஜூலை", "ஆகஸ்ட்", "செப்டம்பர்",
    "அக்டோபர்", "நவம்பர்", "டிசம்பர்",
];
const MONTHS_TE: [&str; 12] = [
    "జనవరి", "ఫిబ్రవరి", "మార్చి", "ఏప్రిల్", "మే", "జూన్", "జూలై", "ఆగస్టు", "సెప్టెంబర్",
    "అక్టోబర్", "నవంబర్", "డిసెంబర్",
];
const MONTHS_BN: [&str; 12] = [
    "জানুয়ারি", "ফেব্রুয়ারি", "মার্চ", "এপ্রিল", "মে", "জুন", "জুলাই", "আগস্ট", "সেপ্টেম্বর",
    "অক্টোবর", "নভেম্বর", "ডিসেম্বর",
];

/// "Month YYYY", or "MM/YYYY" when the month number is out of range.
pub fn period_label(lang: Language, year: i32, month: u32) -> String {
    match lang.month_name(month) {
        Some(name) => format!("{} {}", name, year),
        None => format!("{:02}/{}", month, year),
    }
}

// English labels used until (or unless) the server answers.
static DEFAULT_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("app_title", "MGNREGA District Dashboard"),
        ("select_state", "Select Your State"),
        ("select_district", "Select Your District"),
        ("performance_summary", "Performance Summary"),
        ("active_workers", "Active Workers"),
        ("person_days", "Person Days Generated"),
        ("budget_utilization", "Budget Utilization"),
        ("works_completed", "Works Completed"),
        ("avg_wage", "Average Wage per Day"),
        ("women_participation", "Women Participation"),
        ("view_details", "View Details"),
        ("no_data", "No data available for this period"),
        ("completion_rate", "Work Completion Rate"),
        ("history", "Recent Months"),
        ("back", "Back to District Selection"),
        ("job_cards", "Job Cards (active / total)"),
        ("wage_expenditure", "Wage Expenditure"),
        ("material_expenditure", "Material Expenditure"),
        ("total_expenditure", "Total Expenditure"),
        ("budget_allocated", "Budget Allocated"),
        ("ongoing_works", "Ongoing Works"),
        ("days_per_household", "Average Days per Household"),
    ])
});

/// Localized UI strings keyed by label id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    language: Language,
    entries: HashMap<String, String>,
}

impl LabelSet {
    pub fn new(language: Language, entries: HashMap<String, String>) -> Self {
        Self { language, entries }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Served string, else the built-in English label, else the key itself.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.entries.get(key) {
            return v;
        }
        DEFAULT_LABELS.get(key).copied().unwrap_or(key)
    }
}
