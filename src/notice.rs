use std::fmt;

/// Transient, user-facing message. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A fetch failed; `what` names the data that could not be loaded.
    LoadFailed { what: &'static str, detail: String },
    /// Confirmation attempted with no district chosen. Blocks navigation.
    NoDistrictSelected,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LoadFailed { what, .. } => write!(f, "Failed to load {}", what),
            Notice::NoDistrictSelected => f.write_str("Please select a district"),
        }
    }
}
