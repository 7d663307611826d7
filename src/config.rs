// Runtime configuration assembled from CLI flags and the environment.
use std::path::PathBuf;
use tracing::debug;

use crate::client::{ApiClient, DEFAULT_LIMIT};
use crate::error::{Error, Result};
use crate::lang::Language;
use crate::metrics::HISTORY_LEN;

/// Backend root baked in at build time, overridable at run time.
pub const DEFAULT_API_URL: &str = match option_env!("NREGA_API_URL") {
    Some(url) => url,
    None => "http://localhost:8000/api",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub language: Language,
    /// Records requested per district.
    pub fetch_limit: usize,
    /// Records shown in the history list.
    pub history_len: usize,
    /// Where the interactive export writes its CSV and JSON files.
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            language: Language::En,
            fetch_limit: DEFAULT_LIMIT,
            history_len: HISTORY_LEN,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Validate the base URL and resolve the language code. An unsupported
    /// code is not an error: it falls back to English with a warning.
    pub fn new(api_url: Option<String>, language_code: &str) -> Result<Self> {
        let api_url = api_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(Error::InvalidBaseUrl(api_url));
        }
        let config = Self {
            api_url,
            language: Language::resolve(language_code),
            ..Self::default()
        };
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_url)
    }
}
