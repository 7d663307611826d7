//! District metrics screen.

use tracing::{debug, info, warn};

use crate::client::{ApiClient, DEFAULT_LIMIT};
use crate::error::Result;
use crate::lang::{LabelSet, Language};
use crate::metrics::{self, HistoryEntry, Summary, HISTORY_LEN};
use crate::notice::Notice;
use crate::session::{LanguageSetting, LanguageWatcher, RequestGeneration, Ticket};
use crate::types::PerformanceRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Empty,
}

#[derive(Debug)]
pub struct DashboardScreen {
    district_code: String,
    language: LanguageWatcher,
    labels: LabelSet,
    records: Vec<PerformanceRecord>,
    phase: Phase,
    details_open: bool,
    limit: usize,
    history_len: usize,
    notices: Vec<Notice>,
    label_requests: RequestGeneration,
    data_requests: RequestGeneration,
}

impl DashboardScreen {
    pub fn new(setting: &LanguageSetting, district_code: &str) -> Self {
        let language = setting.watch();
        let labels = LabelSet::new(language.current(), Default::default());
        Self {
            district_code: district_code.to_string(),
            language,
            labels,
            records: Vec::new(),
            phase: Phase::Loading,
            details_open: false,
            limit: DEFAULT_LIMIT,
            history_len: HISTORY_LEN,
            notices: Vec::new(),
            label_requests: RequestGeneration::new(),
            data_requests: RequestGeneration::new(),
        }
    }

    pub fn with_limits(mut self, fetch_limit: usize, history_len: usize) -> Self {
        self.limit = fetch_limit;
        self.history_len = history_len;
        self
    }

    pub fn district_code(&self) -> &str {
        &self.district_code
    }

    pub fn language(&self) -> Language {
        self.language.current()
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[PerformanceRecord] {
        &self.records
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Show or hide the secondary detail panel. Purely local.
    pub fn toggle_details(&mut self) -> bool {
        self.details_open = !self.details_open;
        self.details_open
    }

    /// Current/previous comparison, `None` unless loaded with data.
    pub fn summary(&self) -> Option<Summary<'_>> {
        match self.phase {
            Phase::Loaded => Summary::derive(&self.records),
            _ => None,
        }
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        metrics::history(&self.records, self.language.current(), self.history_len)
    }

    /// Load labels and the performance history concurrently.
    pub async fn mount(&mut self, client: &ApiClient) {
        let lang = self.language.current();
        let label_ticket = self.label_requests.begin();
        let data_ticket = self.begin_load();
        let (labels, records) = tokio::join!(
            client.translations(lang),
            client.performance(&self.district_code, self.limit)
        );
        self.apply_labels(label_ticket, labels);
        self.apply_records(data_ticket, records);
    }

    /// Switch to another district and reload its history.
    pub async fn change_district(&mut self, client: &ApiClient, district_code: &str) {
        info!(district = district_code, "district changed");
        self.district_code = district_code.to_string();
        let ticket = self.begin_load();
        let records = client.performance(district_code, self.limit).await;
        self.apply_records(ticket, records);
    }

    /// On a language change, re-fetch labels and history. Month names are
    /// derived at render time so they follow the new language immediately.
    pub async fn refresh_language(&mut self, client: &ApiClient) -> bool {
        let Some(lang) = self.language.take_change() else {
            return false;
        };
        let label_ticket = self.label_requests.begin();
        let data_ticket = self.begin_load();
        let (labels, records) = tokio::join!(
            client.translations(lang),
            client.performance(&self.district_code, self.limit)
        );
        self.apply_labels(label_ticket, labels);
        self.apply_records(data_ticket, records);
        true
    }

    /// Mark the screen as loading and take a ticket for the next
    /// performance response. Earlier tickets go stale.
    pub fn begin_load(&mut self) -> Ticket {
        self.phase = Phase::Loading;
        self.data_requests.begin()
    }

    /// Install a label response. Returns `false` if the ticket was stale.
    pub fn apply_labels(&mut self, ticket: Ticket, result: Result<LabelSet>) -> bool {
        if !self.label_requests.is_current(ticket) {
            debug!("dropping stale label response");
            return false;
        }
        match result {
            Ok(labels) => self.labels = labels,
            Err(e) => {
                warn!(error = %e, "failed to load translations");
                self.notices.push(Notice::LoadFailed {
                    what: "translations",
                    detail: e.to_string(),
                });
            }
        }
        true
    }

    /// Install a performance response unless a newer load superseded it.
    ///
    /// An empty list or a failed request both end in [`Phase::Empty`]; only
    /// the failure raises a notice.
    pub fn apply_records(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<PerformanceRecord>>,
    ) -> bool {
        if !self.data_requests.is_current(ticket) {
            debug!(district = %self.district_code, "dropping stale performance response");
            return false;
        }
        match result {
            Ok(mut records) => {
                if metrics::order_newest_first(&mut records) {
                    warn!(district = %self.district_code, "performance history was not newest-first; reordered");
                }
                debug!(district = %self.district_code, count = records.len(), "performance loaded");
                self.phase = if records.is_empty() {
                    Phase::Empty
                } else {
                    Phase::Loaded
                };
                self.records = records;
            }
            Err(e) => {
                warn!(district = %self.district_code, error = %e, "failed to load performance data");
                self.records.clear();
                self.phase = Phase::Empty;
                self.notices.push(Notice::LoadFailed {
                    what: "performance data",
                    detail: e.to_string(),
                });
            }
        }
        true
    }
}
