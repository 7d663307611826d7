//! State-and-district selection screen.

use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::Result;
use crate::lang::{LabelSet, Language};
use crate::notice::Notice;
use crate::session::{LanguageSetting, LanguageWatcher, RequestGeneration, Route, Ticket};
use crate::types::{DistrictRef, StateRef};

#[derive(Debug)]
pub struct SelectorScreen {
    language: LanguageWatcher,
    labels: LabelSet,
    states: Vec<StateRef>,
    districts: Vec<DistrictRef>,
    selected_state: Option<String>,
    selected_district: Option<String>,
    notices: Vec<Notice>,
    label_requests: RequestGeneration,
    state_requests: RequestGeneration,
    district_requests: RequestGeneration,
}

impl SelectorScreen {
    pub fn new(setting: &LanguageSetting) -> Self {
        let language = setting.watch();
        let labels = LabelSet::new(language.current(), Default::default());
        Self {
            language,
            labels,
            states: Vec::new(),
            districts: Vec::new(),
            selected_state: None,
            selected_district: None,
            notices: Vec::new(),
            label_requests: RequestGeneration::new(),
            state_requests: RequestGeneration::new(),
            district_requests: RequestGeneration::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language.current()
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn states(&self) -> &[StateRef] {
        &self.states
    }

    pub fn districts(&self) -> &[DistrictRef] {
        &self.districts
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    pub fn selected_district(&self) -> Option<&str> {
        self.selected_district.as_deref()
    }

    /// Drain pending notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Initial load: labels and the state list, fetched concurrently.
    pub async fn mount(&mut self, client: &ApiClient) {
        let lang = self.language.current();
        let label_ticket = self.label_requests.begin();
        let state_ticket = self.state_requests.begin();
        let (labels, states) = tokio::join!(client.translations(lang), client.states());
        self.apply_labels(label_ticket, labels);
        self.apply_states(state_ticket, states);
    }

    /// Re-fetch labels if the shared language changed since the last look.
    /// Returns `true` when a change was picked up.
    pub async fn refresh_language(&mut self, client: &ApiClient) -> bool {
        let Some(lang) = self.language.take_change() else {
            return false;
        };
        let ticket = self.label_requests.begin();
        let labels = client.translations(lang).await;
        self.apply_labels(ticket, labels);
        true
    }

    /// Choose a state: clears the district choice and loads its districts.
    pub async fn select_state(&mut self, client: &ApiClient, state_code: &str) {
        let ticket = self.begin_state_selection(state_code);
        let districts = client.districts(state_code).await;
        self.apply_districts(ticket, districts);
    }

    /// Synchronous half of [`SelectorScreen::select_state`]: records the
    /// state, clears districts and takes a ticket for the district list.
    pub fn begin_state_selection(&mut self, state_code: &str) -> Ticket {
        info!(state = state_code, "state selected");
        self.selected_state = Some(state_code.to_string());
        self.selected_district = None;
        self.districts.clear();
        self.district_requests.begin()
    }

    /// Returns `false` if the code is not in the loaded district list.
    pub fn select_district(&mut self, district_code: &str) -> bool {
        if self.districts.iter().any(|d| d.district_code == district_code) {
            self.selected_district = Some(district_code.to_string());
            true
        } else {
            false
        }
    }

    /// Navigate to the chosen district's dashboard. Without a selection a
    /// blocking notice is raised and the route stays put.
    pub fn confirm(&mut self) -> std::result::Result<Route, Notice> {
        match self.selected_district.as_deref() {
            Some(code) if !code.is_empty() => {
                info!(district = code, "navigating to dashboard");
                Ok(Route::Dashboard(code.to_string()))
            }
            _ => {
                let notice = Notice::NoDistrictSelected;
                self.notices.push(notice.clone());
                Err(notice)
            }
        }
    }

    /// Install a label response. A failure keeps the current labels.
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

    /// Install the state list; a failure leaves it empty with a notice.
    pub fn apply_states(&mut self, ticket: Ticket, result: Result<Vec<StateRef>>) -> bool {
        if !self.state_requests.is_current(ticket) {
            debug!("dropping stale state list");
            return false;
        }
        match result {
            Ok(states) => self.states = states,
            Err(e) => {
                warn!(error = %e, "failed to load states");
                self.states.clear();
                self.notices.push(Notice::LoadFailed {
                    what: "states",
                    detail: e.to_string(),
                });
            }
        }
        true
    }

    /// Install the district list for the selected state. Returns `false`
    /// when the user has since picked another state.
    pub fn apply_districts(&mut self, ticket: Ticket, result: Result<Vec<DistrictRef>>) -> bool {
        if !self.district_requests.is_current(ticket) {
            debug!("dropping stale district list");
            return false;
        }
        match result {
            Ok(districts) => self.districts = districts,
            Err(e) => {
                warn!(error = %e, "failed to load districts");
                self.districts.clear();
                self.notices.push(Notice::LoadFailed {
                    what: "districts",
                    detail: e.to_string(),
                });
            }
        }
        true
    }
}
