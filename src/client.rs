//! Thin async client for the employment-program backend.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::lang::{LabelSet, Language};
use crate::types::{DistrictRef, PerformanceRecord, StateRef};

/// Months of history requested per district.
pub const DEFAULT_LIMIT: usize = 12;

#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:8000/api`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base =
            Url::parse(base_url).map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base,
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidBaseUrl(self.base.to_string()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// `GET /translations/{language}`
    pub async fn translations(&self, lang: Language) -> Result<LabelSet> {
        let url = self.endpoint(&["translations", lang.code()])?;
        let entries: HashMap<String, String> = self.get_json(url).await?;
        Ok(LabelSet::new(lang, entries))
    }

    /// `GET /states`
    pub async fn states(&self) -> Result<Vec<StateRef>> {
        let url = self.endpoint(&["states"])?;
        self.get_json(url).await
    }

    /// `GET /districts/{state_code}`. The backend answers 404 for a state
    /// without districts; that is reported as an empty list.
    pub async fn districts(&self, state_code: &str) -> Result<Vec<DistrictRef>> {
        let url = self.endpoint(&["districts", state_code])?;
        match self.get_json(url).await {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }

    /// `GET /performance/{district_code}?limit=N`, newest first. A 404
    /// (no data recorded) is an empty list.
    pub async fn performance(
        &self,
        district_code: &str,
        limit: usize,
    ) -> Result<Vec<PerformanceRecord>> {
        let mut url = self.endpoint(&["performance", district_code])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        match self.get_json(url).await {
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            other => other,
        }
    }
}
