use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::date_range::DateRange;
use crate::{
    ApiEnvelope, BalanceRecord, Granularity, LatestBalance, Resident, ResidentId, UsageRecord,
};

pub const API_PREFIX: &str = "/api/v1.0";

/// Failure of a single API request
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

/// The one HTTP capability the dashboard needs: GET a URL, get JSON back.
///
/// Implementations must map non-success statuses to `RequestError::Status`.
/// Futures are not required to be `Send`; the browser runs everything on one
/// thread.
#[async_trait(?Send)]
pub trait HttpGet {
    async fn get_json(&self, url: &str) -> Result<Value, RequestError>;
}

/// Read-only client for the residents/balances/usages API
#[derive(Clone)]
pub struct UsageClient<H> {
    http: H,
    base_url: String,
}

impl<H: HttpGet> UsageClient<H> {
    /// `base_url` may be empty to address the page's own origin
    pub fn new(http: H, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// All residents, in the order the server lists them
    pub async fn list_residents(&self) -> Result<Vec<Resident>, RequestError> {
        let url = format!("{}{}/residents", self.base_url, API_PREFIX);
        self.fetch_rows(&url).await
    }

    /// The newest balance record, or an empty `LatestBalance` when there is none
    pub async fn latest_balance(
        &self,
        resident_id: &ResidentId,
    ) -> Result<LatestBalance, RequestError> {
        let url = format!(
            "{}/balances?order_by=date&order=desc&limit=1",
            self.resident_url(resident_id)
        );
        let rows: Vec<BalanceRecord> = self.fetch_rows(&url).await?;
        Ok(LatestBalance::from(rows.into_iter().next()))
    }

    /// Usage aggregated by `granularity` over `range`, oldest period first
    pub async fn usage(
        &self,
        resident_id: &ResidentId,
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<UsageRecord>, RequestError> {
        let url = format!(
            "{}/usages?start_date={}&end_date={}&granularity={}",
            self.resident_url(resident_id),
            range.start_str(),
            range.end_str(),
            granularity
        );
        let mut rows: Vec<UsageRecord> = self.fetch_rows(&url).await?;
        // ISO dates order lexicographically; stable so equal dates keep server order
        rows.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(rows)
    }

    fn resident_url(&self, resident_id: &ResidentId) -> String {
        format!(
            "{}{}/residents/{}",
            self.base_url,
            API_PREFIX,
            urlencoding::encode(resident_id.as_str())
        )
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, RequestError> {
        debug!(url, "GET");
        let body = self.http.get_json(url).await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_value(body).map_err(|e| RequestError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let rows = envelope.into_rows();
        debug!(url, rows = rows.len(), "decoded response");
        Ok(rows)
    }
}
