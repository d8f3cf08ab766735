use async_trait::async_trait;
use serde_json::Value;
use shipment_sync_core::contract::{Organization, ShipmentPage};
use shipment_sync_core::date_range::DateRange;
use shipment_sync_core::paging::PageRequest;
use thiserror::Error;

/// Failures talking to the upstream logistics API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid request url: {0}")]
    Url(String),
}

impl ApiError {
    pub fn status(path: impl Into<String>, status: u16) -> Self {
        Self::Status {
            path: path.into(),
            status,
        }
    }
}

/// Upstream endpoints the pipeline consumes.
#[async_trait]
pub trait LogisticsApi: Send + Sync {
    /// `GET /ping`. The body is only logged.
    async fn ping(&self) -> Result<Value, ApiError>;

    /// `GET /shipment-jobs` for one page of the revision window.
    async fn shipment_jobs(
        &self,
        range: &DateRange,
        request: &PageRequest,
    ) -> Result<ShipmentPage, ApiError>;

    /// `GET /organizations/{qid}`.
    async fn organization(&self, qid: &str) -> Result<Organization, ApiError>;
}
