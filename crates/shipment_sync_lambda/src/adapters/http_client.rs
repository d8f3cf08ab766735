//! `reqwest` client for the upstream logistics API.
//!
//! Base URL and bearer token are fixed when the client is built; every
//! request shares them.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shipment_sync_core::contract::{Organization, ShipmentPage};
use shipment_sync_core::date_range::DateRange;
use shipment_sync_core::paging::PageRequest;
use thiserror::Error;

use crate::adapters::logistics_api::{ApiError, LogisticsApi};
use crate::config::ApiSettings;

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpLogisticsApi {
    client: Client,
    base_url: String,
}

impl HttpLogisticsApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientBuildError> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|_| ClientBuildError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientBuildError::Build)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|err| ApiError::Url(format!("{}{}: {}", self.base_url, path, err)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let path = url.path().to_string();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(path, status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { path, source })
    }
}

#[async_trait]
impl LogisticsApi for HttpLogisticsApi {
    async fn ping(&self) -> Result<Value, ApiError> {
        self.get_json(self.endpoint("/ping")?).await
    }

    async fn shipment_jobs(
        &self,
        range: &DateRange,
        request: &PageRequest,
    ) -> Result<ShipmentPage, ApiError> {
        let mut url = self.endpoint("/shipment-jobs")?;
        append_page_query(&mut url, range, request);
        self.get_json(url).await
    }

    async fn organization(&self, qid: &str) -> Result<Organization, ApiError> {
        let mut url = self.endpoint("/organizations")?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{} cannot carry path segments", self.base_url)))?
            .push(qid);
        self.get_json(url).await
    }
}

fn append_page_query(url: &mut Url, range: &DateRange, request: &PageRequest) {
    let mut query = url.query_pairs_mut();
    query
        .append_pair("revisedAfter", &range.revised_after())
        .append_pair("revisedBefore", &range.revised_before())
        .append_pair("first", &request.first.to_string());
    if let Some(cursor) = &request.after {
        query.append_pair("after", cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> ApiSettings {
        ApiSettings {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            timeout: None,
        }
    }

    fn range() -> DateRange {
        DateRange::parse("2024-02-01", "2024-04-30").expect("range should parse")
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let api = HttpLogisticsApi::new(&settings("https://api.example.test/v1/"))
            .expect("client should build");
        assert_eq!(api.base_url(), "https://api.example.test/v1");
    }

    #[test]
    fn rejects_api_key_with_newline() {
        let mut bad = settings("https://api.example.test/v1");
        bad.api_key = "line\nbreak".to_string();
        assert!(matches!(
            HttpLogisticsApi::new(&bad),
            Err(ClientBuildError::InvalidApiKey)
        ));
    }

    #[test]
    fn first_page_query_has_no_cursor() {
        let mut url = Url::parse("https://api.example.test/v1/shipment-jobs").expect("valid url");
        append_page_query(
            &mut url,
            &range(),
            &PageRequest {
                first: 50,
                after: None,
            },
        );
        assert_eq!(
            url.query(),
            Some("revisedAfter=2024-02-01&revisedBefore=2024-04-30&first=50")
        );
    }

    #[test]
    fn later_page_query_carries_cursor() {
        let mut url = Url::parse("https://api.example.test/v1/shipment-jobs").expect("valid url");
        append_page_query(
            &mut url,
            &range(),
            &PageRequest {
                first: 6,
                after: Some("abc==".to_string()),
            },
        );
        assert_eq!(
            url.query(),
            Some("revisedAfter=2024-02-01&revisedBefore=2024-04-30&first=6&after=abc%3D%3D")
        );
    }
}
