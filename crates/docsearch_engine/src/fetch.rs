use std::time::Duration;

use docsearch_logging::{search_info, search_trace, search_warn};
use futures_util::StreamExt;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN,
    REFERER, USER_AGENT,
};
use reqwest::StatusCode;

use crate::{parse_ndjson, FailureKind, RequestPayload, SearchError, SearchOutcome};

pub const DEFAULT_ENDPOINT: &str = "https://docs.github.com/api/ai-search/v1";

// The endpoint rejects requests that do not look like they come from the docs site.
const ACCEPT_VALUE: &str = "application/x-ndjson, */*";
const ACCEPT_ENCODING_VALUE: &str = "gzip, deflate, br";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
const ORIGIN_VALUE: &str = "https://docs.github.com";
const REFERER_VALUE: &str = "https://docs.github.com/?search-overlay-open=true";
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/135.0.0.0 Safari/537.36";

const UNAVAILABLE_MESSAGE: &str =
    "GitHub docs API is temporarily unavailable. Please try again later.";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Hard deadline for the whole request, body included.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, payload: &RequestPayload) -> Result<SearchOutcome, SearchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearcher {
    settings: SearchSettings,
}

impl ReqwestSearcher {
    pub fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SearchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SearchError::new(FailureKind::Network, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, SearchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn request_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING_VALUE));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));
    headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
    headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers
}

#[async_trait::async_trait]
impl Searcher for ReqwestSearcher {
    async fn search(&self, payload: &RequestPayload) -> Result<SearchOutcome, SearchError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SearchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = self.build_client()?;

        search_info!(
            "searching query={:?} version={:?} endpoint={}",
            payload.query,
            payload.version,
            endpoint
        );
        let response = client
            .post(endpoint)
            .headers(request_headers())
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        search_info!("search response status {}", status);
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            search_warn!("search failed with {}: {}", status, error_body);
            return Err(status_error(status));
        }

        let body = self.read_body(response).await?;
        search_trace!("search response body: {}", body);
        parse_ndjson(&body)
    }
}

fn status_error(status: StatusCode) -> SearchError {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return SearchError::new(FailureKind::Unavailable, UNAVAILABLE_MESSAGE);
    }
    let reason = status.canonical_reason().unwrap_or_default();
    SearchError::new(
        FailureKind::HttpStatus(status.as_u16()),
        format!(
            "Failed to fetch from GitHub docs API: {} {}",
            status.as_u16(),
            reason
        )
        .trim_end()
        .to_string(),
    )
}

fn too_large(max_bytes: u64, actual: u64) -> SearchError {
    SearchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        return SearchError::new(FailureKind::Timeout, err.to_string());
    }
    SearchError::new(FailureKind::Network, err.to_string())
}
