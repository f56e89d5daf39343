use std::{fmt, time::Duration};

use anyhow::Context as _;
use serde::Serialize;
use tracing::{info, trace, warn};

use crate::date_range::UsageDateRange;

pub const DEFAULT_BASE_URL: &str = "https://api.dune.com/api/v1";

pub const API_KEY_ENV_VAR: &str = "DEFI_JOSH_DUNE_QUERY_API_KEY";

pub const API_KEY_HEADER: &str = "X-DUNE-API-KEY";

const CONTENT_TYPE_HEADER: &str = "Content-Type";

pub type QueryId = u64;

/// The queries triggered by `execute`, in the order they are sent.
pub const QUERY_IDS: [QueryId; 14] = [
    6151943, 6152176, 6152608, 6154760, 6155052, 6154197, 6152448, 6153828, 6153694, 6182546,
    6183240, 6183386, 6183420, 6183986,
];

/// The Dune API key. Sent verbatim in the `X-DUNE-API-KEY` header; an absent
/// key is sent as an empty value and left for the server to reject.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(Option<String>);

impl ApiKey {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("{} is not set; requests will be sent without an API key", API_KEY_ENV_VAR);
        }
        Self(api_key)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn header_value(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("ApiKey(<redacted>)"),
            None => f.write_str("ApiKey(None)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DuneConfig {
    pub api_key: ApiKey,
    /// Prefix of every endpoint, without a trailing slash.
    pub base_url: String,
}

impl DuneConfig {
    pub fn new(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { api_key, base_url }
    }

    pub fn execute_query_url(&self, query_id: QueryId) -> String {
        format!("{}/query/{}/execute", self.base_url, query_id)
    }

    pub fn usage_url(&self) -> String {
        format!("{}/usage", self.base_url)
    }
}

/// A single POST to send. Headers are sent in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to get any response at all. HTTP error statuses are not
/// transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub trait Transport {
    fn post(&self, request: PostRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport with no request timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("error building HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn post(&self, request: PostRequest) -> Result<HttpResponse, TransportError> {
        let PostRequest { url, headers, body } = request;

        let mut builder = self.client.post(&url);
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Asks Dune to start executing a query. The response body is returned
/// whatever the status.
pub fn execute_query<T: Transport + ?Sized>(
    transport: &T,
    config: &DuneConfig,
    query_id: QueryId,
) -> Result<HttpResponse, TransportError> {
    let url = config.execute_query_url(query_id);
    info!("executing query {} at {}", query_id, url);

    let response = transport.post(PostRequest {
        url,
        headers: vec![(API_KEY_HEADER, config.api_key.header_value().to_owned())],
        body: None,
    })?;

    trace!("received response for query {}: {}", query_id, response.body);
    if !response.is_success() {
        warn!("query {} execution returned status {}", query_id, response.status);
    }
    Ok(response)
}

#[derive(Serialize)]
struct UsageRequestBody<'r> {
    start_date: &'r str,
    end_date: &'r str,
}

pub fn get_usage<T: Transport + ?Sized>(
    transport: &T,
    config: &DuneConfig,
    range: &UsageDateRange,
) -> anyhow::Result<serde_json::Value> {
    let url = config.usage_url();
    let body = serde_json::to_string(&UsageRequestBody {
        start_date: &range.start_date,
        end_date: &range.end_date,
    })?;
    info!("requesting usage from {} to {}", range.start_date, range.end_date);

    let response = transport.post(PostRequest {
        url,
        headers: vec![
            (API_KEY_HEADER, config.api_key.header_value().to_owned()),
            (CONTENT_TYPE_HEADER, "application/json".to_owned()),
        ],
        body: Some(body),
    })?;

    trace!("received usage response: {}", response.body);
    if !response.is_success() {
        warn!("usage request returned status {}", response.status);
    }
    let usage: serde_json::Value =
        serde_json::from_str(&response.body).context("usage response was not valid JSON")?;
    Ok(usage)
}
