use super::models::PackageSearchPage;
use crate::error::{ExplorerError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Top-level `package_search` envelope. `result` is only required once
/// `success` is known to be true.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct CkanClient {
    client: reqwest::Client,
    api_url: String,
}

impl CkanClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let agent = HeaderValue::from_str(&format!("ckan-explorer/{}", env!("CARGO_PKG_VERSION")))
            .map_err(|e| ExplorerError::ConfigInvalid(e.to_string()))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self { client, api_url: api_url.into() })
    }

    /// Requests a single page of at most `rows` datasets matching `query`.
    ///
    /// Returns `Ok(None)` when the catalog reports the query as unsuccessful.
    pub async fn package_search(&self, query: &str, rows: u32) -> Result<Option<PackageSearchPage>> {
        let rows = rows.to_string();
        debug!(query, rows = %rows, url = %self.api_url, "package_search request");

        let resp = self
            .client
            .get(&self.api_url)
            .query(&[("q", query), ("rows", rows.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::Status {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "package_search response");
        decode_package_search(&body)
    }

    pub async fn test_connection(&self) -> ConnectionTestResult {
        let start = Instant::now();

        match self.client.get(&self.api_url).query(&[("rows", "0")]).send().await {
            Ok(resp) => {
                let elapsed = start.elapsed().as_millis() as u64;
                let status = resp.status();

                if !status.is_success() {
                    let code = status.as_u16();
                    return ConnectionTestResult {
                        status: "error".into(),
                        response_time_ms: Some(elapsed),
                        dataset_count: None,
                        error_code: Some(classify_status(code)),
                        message: Some(format!("HTTP {}", code)),
                    };
                }

                let decoded = match resp.text().await {
                    Ok(body) => decode_package_search(&body),
                    Err(e) => Err(e.into()),
                };
                match decoded {
                    Ok(page) => ConnectionTestResult {
                        status: "success".into(),
                        response_time_ms: Some(elapsed),
                        dataset_count: page.as_ref().and_then(|p| p.count),
                        error_code: None,
                        message: Some(match page {
                            Some(_) => format!("OK (HTTP {})", status.as_u16()),
                            None => "Catalog reachable but reported the query as unsuccessful".into(),
                        }),
                    },
                    Err(e) => ConnectionTestResult {
                        status: "error".into(),
                        response_time_ms: Some(elapsed),
                        dataset_count: None,
                        error_code: Some("PARSE_ERROR".into()),
                        message: Some(e.to_string()),
                    },
                }
            }
            Err(e) => ConnectionTestResult {
                status: "error".into(),
                response_time_ms: None,
                dataset_count: None,
                error_code: Some(if e.is_timeout() { "TIMEOUT" } else if e.is_connect() { "CONNECTION_FAILURE" } else { "NETWORK_ERROR" }.into()),
                message: Some(e.to_string()),
            },
        }
    }
}

pub(crate) fn decode_package_search(body: &str) -> Result<Option<PackageSearchPage>> {
    let envelope: Envelope = serde_json::from_str(body).map_err(malformed)?;

    if envelope.success != Some(true) {
        debug!(success = ?envelope.success, "catalog reported an unsuccessful query");
        return Ok(None);
    }

    let result = envelope
        .result
        .ok_or_else(|| ExplorerError::MalformedResponse("missing field `result`".into()))?;
    let page = serde_json::from_value(result).map_err(malformed)?;
    Ok(Some(page))
}

fn malformed(e: serde_json::Error) -> ExplorerError {
    ExplorerError::MalformedResponse(e.to_string())
}

fn classify_status(code: u16) -> String {
    match code {
        404 => "NOT_FOUND",
        429 => "RATE_LIMIT",
        500..=599 => "SERVER_ERROR",
        _ => "HTTP_ERROR",
    }.into()
}
