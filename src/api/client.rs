// Monitoring API HTTP client.
// Handles base URL resolution and request/response status processing.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use reqwest::{
    Client, ClientBuilder, Response, Url,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{MonitorError, Result};

use super::types::Snapshot;

const USER_AGENT_VALUE: &str = concat!("wokmon/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Longest response body kept in a server error message.
const MAX_ERROR_BODY: usize = 200;

/// Anything that can produce a status snapshot for a named instance.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self, instance_name: &str) -> BoxFuture<'static, Result<Snapshot>>;
}

/// HTTP client for the monitoring API of a workflow server.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    client: Client,
    base_url: Url,
}

impl MonitorClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_builder(base_url, Client::builder())
    }

    /// Create a client from a preconfigured builder (proxy, TLS settings).
    pub fn with_builder(base_url: &str, builder: ClientBuilder) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| MonitorError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(MonitorError::InvalidUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = builder
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL. Each segment is percent-encoded.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| MonitorError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Make a GET request to the monitoring API.
    pub async fn get(&self, url: Url) -> Result<Response> {
        let response = self.client.get(url).send().await?;
        check_response(response).await
    }
}

impl SnapshotSource for MonitorClient {
    fn fetch(&self, instance_name: &str) -> BoxFuture<'static, Result<Snapshot>> {
        let client = self.clone();
        let instance_name = instance_name.to_string();
        async move { client.get_instance_state(&instance_name).await }.boxed()
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(MonitorError::Server {
        status,
        body: summarize_body(&body),
    })
}

/// First non-empty line of an error body, truncated.
fn summarize_body(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if line.chars().count() > MAX_ERROR_BODY {
        let truncated: String = line.chars().take(MAX_ERROR_BODY).collect();
        format!("{}…", truncated)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            MonitorClient::new("not a url"),
            Err(MonitorError::InvalidUrl(_))
        ));
        assert!(matches!(
            MonitorClient::new("mailto:ops@example.com"),
            Err(MonitorError::InvalidUrl(_))
        ));
        assert!(matches!(
            MonitorClient::new("ftp://example.com"),
            Err(MonitorError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = MonitorClient::new("http://localhost:5000/wok/").unwrap();
        let url = client.endpoint_url(&["api", "ping"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/wok/api/ping");

        let client = MonitorClient::new("http://localhost:5000").unwrap();
        let url = client.endpoint_url(&["api", "ping"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/ping");
    }

    #[test]
    fn test_summarize_body() {
        assert_eq!(summarize_body(""), "");
        assert_eq!(summarize_body("\n  Not Found  \n<html>"), "Not Found");

        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let summary = summarize_body(&long);
        assert_eq!(summary.chars().count(), MAX_ERROR_BODY + 1);
        assert!(summary.ends_with('…'));
    }
}
