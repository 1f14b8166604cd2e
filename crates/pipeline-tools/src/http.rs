//! Outbound HTTP call adapter.
//!
//! Wraps one `reqwest::Client` and translates every transport-level fault
//! (connection failure, timeout, non-2xx status, unparseable body) into a
//! [`ToolError`], so nothing escapes a handler as a raw error.

use pipeline_core::ToolError;
use serde_json::Value;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("pipeline-tools/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP adapter for the built-in tools.
#[derive(Clone)]
pub struct HttpAdapter {
    client: reqwest::Client,
}

impl HttpAdapter {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Issue a GET and return the response without consuming the body.
    ///
    /// Only transport faults are translated here; callers that care about
    /// specific statuses (e.g. 404 for an unknown timezone) inspect the
    /// response themselves.
    pub async fn get(
        &self,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, ToolError> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(|e| ToolError::Transport(format!("Request to {url} failed: {e}")))
    }

    /// GET a JSON document, requiring a 2xx status.
    pub async fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value, ToolError> {
        let response = self.get(url, bearer).await?;
        Self::require_success(url, &response)?;
        response
            .json()
            .await
            .map_err(|e| ToolError::Transport(format!("Invalid JSON from {url}: {e}")))
    }

    /// POST a JSON body and parse the JSON response, requiring a 2xx status.
    pub async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Value, ToolError> {
        debug!("POST {}", url);
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ToolError::Transport(format!("Request to {url} failed: {e}")))?;
        Self::require_success(url, &response)?;
        response
            .json()
            .await
            .map_err(|e| ToolError::Transport(format!("Invalid JSON from {url}: {e}")))
    }

    fn require_success(url: &str, response: &reqwest::Response) -> Result<(), ToolError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Transport(format!(
                "{url} returned status {status}"
            )));
        }
        Ok(())
    }
}

impl Default for HttpAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a configured base URL and join an API path onto it.
///
/// A malformed or non-http(s) base is a configuration problem, reported with
/// the valve name so the user knows what to fix.
pub fn join_base(base: &str, valve: &str, path: &str) -> Result<String, ToolError> {
    let trimmed = base.trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| {
        ToolError::Misconfigured(format!("The {valve} valve is not a valid URL: {e}"))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ToolError::Misconfigured(format!(
                "The {valve} valve must use http or https, not {other}"
            )))
        }
    }
    Ok(format!("{}/{}", trimmed, path.trim_start_matches('/')))
}
