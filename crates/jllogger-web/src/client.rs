//! HTTP client for the append route

use jllogger_core::{constants, Error, LogRequest, Result};
use tracing::debug;

/// Posts log batches to a running jllogger host
pub struct LogClient {
    base_url: String,
    url_path: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl LogClient {
    /// Create a client for a server URL, e.g. `http://127.0.0.1:8888`
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self::with_client(base_url, token, reqwest::Client::new())
    }

    /// Create with a custom HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        token: Option<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            url_path: constants::DEFAULT_URL_PATH.to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        }
    }

    /// Use a different extension segment than `jl-logger`
    pub fn with_url_path(mut self, url_path: impl Into<String>) -> Self {
        self.url_path = url_path.into();
        self
    }

    /// Full URL of the append route
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            constants::log_route("/", &self.url_path)
        )
    }

    /// Send one batch of lines
    pub async fn send(&self, request: &LogRequest) -> Result<()> {
        let url = self.endpoint();
        debug!("POST {} ({} lines)", url, request.log_content.len());

        let mut builder = self.client.post(&url).json(request);
        if let Some(token) = &self.token {
            builder = builder.header(reqwest::header::AUTHORIZATION, format!("token {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::http(format!("Error on POST {}: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(Error::http(format!("Error on POST {}: HTTP {} {}", url, status, message)))
    }
}
