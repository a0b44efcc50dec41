use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::error::{UpstreamError, UpstreamResult};

/// Shared outbound HTTP client. Every call is single-shot: no retries.
#[derive(Debug, Clone, Default)]
pub struct Upstream {
    client: Client,
}

impl Upstream {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// POST a JSON body and parse a JSON reply from any 2xx status.
    pub async fn post_json(
        &self,
        url: &str,
        body: &Value,
        timeout: Option<Duration>,
    ) -> UpstreamResult<Value> {
        tracing::debug!(%url, %body, "forwarding request");
        let request = with_timeout(self.client.post(url).json(body), timeout);
        let value = read_json(request).await?;
        tracing::debug!(%url, response = %value, "upstream replied");
        Ok(value)
    }

    /// GET with query parameters, parse JSON from any 2xx status.
    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Option<Duration>,
    ) -> UpstreamResult<Value> {
        let request = with_timeout(self.client.get(url).query(query), timeout);
        read_json(request).await
    }

    /// GET against a RapidAPI host. Only an exact 200 counts as success.
    pub async fn get_rapidapi(
        &self,
        url: &str,
        query: &[(&str, &str)],
        api_key: &str,
        api_host: &str,
    ) -> UpstreamResult<Value> {
        let request = self
            .client
            .get(url)
            .query(query)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", api_host);

        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.text().await.map_err(classify)?;
        if status != StatusCode::OK {
            return Err(UpstreamError::status(status));
        }
        serde_json::from_str(&body)
            .map_err(|_| UpstreamError::Decode("Error parsing JSON response".to_string()))
    }
}

fn with_timeout(request: RequestBuilder, timeout: Option<Duration>) -> RequestBuilder {
    match timeout {
        Some(t) => request.timeout(t),
        None => request,
    }
}

async fn read_json(request: RequestBuilder) -> UpstreamResult<Value> {
    let response = request.send().await.map_err(classify)?;
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::status(status));
    }
    let bytes = response.bytes().await.map_err(classify)?;
    serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err)
    }
}
