use crate::twitch_api::types::ApiError;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Future returned by [`Transport::fetch`]
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>>;

/// A fully composed HTTP request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    /// Query string parameters
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
}

/// Transport trait for performing HTTP requests
///
/// Implementations must report rejected credentials as
/// [`ApiError::Authentication`] so the client can refresh and retry; every
/// other failure uses the remaining `ApiError` variants.
pub trait Transport: Send + Sync {
    /// Send a request and return the decoded JSON response body
    fn fetch(&self, request: TransportRequest) -> TransportFuture<'_>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn fetch(&self, request: TransportRequest) -> TransportFuture<'_> {
        Box::pin(async move {
            let TransportRequest {
                url,
                method,
                headers,
                query,
                body,
            } = request;

            tracing::debug!("Sending {} request to: {}", method, url);

            let mut builder = self.client.request(method, &url).headers(headers);
            if !query.is_empty() {
                builder = builder.query(&query);
            }
            if let Some(body) = &body {
                builder = builder.json(body);
            }

            let response = builder.send().await.map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", url, e);
                ApiError::from(e)
            })?;

            let status = response.status();
            tracing::debug!("Received response with status: {}", status);

            if !status.is_success() {
                let error_body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ApiError::from_status(status.as_u16(), error_body));
            }

            let response_text = response.text().await.map_err(|e| {
                tracing::error!("Failed to read response body: {}", e);
                ApiError::Parse(format!("Failed to read response: {}", e))
            })?;

            if response_text.trim().is_empty() {
                return Ok(Value::Null);
            }

            serde_json::from_str(&response_text).map_err(|e| {
                tracing::error!(
                    "Failed to parse response: {} - Response body: {}",
                    e,
                    response_text
                );
                ApiError::Parse(format!(
                    "Failed to parse response: {} - Body: {}",
                    e, response_text
                ))
            })
        })
    }
}
