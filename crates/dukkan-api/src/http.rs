//! Thin wrapper around `reqwest` shared by all endpoint modules.
//!
//! Owns the base URL, attaches the bearer token when one is stored, and
//! converts every failure into the client error taxonomy. Non-2xx bodies
//! are expected to carry the `{"error": {"message": ...}}` envelope; when
//! they do not, a generic `API Error: <status>` message is used.

use std::sync::Arc;
use std::time::Duration;

use dukkan_core::catalog::TokenStore;
use dukkan_core::error::{DukkanError, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error envelope returned by the backend on non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the Dukkan REST API.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token_store: Arc<dyn TokenStore>,
}

impl HttpClient {
    /// Creates a client for the given configuration and token store.
    pub fn new(config: ApiConfig, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_store,
        }
    }

    /// The token store this client authenticates with.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        self.token_store.clone()
    }

    fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token_store.get() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    /// Issues a GET and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<&str>) -> Result<T> {
        let url = self.url(path, query);
        tracing::debug!(%url, "GET");
        let request = self
            .authorize(self.client.get(&url))
            .timeout(REQUEST_TIMEOUT);
        let response = send(request).await?;
        decode_json(expect_success(response).await?).await
    }

    /// Issues a POST with a JSON body and decodes the JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path, None);
        tracing::debug!(%url, "POST");
        let request = self
            .authorize(self.client.post(&url))
            .json(body)
            .timeout(REQUEST_TIMEOUT);
        let response = send(request).await?;
        decode_json(expect_success(response).await?).await
    }

    /// Issues a POST with a JSON body, discarding any response body.
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.url(path, None);
        tracing::debug!(%url, "POST");
        let request = self
            .authorize(self.client.post(&url))
            .json(body)
            .timeout(REQUEST_TIMEOUT);
        let response = send(request).await?;
        expect_success(response).await.map(|_| ())
    }

    /// Issues a multipart POST (image upload pass-through).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url(path, None);
        tracing::debug!(%url, "POST multipart");
        let request = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .timeout(REQUEST_TIMEOUT);
        let response = send(request).await?;
        decode_json(expect_success(response).await?).await
    }

    /// Issues a DELETE, discarding any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path, None);
        tracing::debug!(%url, "DELETE");
        let request = self
            .authorize(self.client.delete(&url))
            .timeout(REQUEST_TIMEOUT);
        let response = send(request).await?;
        expect_success(response).await.map(|_| ())
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    request
        .send()
        .await
        .map_err(|e| DukkanError::network(e.to_string()))
}

/// Converts a non-2xx response into a classified error.
async fn expect_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = error_message(status, response).await;
    Err(DukkanError::from_status(status.as_u16(), message))
}

/// Extracts the server's error-envelope message, or builds the generic
/// fallback when the body is absent or not the expected shape.
async fn error_message(status: StatusCode, response: Response) -> String {
    let fallback = format!("API Error: {}", status.as_u16());
    let body = match response.text().await {
        Ok(body) => body,
        Err(_) => return fallback,
    };
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            tracing::warn!(status = status.as_u16(), "response without error envelope");
            fallback
        }
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| DukkanError::Serialization {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
}

/// Wire envelope for single-resource responses: `{"data": {...}}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ItemEnvelope<T> {
    pub data: T,
}
