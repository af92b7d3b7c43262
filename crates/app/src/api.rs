//! Backend API connection management.

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by calls to the storefront REST backend.
///
/// Messages are human-readable and shown to the user without
/// reclassification.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport or body decoding failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist.
    #[error("not found")]
    NotFound,

    /// The backend rejected the request with its own message.
    #[error("{message}")]
    Api {
        /// Message returned by the backend, displayed verbatim.
        message: String,
    },

    /// The backend returned something the client could not interpret.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

/// Shared connection to the storefront REST backend.
#[derive(Debug, Clone)]
pub struct Api {
    base_url: String,
    http: Client,
}

impl Api {
    /// Create a connection rooted at `base_url`, e.g.
    /// `https://shop.example.com/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            http: Client::new(),
        }
    }

    /// Absolute URL for an API path beginning with `/`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Decode a JSON response body, mapping error statuses to [`ApiError`].
    pub(crate) async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }
}

/// Map non-success statuses to [`ApiError`], preferring the backend's own
/// `{"message": ...}` error body when one is present.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    match message {
        Some(message) => Err(ApiError::Api { message }),
        None => Err(ApiError::UnexpectedResponse(format!(
            "request failed with status {status}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_base_url() {
        let api = Api::new("http://localhost:3000/api///");

        assert_eq!(api.url("/products"), "http://localhost:3000/api/products");
    }

    #[test]
    fn url_joins_paths_verbatim() {
        let api = Api::new("https://shop.example.com/api");

        assert_eq!(
            api.url("/orders/42/status"),
            "https://shop.example.com/api/orders/42/status"
        );
    }
}
