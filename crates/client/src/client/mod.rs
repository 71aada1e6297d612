//! HTTP client for the hotelsync API.

pub mod health;
pub mod hotels;
pub mod reservations;
pub mod search;

use crate::error::{ClientError, Result};

/// HTTP client for the hotelsync API.
///
/// One client talks to one role; point it at the hotels role for hotel and
/// reservation calls and at the search role for search calls.
#[derive(Debug, Clone)]
pub struct HotelsyncClient {
    client: reqwest::Client,
    base_url: String,
}

impl HotelsyncClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (HOTELSYNC_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("HOTELSYNC_URL").unwrap_or_else(|_| "http://localhost:8081".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body or turn the status into an error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let response = self.check_status(response, resource).await?;
        response.json().await.map_err(ClientError::from)
    }

    /// Handle responses where no body is expected.
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<()> {
        self.check_status(response, resource).await.map(|_| ())
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ClientError::NotFound {
                resource: resource.to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = HotelsyncClient::new("http://localhost:8081/");
        assert_eq!(client.base_url(), "http://localhost:8081");
        assert_eq!(
            client.url("/api/hotels"),
            "http://localhost:8081/api/hotels"
        );
    }
}
