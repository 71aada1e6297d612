//! Canonical hotel lookups for the search role.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use hotelsync_client::HotelsyncClient;
use hotelsync_core::hotel::Hotel;

use super::error::ServiceError;
use super::hotels::HotelService;

/// Errors from fetching a hotel's current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The hotel no longer exists. Terminal.
    #[error("Hotel not found: {0}")]
    NotFound(Uuid),
    /// Anything else. Worth retrying.
    #[error("Fetch failed: {0}")]
    Failed(String),
}

/// Reads the current state of a hotel from the system of record.
#[async_trait]
pub trait HotelFetcher: Send + Sync {
    async fn fetch(&self, id: Uuid) -> Result<Hotel, FetchError>;
}

/// Fetches through the in-process [`HotelService`], cache first.
#[derive(Clone)]
pub struct LocalFetcher {
    service: HotelService,
}

impl LocalFetcher {
    pub fn new(service: HotelService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl HotelFetcher for LocalFetcher {
    async fn fetch(&self, id: Uuid) -> Result<Hotel, FetchError> {
        self.service.get_by_id(id).await.map_err(|err| match err {
            ServiceError::NotFound { .. } => FetchError::NotFound(id),
            other => FetchError::Failed(other.to_string()),
        })
    }
}

/// Fetches from a remote hotels role over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: HotelsyncClient,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: HotelsyncClient::new(base_url),
        }
    }
}

#[async_trait]
impl HotelFetcher for HttpFetcher {
    async fn fetch(&self, id: Uuid) -> Result<Hotel, FetchError> {
        self.client.get_hotel(id).await.map_err(|err| {
            if err.is_not_found() {
                FetchError::NotFound(id)
            } else {
                FetchError::Failed(err.to_string())
            }
        })
    }
}
