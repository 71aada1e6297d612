//! Secondary orchestrator of the search role, plus the search query path.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use hotelsync_core::events::{HotelEvent, Operation};
use hotelsync_core::search::{
    document_from_hotel, summary_from_document, FieldQuery, HotelSummary, IndexError, IndexStore,
    SearchQuery, NAME_FIELD,
};

use super::error::{Result, ServiceError};
use super::fetcher::{FetchError, HotelFetcher};

/// What handling an event did to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The hotel's current state was written to the index.
    Indexed { hotel_id: Uuid, version: u64 },
    /// The hotel's document was removed.
    Removed { hotel_id: Uuid },
    /// The hotel no longer exists at the source; nothing to index.
    Gone { hotel_id: Uuid },
    /// The operation is not one this consumer understands.
    Ignored { operation: String },
}

/// Reconciliation failures worth retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("fetch stage failed: {0}")]
    Fetch(FetchError),
    #[error("index stage failed: {0}")]
    Index(#[from] IndexError),
}

/// Keeps the search index in line with the system of record and serves
/// queries against it.
#[derive(Clone)]
pub struct SearchService {
    index: Arc<dyn IndexStore>,
    fetcher: Arc<dyn HotelFetcher>,
}

impl SearchService {
    pub fn new(index: Arc<dyn IndexStore>, fetcher: Arc<dyn HotelFetcher>) -> Self {
        Self { index, fetcher }
    }

    /// Reconciles the index with one change notification.
    ///
    /// Creates and updates re-fetch the hotel and replace its whole
    /// document; the event's payload is never trusted. Deletes remove the
    /// document without a fetch.
    pub async fn handle_event(
        &self,
        event: &HotelEvent,
    ) -> std::result::Result<Reconciliation, SearchError> {
        let id = event.hotel_id;

        match &event.operation {
            Operation::Create | Operation::Update => {
                let hotel = match self.fetcher.fetch(id).await {
                    Ok(hotel) => hotel,
                    Err(FetchError::NotFound(_)) => {
                        tracing::info!(
                            hotel_id = %id,
                            operation = %event.operation,
                            "Hotel gone before it could be indexed, dropping event"
                        );
                        return Ok(Reconciliation::Gone { hotel_id: id });
                    }
                    Err(err) => return Err(SearchError::Fetch(err)),
                };

                self.index.add(document_from_hotel(&hotel)).await?;
                self.index.commit().await?;

                tracing::debug!(hotel_id = %id, version = hotel.version, "Hotel indexed");
                Ok(Reconciliation::Indexed {
                    hotel_id: id,
                    version: hotel.version,
                })
            }
            Operation::Delete => {
                self.index.delete(&id.to_string()).await?;
                self.index.commit().await?;

                tracing::debug!(hotel_id = %id, "Hotel removed from index");
                Ok(Reconciliation::Removed { hotel_id: id })
            }
            Operation::Unknown(operation) => {
                tracing::warn!(hotel_id = %id, operation = %operation, "Ignoring unknown operation");
                Ok(Reconciliation::Ignored {
                    operation: operation.clone(),
                })
            }
        }
    }

    /// Runs a name search over the index.
    ///
    /// Result fields are read defensively, so a malformed document shows up
    /// with empty values instead of failing the query.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<HotelSummary>> {
        let field_query = FieldQuery::new(NAME_FIELD, query.q.as_str());
        let documents = self
            .index
            .query(&field_query, query.effective_limit(), query.offset)
            .await
            .map_err(ServiceError::IndexQuery)?;

        Ok(documents.iter().map(summary_from_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::RwLock;

    use hotelsync_core::hotel::{Hotel, NewHotel};
    use hotelsync_core::search::{IndexDocument, Result as IndexResult};

    use crate::index::InMemoryIndex;

    // Fetcher backed by a map, with a switchable outage
    #[derive(Default)]
    struct MapFetcher {
        hotels: RwLock<HashMap<Uuid, Hotel>>,
        fetch_calls: AtomicUsize,
        unavailable: std::sync::atomic::AtomicBool,
    }

    impl MapFetcher {
        async fn insert(&self, hotel: Hotel) {
            self.hotels.write().await.insert(hotel.id, hotel);
        }
    }

    #[async_trait]
    impl HotelFetcher for MapFetcher {
        async fn fetch(&self, id: Uuid) -> std::result::Result<Hotel, FetchError> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(FetchError::Failed("connection refused".to_string()));
            }
            self.hotels
                .read()
                .await
                .get(&id)
                .cloned()
                .ok_or(FetchError::NotFound(id))
        }
    }

    // Index whose commits always fail
    struct BrokenCommitIndex(InMemoryIndex);

    #[async_trait]
    impl IndexStore for BrokenCommitIndex {
        async fn add(&self, document: IndexDocument) -> IndexResult<()> {
            self.0.add(document).await
        }

        async fn delete(&self, id: &str) -> IndexResult<()> {
            self.0.delete(id).await
        }

        async fn commit(&self) -> IndexResult<()> {
            Err(IndexError::Commit("disk full".to_string()))
        }

        async fn query(
            &self,
            query: &FieldQuery,
            limit: usize,
            offset: usize,
        ) -> IndexResult<Vec<IndexDocument>> {
            self.0.query(query, limit, offset).await
        }
    }

    // Index that accepts writes but cannot answer queries
    struct UnqueryableIndex(InMemoryIndex);

    #[async_trait]
    impl IndexStore for UnqueryableIndex {
        async fn add(&self, document: IndexDocument) -> IndexResult<()> {
            self.0.add(document).await
        }

        async fn delete(&self, id: &str) -> IndexResult<()> {
            self.0.delete(id).await
        }

        async fn commit(&self) -> IndexResult<()> {
            self.0.commit().await
        }

        async fn query(
            &self,
            _query: &FieldQuery,
            _limit: usize,
            _offset: usize,
        ) -> IndexResult<Vec<IndexDocument>> {
            Err(IndexError::Query("searcher closed".to_string()))
        }
    }

    fn setup() -> (SearchService, Arc<InMemoryIndex>, Arc<MapFetcher>) {
        let index = Arc::new(InMemoryIndex::new());
        let fetcher = Arc::new(MapFetcher::default());
        let service = SearchService::new(index.clone(), fetcher.clone());
        (service, index, fetcher)
    }

    fn hotel(name: &str) -> Hotel {
        Hotel::from_new(Uuid::new_v4(), NewHotel::new(name).with_city("Lima"))
    }

    #[tokio::test]
    async fn test_create_indexes_fetched_state() {
        let (service, index, fetcher) = setup();
        let plaza = hotel("Plaza");
        fetcher.insert(plaza.clone()).await;

        let outcome = service
            .handle_event(&HotelEvent::created(plaza.id, 1))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Reconciliation::Indexed {
                hotel_id: plaza.id,
                version: 1
            }
        );
        let doc = index.get(&plaza.id.to_string()).await.unwrap();
        assert_eq!(doc["name"], json!("Plaza"));
        assert_eq!(doc["city"], json!("Lima"));
    }

    #[tokio::test]
    async fn test_update_uses_current_state_not_event() {
        let (service, index, fetcher) = setup();
        let mut plaza = hotel("Plaza");
        fetcher.insert(plaza.clone()).await;
        service
            .handle_event(&HotelEvent::created(plaza.id, 1))
            .await
            .unwrap();

        // Two updates land at the source before the first event is consumed
        plaza.name = "Grand Plaza".to_string();
        plaza.version = 3;
        fetcher.insert(plaza.clone()).await;

        service
            .handle_event(&HotelEvent::updated(plaza.id, 2))
            .await
            .unwrap();

        let doc = index.get(&plaza.id.to_string()).await.unwrap();
        assert_eq!(doc["name"], json!("Grand Plaza"));
        assert_eq!(doc["version"], json!(3));
    }

    #[tokio::test]
    async fn test_delete_removes_without_fetch() {
        let (service, index, fetcher) = setup();
        let plaza = hotel("Plaza");
        fetcher.insert(plaza.clone()).await;
        service
            .handle_event(&HotelEvent::created(plaza.id, 1))
            .await
            .unwrap();

        let outcome = service
            .handle_event(&HotelEvent::deleted(plaza.id, 2))
            .await
            .unwrap();

        assert_eq!(outcome, Reconciliation::Removed { hotel_id: plaza.id });
        assert_eq!(index.len().await, 0);
        assert_eq!(fetcher.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_for_vanished_hotel_is_dropped() {
        let (service, index, _) = setup();
        let id = Uuid::new_v4();

        let outcome = service
            .handle_event(&HotelEvent::created(id, 1))
            .await
            .unwrap();

        assert_eq!(outcome, Reconciliation::Gone { hotel_id: id });
        assert_eq!(index.len().await, 0);
    }

    #[tokio::test]
    async fn test_create_update_delete_drain_leaves_no_document() {
        let (service, index, fetcher) = setup();
        let plaza = hotel("Plaza");
        // The hotel was already deleted at the source when the events drain
        let events = [
            HotelEvent::created(plaza.id, 1),
            HotelEvent::updated(plaza.id, 2),
            HotelEvent::deleted(plaza.id, 3),
        ];

        for event in &events {
            service.handle_event(event).await.unwrap();
        }

        assert_eq!(index.len().await, 0);
        assert!(fetcher.hotels.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_operation_is_ignored() {
        let (service, index, fetcher) = setup();
        let event = HotelEvent {
            operation: Operation::Unknown("ARCHIVE".to_string()),
            hotel_id: Uuid::new_v4(),
            version: 1,
        };

        let outcome = service.handle_event(&event).await.unwrap();

        assert_eq!(
            outcome,
            Reconciliation::Ignored {
                operation: "ARCHIVE".to_string()
            }
        );
        assert_eq!(index.len().await, 0);
        assert_eq!(fetcher.fetch_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transient_fetch_failure_is_an_error() {
        let (service, _, fetcher) = setup();
        fetcher.unavailable.store(true, Ordering::SeqCst);

        let result = service
            .handle_event(&HotelEvent::updated(Uuid::new_v4(), 2))
            .await;

        assert!(matches!(result, Err(SearchError::Fetch(FetchError::Failed(_)))));
    }

    #[tokio::test]
    async fn test_commit_failure_is_an_index_error() {
        let fetcher = Arc::new(MapFetcher::default());
        let service = SearchService::new(
            Arc::new(BrokenCommitIndex(InMemoryIndex::new())),
            fetcher.clone(),
        );
        let plaza = hotel("Plaza");
        fetcher.insert(plaza.clone()).await;

        let result = service.handle_event(&HotelEvent::created(plaza.id, 1)).await;

        assert_eq!(
            result,
            Err(SearchError::Index(IndexError::Commit("disk full".to_string())))
        );
    }

    #[tokio::test]
    async fn test_search_finds_by_name() {
        let (service, _, fetcher) = setup();
        for name in ["Plaza", "Grand Plaza", "Ritz"] {
            let h = hotel(name);
            fetcher.insert(h.clone()).await;
            service
                .handle_event(&HotelEvent::created(h.id, 1))
                .await
                .unwrap();
        }

        let hits = service.search(&SearchQuery::new("plaza")).await.unwrap();
        let names: Vec<&str> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Plaza"));
        assert!(names.contains(&"Grand Plaza"));

        let hits = service.search(&SearchQuery::new("grand plaza")).await.unwrap();
        assert_eq!(hits[0].name, "Grand Plaza");
    }

    #[tokio::test]
    async fn test_search_degrades_malformed_documents() {
        let (service, index, _) = setup();
        let doc = match json!({"id": "h1", "name": ["Plaza"], "city": 7, "rating": "high"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        index.add(doc).await.unwrap();
        index.commit().await.unwrap();

        let hits = service.search(&SearchQuery::new("plaza")).await.unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Plaza");
        assert_eq!(hits[0].city, "");
        assert_eq!(hits[0].rating, 0.0);
    }

    #[tokio::test]
    async fn test_failed_query_is_not_reported_as_commit() {
        let service = SearchService::new(
            Arc::new(UnqueryableIndex(InMemoryIndex::new())),
            Arc::new(MapFetcher::default()),
        );

        let err = service
            .search(&SearchQuery::new("plaza"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::IndexQuery(IndexError::Query("searcher closed".to_string()))
        );
        assert_eq!(err.to_string(), "index query failed: Index query failed: searcher closed");
    }
}
