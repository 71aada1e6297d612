//! Search role API operations.

use hotelsync_core::events::{DeadLetter, RedriveReport};
use hotelsync_core::search::{HotelSummary, SearchQuery};

use super::HotelsyncClient;
use crate::error::Result;

impl HotelsyncClient {
    /// Search hotels by name.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<HotelSummary>> {
        let response = self
            .client
            .get(self.url("/api/search"))
            .query(query)
            .send()
            .await?;
        self.handle_response(response, "search").await
    }

    /// List the events the search role gave up on.
    pub async fn dead_letters(&self) -> Result<Vec<DeadLetter>> {
        let response = self
            .client
            .get(self.url("/api/search/dead-letters"))
            .send()
            .await?;
        self.handle_response(response, "dead letters").await
    }

    /// Replay every dead-lettered event.
    pub async fn redrive_dead_letters(&self) -> Result<RedriveReport> {
        let response = self
            .client
            .post(self.url("/api/search/dead-letters/redrive"))
            .send()
            .await?;
        self.handle_response(response, "dead letters").await
    }
}
