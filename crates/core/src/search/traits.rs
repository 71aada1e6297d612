use async_trait::async_trait;

use super::{FieldQuery, IndexDocument, Result};

/// Write-optimized document store with text query.
///
/// Mutations are staged until [`IndexStore::commit`] makes them visible to
/// queries.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Stages a document, replacing any document with the same `id`.
    async fn add(&self, document: IndexDocument) -> Result<()>;

    /// Stages the removal of a document. Removing a missing id succeeds.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Makes all staged mutations visible.
    async fn commit(&self) -> Result<()>;

    /// Runs a field-scoped text query over committed documents.
    async fn query(
        &self,
        query: &FieldQuery,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<IndexDocument>>;
}
