//! In-memory search index with staged writes.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use hotelsync_core::search::{
    get_string_field, tokenize, FieldQuery, IndexDocument, IndexError, IndexStore, Result,
};

#[derive(Debug, Default)]
struct IndexState {
    /// Pending mutations by document id. `None` stages a removal.
    staged: HashMap<String, Option<IndexDocument>>,
    committed: BTreeMap<String, IndexDocument>,
}

/// Document index held in memory.
///
/// Writes are staged and only become visible to queries on `commit`.
/// Query text and the queried field are both split into words by
/// [`tokenize`]. A document scores one point per matching term; results are
/// ordered by score, then by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    state: Arc<RwLock<IndexState>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed documents.
    pub async fn len(&self) -> usize {
        self.state.read().await.committed.len()
    }

    /// Returns a committed document by id.
    pub async fn get(&self, id: &str) -> Option<IndexDocument> {
        self.state.read().await.committed.get(id).cloned()
    }
}

fn score(document: &IndexDocument, field: &str, terms: &[String]) -> usize {
    let words = tokenize(&get_string_field(document, field));
    terms.iter().filter(|term| words.contains(term)).count()
}

#[async_trait]
impl IndexStore for InMemoryIndex {
    async fn add(&self, document: IndexDocument) -> Result<()> {
        let id = get_string_field(&document, "id");
        if id.is_empty() {
            return Err(IndexError::Write("document has no id".to_string()));
        }
        let mut state = self.state.write().await;
        state.staged.insert(id, Some(document));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        state.staged.insert(id.to_string(), None);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut state = self.state.write().await;
        let staged = std::mem::take(&mut state.staged);
        for (id, document) in staged {
            match document {
                Some(document) => {
                    state.committed.insert(id, document);
                }
                None => {
                    state.committed.remove(&id);
                }
            }
        }
        Ok(())
    }

    async fn query(
        &self,
        query: &FieldQuery,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<IndexDocument>> {
        let terms = query.terms();
        let state = self.state.read().await;

        // BTreeMap iteration already yields ids in order, and the sort is stable.
        let mut hits: Vec<(usize, &IndexDocument)> = state
            .committed
            .values()
            .map(|doc| (score(doc, &query.field, &terms), doc))
            .filter(|(score, _)| terms.is_empty() || *score > 0)
            .collect();
        hits.sort_by_key(|(score, _)| Reverse(*score));

        Ok(hits
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
