use crate::index::{build_inverted_index, InvertedIndex};
use crate::query::Query;
use crate::store::DocumentStore;
use crate::DocId;
use serde::Serialize;

/// Documents plus the index last built from them.
///
/// The index is a snapshot: documents added after [`Session::build_index`]
/// are invisible to queries until the next build.
#[derive(Debug, Default)]
pub struct Session {
    documents: DocumentStore,
    index: Option<InvertedIndex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Built { documents: usize, terms: usize },
    NoDocuments,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryHit {
    pub doc_id: DocId,
    pub source: String,
    pub preview: String,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn add_document(&mut self, source: impl Into<String>, text: impl Into<String>) -> DocId {
        self.documents.insert(source, text)
    }

    pub fn documents(&self) -> &DocumentStore { &self.documents }

    pub fn index(&self) -> Option<&InvertedIndex> { self.index.as_ref() }

    /// Rebuild the index from every stored document, replacing any previous one.
    pub fn build_index(&mut self) -> BuildOutcome {
        if self.documents.is_empty() {
            return BuildOutcome::NoDocuments;
        }
        let index = build_inverted_index(self.documents.texts());
        let outcome = BuildOutcome::Built { documents: self.documents.len(), terms: index.num_terms() };
        tracing::info!(documents = self.documents.len(), terms = index.num_terms(), "index built");
        self.index = Some(index);
        outcome
    }

    /// Matching documents in id order, or `None` when no index has been built yet.
    pub fn query(&self, raw: &str) -> Option<(Query, Vec<QueryHit>)> {
        let index = self.index.as_ref()?;
        let query = Query::parse(raw);
        let hits = query
            .evaluate(index)
            .into_iter()
            .filter_map(|id| self.documents.get(id))
            .map(|doc| QueryHit { doc_id: doc.id, source: doc.source.clone(), preview: doc.preview() })
            .collect();
        Some((query, hits))
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.index = None;
    }
}
