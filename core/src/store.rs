use crate::{DocId, Document};
use std::collections::BTreeMap;

/// Documents of one session, keyed by sequential id.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    docs: BTreeMap<DocId, Document>,
    next_seq: u32,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Store `text` under the next id (`doc1` first).
    pub fn insert(&mut self, source: impl Into<String>, text: impl Into<String>) -> DocId {
        self.next_seq += 1;
        let id = DocId::new(self.next_seq);
        self.docs.insert(id, Document { id, source: source.into(), text: text.into() });
        id
    }

    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(&id) }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Document> { self.docs.values() }

    /// `(id, text)` pairs in id order, the input shape of the index builder.
    pub fn texts(&self) -> impl Iterator<Item = (DocId, &str)> {
        self.docs.values().map(|d| (d.id, d.text.as_str()))
    }

    /// Drop every document; numbering restarts at `doc1`.
    pub fn clear(&mut self) {
        self.docs.clear();
        self.next_seq = 0;
    }
}
