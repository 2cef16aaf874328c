use crate::tokenizer::tokenize;
use crate::DocId;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Token to the set of documents containing it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Posting set for `term`; empty when the term was never indexed.
    pub fn postings(&self, term: &str) -> BTreeSet<DocId> {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    /// Every document id appearing in at least one posting set.
    pub fn documents(&self) -> BTreeSet<DocId> {
        self.postings.values().flatten().copied().collect()
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<DocId>)> {
        self.postings.iter().map(|(term, docs)| (term.as_str(), docs))
    }
}

/// Build an index from scratch over `(id, text)` pairs. Never merges into a previous index.
pub fn build_inverted_index<'a, I>(docs: I) -> InvertedIndex
where
    I: IntoIterator<Item = (DocId, &'a str)>,
{
    let mut postings: HashMap<String, BTreeSet<DocId>> = HashMap::new();
    let mut num_docs = 0usize;
    for (doc_id, text) in docs {
        num_docs += 1;
        for term in tokenize(text) {
            postings.entry(term).or_default().insert(doc_id);
        }
    }
    tracing::debug!(num_docs, num_terms = postings.len(), "built inverted index");
    InvertedIndex { postings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(seqs: &[u32]) -> BTreeSet<DocId> {
        seqs.iter().map(|&n| DocId::new(n)).collect()
    }

    #[test]
    fn every_token_points_at_its_documents() {
        let docs = [(DocId::new(1), "apple banana"), (DocId::new(2), "banana cherry")];
        let index = build_inverted_index(docs);
        assert_eq!(index.postings("banana"), ids(&[1, 2]));
        assert_eq!(index.postings("apple"), ids(&[1]));
        assert_eq!(index.postings("cherry"), ids(&[2]));
        assert_eq!(index.num_terms(), 3);
    }

    #[test]
    fn repeated_token_in_one_document_is_one_posting() {
        let index = build_inverted_index([(DocId::new(1), "Go go GO")]);
        assert_eq!(index.postings("go"), ids(&[1]));
    }

    #[test]
    fn empty_input_gives_empty_index() {
        let index = build_inverted_index(std::iter::empty());
        assert!(index.is_empty());
        assert!(index.documents().is_empty());
    }

    #[test]
    fn documents_without_tokens_are_not_in_the_universe() {
        let index = build_inverted_index([(DocId::new(1), "word"), (DocId::new(2), "!!!")]);
        assert_eq!(index.documents(), ids(&[1]));
    }
}
