use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod extract;
pub mod index;
pub mod query;
pub mod session;
pub mod store;
pub mod tokenizer;

pub use index::{build_inverted_index, InvertedIndex};
pub use query::{evaluate, Query};
pub use session::{BuildOutcome, QueryHit, Session};
pub use store::DocumentStore;

/// Number of characters of document text shown next to a query hit.
pub const PREVIEW_CHARS: usize = 200;

/// Session-scoped sequential document identifier, rendered as `doc1`, `doc2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DocId(u32);

impl DocId {
    pub fn new(seq: u32) -> Self { Self(seq) }

    pub fn seq(self) -> u32 { self.0 }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document id {0:?}, expected docN")]
pub struct ParseDocIdError(String);

impl FromStr for DocId {
    type Err = ParseDocIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("doc")
            .filter(|n| !n.is_empty() && !n.starts_with('0') && n.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|n| n.parse().ok())
            .map(DocId)
            .ok_or_else(|| ParseDocIdError(s.to_string()))
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self { id.to_string() }
}

impl TryFrom<String> for DocId {
    type Error = ParseDocIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: DocId,
    /// Where the text came from, usually the uploaded file name.
    pub source: String,
    pub text: String,
}

impl Document {
    /// The first [`PREVIEW_CHARS`] characters of the text.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_id_display_and_parse() {
        let id = DocId::new(12);
        assert_eq!(id.to_string(), "doc12");
        assert_eq!("doc12".parse::<DocId>().unwrap(), id);
    }

    #[test]
    fn doc_id_rejects_other_shapes() {
        for bad in ["doc", "12", "docx", "doc-1", "Doc1", "doc1 ", "doc0", "doc01", "doc007"] {
            assert!(bad.parse::<DocId>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn doc_ids_order_numerically() {
        assert!(DocId::new(2) < DocId::new(10));
    }

    #[test]
    fn preview_is_char_bounded() {
        let doc = Document { id: DocId::new(1), source: "a.pdf".into(), text: "é".repeat(300) };
        let preview = doc.preview();
        assert_eq!(preview.chars().count(), PREVIEW_CHARS);
        assert!(preview.chars().all(|c| c == 'é'));
    }
}
