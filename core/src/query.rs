//! Single-connective Boolean queries.
//!
//! A query is lowercased and classified by the first connective word it
//! contains, checked in the order `and`, `or`, `not`. The whole query is then
//! split on that connective alone, so `a and b or c` is an AND over
//! `a` and `b or c`. Queries without a connective match any of their words.

use crate::index::InvertedIndex;
use crate::tokenizer::words;
use crate::DocId;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Documents containing every term.
    And(Vec<String>),
    /// Documents containing at least one term.
    Or(Vec<String>),
    /// Parts split on ` not `. Only `[_, excluded]` removes anything, and the
    /// base set is every indexed document, not the documents matching the
    /// first part.
    Not(Vec<String>),
    /// No connective: documents containing any word.
    Terms(Vec<String>),
}

impl Query {
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        let tokens = words(&lowered);
        let has = |word: &str| tokens.iter().any(|t| t == word);
        let split = |sep: &str| -> Vec<String> {
            lowered.split(sep).map(|t| t.trim().to_string()).collect()
        };

        if has("and") {
            Query::And(split(" and "))
        } else if has("or") {
            Query::Or(split(" or "))
        } else if has("not") {
            Query::Not(split(" not "))
        } else {
            Query::Terms(tokens)
        }
    }

    pub fn evaluate(&self, index: &InvertedIndex) -> BTreeSet<DocId> {
        match self {
            Query::And(terms) => {
                let mut terms = terms.iter();
                let mut result = match terms.next() {
                    Some(first) => index.postings(first),
                    None => return BTreeSet::new(),
                };
                for term in terms {
                    let docs = index.postings(term);
                    result.retain(|id| docs.contains(id));
                }
                result
            }
            Query::Or(terms) | Query::Terms(terms) => {
                terms.iter().flat_map(|t| index.postings(t)).collect()
            }
            Query::Not(parts) => {
                let mut result = index.documents();
                if let [_, excluded] = parts.as_slice() {
                    for id in index.postings(excluded) {
                        result.remove(&id);
                    }
                }
                result
            }
        }
    }

    pub fn terms(&self) -> &[String] {
        match self {
            Query::And(t) | Query::Or(t) | Query::Not(t) | Query::Terms(t) => t,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = match self {
            Query::And(_) => "and",
            Query::Or(_) => "or",
            Query::Not(_) => "not",
            Query::Terms(_) => "terms",
        };
        f.write_str(form)
    }
}

/// Parse `raw` and evaluate it against `index`. Unknown terms match nothing.
pub fn evaluate(index: &InvertedIndex, raw: &str) -> BTreeSet<DocId> {
    let query = Query::parse(raw);
    let result = query.evaluate(index);
    tracing::debug!(query = raw, form = %query, hits = result.len(), "evaluated query");
    result
}
