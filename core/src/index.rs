use crate::{DocId, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Positions of one term in one document, strictly increasing.
pub type PostingList = Vec<Position>;

/// term -> doc_id -> positions. Built once by [`crate::IndexBuilder`], read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalIndex {
    terms: BTreeMap<String, BTreeMap<DocId, PostingList>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub doc_id: DocId,
    pub positions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermStats {
    pub term: String,
    pub document_count: usize,
    pub documents: Vec<DocumentStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub term_count: usize,
    pub terms: Vec<TermStats>,
}

impl PositionalIndex {
    pub fn new() -> Self { Self::default() }

    pub fn term_count(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    pub fn contains_term(&self, term: &str) -> bool { self.terms.contains_key(term) }

    /// Number of documents containing `term`; 0 when the term is absent.
    pub fn document_count(&self, term: &str) -> usize {
        self.terms.get(term).map_or(0, BTreeMap::len)
    }

    /// Number of occurrences of `term` in `doc_id`; 0 when either is absent.
    pub fn position_count(&self, term: &str, doc_id: DocId) -> usize {
        self.posting_list(term, doc_id).map_or(0, <[Position]>::len)
    }

    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, PostingList>> {
        self.terms.get(term)
    }

    pub fn posting_list(&self, term: &str, doc_id: DocId) -> Option<&[Position]> {
        self.terms.get(term)?.get(&doc_id).map(Vec::as_slice)
    }

    /// Terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.keys().map(String::as_str)
    }

    pub fn stats(&self) -> IndexStats {
        let terms = self
            .terms
            .iter()
            .map(|(term, docs)| TermStats {
                term: term.clone(),
                document_count: docs.len(),
                documents: docs
                    .iter()
                    .map(|(&doc_id, positions)| DocumentStats { doc_id, positions: positions.len() })
                    .collect(),
            })
            .collect();
        IndexStats { term_count: self.terms.len(), terms }
    }

    /// Append the staged postings of one fully read document.
    ///
    /// Each staged list is in scan order and `doc_id` has not been committed before,
    /// so lists are stored as-is.
    pub(crate) fn commit_document(&mut self, doc_id: DocId, staged: BTreeMap<String, PostingList>) {
        for (term, positions) in staged {
            debug_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            self.terms.entry(term).or_default().entry(doc_id).or_default().extend(positions);
        }
    }
}
