use crate::corpus::{for_each_line, DocumentSource};
use crate::index::{PositionalIndex, PostingList};
use crate::tokenizer::tokenize;
use crate::{DocId, Position};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::ops::ControlFlow;

/// What to do when a document cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log a warning, skip the document (or the phrase) and keep going.
    #[default]
    Lenient,
    /// Abort on the first unreadable document.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub id: DocId,
    pub label: String,
    pub reason: String,
}

#[derive(Debug)]
pub struct BuildReport {
    pub index: PositionalIndex,
    /// Documents that were read successfully, including ones without tokens.
    pub documents: usize,
    pub tokens: u64,
    pub skipped: Vec<SkippedDocument>,
}

/// Streams documents line by line into a [`PositionalIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    policy: ReadPolicy,
    index: PositionalIndex,
    last_doc: Option<DocId>,
    documents: usize,
    tokens: u64,
    skipped: Vec<SkippedDocument>,
}

impl IndexBuilder {
    pub fn new(policy: ReadPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Build an index over every document of `source`, in its order.
    pub fn build<S: DocumentSource + ?Sized>(source: &S, policy: ReadPolicy) -> Result<BuildReport> {
        let mut builder = Self::new(policy);
        for doc in source.documents() {
            tracing::debug!(doc_id = doc.id, label = %doc.label, "processing");
            let added = source.open(doc.id).and_then(|reader| builder.add_document(doc.id, reader));
            if let Err(err) = added {
                builder.skip(doc.id, doc.label, err)?;
            }
        }
        Ok(builder.finish())
    }

    /// Tokenize one document and commit its positions.
    ///
    /// Postings are staged until the reader is exhausted, so a read error leaves
    /// the index untouched. Returns the number of tokens in the document.
    pub fn add_document<R: BufRead>(&mut self, doc_id: DocId, reader: R) -> io::Result<Position> {
        debug_assert!(self.last_doc.map_or(true, |last| last < doc_id), "doc ids must increase");
        let mut staged: BTreeMap<String, PostingList> = BTreeMap::new();
        let mut position: Position = 0;
        for_each_line(reader, |line| {
            for token in tokenize(line) {
                position += 1;
                staged.entry(token).or_default().push(position);
            }
            ControlFlow::Continue(())
        })?;

        self.index.commit_document(doc_id, staged);
        self.last_doc = Some(doc_id);
        self.documents += 1;
        self.tokens += u64::from(position);
        Ok(position)
    }

    /// Record a document that could not be read, or fail under [`ReadPolicy::Strict`].
    pub fn skip(&mut self, doc_id: DocId, label: String, err: io::Error) -> Result<()> {
        match self.policy {
            ReadPolicy::Strict => Err(err).with_context(|| format!("cannot read document {doc_id} ({label})")),
            ReadPolicy::Lenient => {
                tracing::warn!(doc_id, label = %label, error = %err, "skipping unreadable document");
                self.skipped.push(SkippedDocument { id: doc_id, label, reason: err.to_string() });
                Ok(())
            }
        }
    }

    pub fn finish(self) -> BuildReport {
        tracing::info!(
            documents = self.documents,
            skipped = self.skipped.len(),
            terms = self.index.term_count(),
            tokens = self.tokens,
            "positional index built"
        );
        BuildReport { index: self.index, documents: self.documents, tokens: self.tokens, skipped: self.skipped }
    }
}
