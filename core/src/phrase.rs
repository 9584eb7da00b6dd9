use crate::builder::ReadPolicy;
use crate::corpus::{for_each_line, DocumentSource};
use crate::search::MatchRecord;
use crate::tokenizer::words;
use crate::Position;
use anyhow::{Context, Result};
use std::io::{self, BufRead};
use std::ops::ControlFlow;

/// Literal words at positions `start..=end` of a document, joined by single spaces.
///
/// Positions are counted with the tokenizer's rules; words keep their original
/// case. Reading stops once `end` is reached. A document shorter than `end`
/// yields whatever was collected.
pub fn extract_phrase<R: BufRead>(reader: R, start: Position, end: Position) -> io::Result<String> {
    let mut phrase = String::new();
    let mut position: Position = 0;
    for_each_line(reader, |line| {
        for word in words(line) {
            position += 1;
            if position >= start {
                phrase.push_str(word);
                phrase.push(' ');
            }
            if position >= end {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    })?;
    Ok(phrase.trim().to_string())
}

/// Rebuilds the phrase for each match by reopening its document.
pub struct PhraseExtractor<'a, S: DocumentSource + ?Sized> {
    source: &'a S,
    policy: ReadPolicy,
}

impl<'a, S: DocumentSource + ?Sized> PhraseExtractor<'a, S> {
    pub fn new(source: &'a S, policy: ReadPolicy) -> Self {
        Self { source, policy }
    }

    /// `Ok(None)` when the document cannot be reread under [`ReadPolicy::Lenient`].
    pub fn phrase_for(&self, record: &MatchRecord) -> Result<Option<String>> {
        let phrase = self
            .source
            .open(record.doc_id)
            .and_then(|reader| extract_phrase(reader, record.first_pos, record.second_pos));
        match (phrase, self.policy) {
            (Ok(p), _) => Ok(Some(p)),
            (Err(err), ReadPolicy::Strict) => {
                let label = self.source.label(record.doc_id).unwrap_or_default();
                Err(err).with_context(|| format!("cannot reread document {} ({label})", record.doc_id))
            }
            (Err(err), ReadPolicy::Lenient) => {
                tracing::warn!(doc_id = record.doc_id, error = %err, "skipping phrase for unreadable document");
                Ok(None)
            }
        }
    }
}
