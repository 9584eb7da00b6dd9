use crate::DocId;
use std::io::{self, BufRead};
use std::ops::ControlFlow;

/// A document as listed by a [`DocumentSource`]: its id and a label used for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: DocId,
    pub label: String,
}

/// Supplies the corpus in a fixed order and reopens documents by id.
///
/// The index builder reads every listed document once; the phrase extractor
/// reopens matched documents, so `open` must return the same text each time.
pub trait DocumentSource {
    /// Documents in processing order. Ids start at 1 and increase.
    fn documents(&self) -> Vec<DocumentRef>;

    fn open(&self, id: DocId) -> io::Result<Box<dyn BufRead + '_>>;

    fn label(&self, id: DocId) -> Option<String> {
        self.documents().into_iter().find(|d| d.id == id).map(|d| d.label)
    }
}

/// Corpus held in memory, mostly for tests and benches.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCorpus {
    docs: Vec<(String, Option<String>)>,
}

impl InMemoryCorpus {
    pub fn new() -> Self { Self::default() }

    /// Append a document and return its id.
    pub fn push(&mut self, label: impl Into<String>, text: impl Into<String>) -> DocId {
        self.docs.push((label.into(), Some(text.into())));
        self.docs.len() as DocId
    }

    /// Append a listed document whose content cannot be opened.
    pub fn push_missing(&mut self, label: impl Into<String>) -> DocId {
        self.docs.push((label.into(), None));
        self.docs.len() as DocId
    }
}

impl DocumentSource for InMemoryCorpus {
    fn documents(&self) -> Vec<DocumentRef> {
        self.docs
            .iter()
            .enumerate()
            .map(|(i, (label, _))| DocumentRef { id: i as DocId + 1, label: label.clone() })
            .collect()
    }

    fn open(&self, id: DocId) -> io::Result<Box<dyn BufRead + '_>> {
        let entry = (id as usize).checked_sub(1).and_then(|i| self.docs.get(i));
        match entry {
            Some((_, Some(text))) => Ok(Box::new(text.as_bytes())),
            Some((label, None)) => Err(io::Error::new(io::ErrorKind::NotFound, format!("{label} is not available"))),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no document with id {id}"))),
        }
    }

    fn label(&self, id: DocId) -> Option<String> {
        (id as usize).checked_sub(1).and_then(|i| self.docs.get(i)).map(|(l, _)| l.clone())
    }
}

/// Feed `f` one line at a time, without the line terminator.
///
/// Invalid UTF-8 is replaced rather than rejected: tokens are ASCII only, so the
/// token stream is unaffected. Returning `ControlFlow::Break` stops reading.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> io::Result<()>
where
    R: BufRead,
    F: FnMut(&str) -> ControlFlow<()>,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        let line = String::from_utf8_lossy(&buf);
        if f(&line).is_break() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_push_order() {
        let mut c = InMemoryCorpus::new();
        assert_eq!(c.push("a.txt", "x"), 1);
        assert_eq!(c.push_missing("b.txt"), 2);
        let docs = c.documents();
        assert_eq!(docs[1], DocumentRef { id: 2, label: "b.txt".into() });
        assert!(c.open(2).is_err());
        assert!(c.open(0).is_err());
        assert_eq!(c.label(1).as_deref(), Some("a.txt"));
    }

    #[test]
    fn lines_are_split_and_lossy() {
        let data: &[u8] = b"one\r\ntw\xffo\nthree";
        let mut lines = Vec::new();
        for_each_line(data, |l| {
            lines.push(l.to_string());
            ControlFlow::Continue(())
        })
        .unwrap();
        assert_eq!(lines, vec!["one", "tw\u{fffd}o", "three"]);
    }

    #[test]
    fn break_stops_reading() {
        let mut seen = 0;
        for_each_line("a\nb\nc\n".as_bytes(), |_| {
            seen += 1;
            if seen == 2 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
        })
        .unwrap();
        assert_eq!(seen, 2);
    }
}
