use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[A-Za-z]+").expect("valid regex");
}

/// Lowercased tokens of a single line, produced lazily from left to right.
/// Call [`tokenize`] again to rescan the line from the start.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: Words<'a>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(|w| w.to_ascii_lowercase())
    }
}

/// Maximal ASCII letter runs of a line with their original case.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    line: &'a str,
    at: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // The pattern never matches empty, so `at` always advances.
        let m = RE.find_at(self.line, self.at)?;
        self.at = m.end();
        Some(m.as_str())
    }
}

/// Tokenize one line: every maximal run of ASCII letters, lowercased.
/// Digits, punctuation, whitespace and non-ASCII characters only separate tokens.
pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens { inner: words(line) }
}

/// Same runs as [`tokenize`] without case folding, used to rebuild literal phrases.
pub fn words(line: &str) -> Words<'_> {
    Words { line, at: 0 }
}
