//! Line delimiter classification.
//!
//! `\r`, `\n` and `\r\n` all end a line. A `\r` immediately followed by `\n`
//! is one delimiter, never two, and that pairing is honoured across the one
//! character of lookaround an edit sees on each side.

use crate::enums::LineDelimiter;

pub const CR: char = '\r';
pub const LF: char = '\n';

/// Whether a boundary with `before` on its left and `at` on its right sits
/// strictly inside a `\r\n` pair.
#[inline]
#[must_use]
pub fn splits_pair(before: Option<char>, at: Option<char>) -> bool {
    before == Some(CR) && at == Some(LF)
}

/// Counts the delimiters in a run of characters.
#[must_use]
pub fn count_delimiters(run: &[char]) -> usize {
    let mut count = 0;
    let mut iter = run.iter().peekable();

    while let Some(&ch) = iter.next() {
        match ch {
            CR => {
                count += 1;

                if iter.peek() == Some(&&LF) {
                    iter.next();
                }
            }
            LF => count += 1,
            _ => {}
        }
    }

    count
}

/// Same as [`count_delimiters`] but over UTF-8 text, searching the bytes.
/// Both delimiters are ASCII so every byte hit is a real character.
#[must_use]
pub fn count_delimiters_in_str(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut count = 0;
    let mut paired_lf = None;

    for pos in memchr::memchr2_iter(b'\r', b'\n', bytes) {
        if paired_lf == Some(pos) {
            continue;
        }

        count += 1;

        if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
            paired_lf = Some(pos + 1);
        }
    }

    count
}

/// Splits `text` into line lengths measured in characters. Every length
/// includes its delimiter except the last, which has none (and may be 0).
#[must_use]
pub fn line_lengths(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut lengths = Vec::new();
    let mut line_start = 0usize;
    let mut paired_lf = None;

    for pos in memchr::memchr2_iter(b'\r', b'\n', bytes) {
        if paired_lf == Some(pos) {
            continue;
        }

        let mut line_end = pos + 1;

        if bytes[pos] == b'\r' && bytes.get(line_end) == Some(&b'\n') {
            paired_lf = Some(line_end);
            line_end += 1;
        }

        lengths.push(text[line_start..line_end].chars().count());
        line_start = line_end;
    }

    lengths.push(text[line_start..].chars().count());

    lengths
}

/// The delimiter a line ends with, if any.
#[must_use]
pub fn trailing_delimiter(line: &str) -> Option<LineDelimiter> {
    if line.ends_with("\r\n") {
        Some(LineDelimiter::CrLf)
    } else if line.ends_with(CR) {
        Some(LineDelimiter::Cr)
    } else if line.ends_with(LF) {
        Some(LineDelimiter::Lf)
    } else {
        None
    }
}

/// Result of scanning a run together with its one-character lookaround in
/// the unmodified buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelimiterScan {
    /// Delimiters represented in the run. A `\n` opening the run after a
    /// buffer `\r`, or a `\r` closing it before a buffer `\n`, still counts.
    pub count: usize,
    /// The run's start boundary falls between the `\r` and `\n` of a pair.
    pub splits_start: bool,
    /// The run's end boundary falls between the `\r` and `\n` of a pair.
    pub splits_end: bool,
}

impl DelimiterScan {
    /// `before` and `after` are the buffer characters just outside the run,
    /// `None` at the buffer edges.
    #[must_use]
    pub fn scan(before: Option<char>, run: &[char], after: Option<char>) -> Self {
        let first = run.first().copied().or(after);
        let last = run.last().copied().or(before);

        Self {
            count: count_delimiters(run),
            splits_start: splits_pair(before, first),
            splits_end: splits_pair(last, after),
        }
    }

    #[inline]
    #[must_use]
    pub fn splits_pair(&self) -> bool {
        self.splits_start || self.splits_end
    }
}
