//! Reader for TeX hyphenation pattern files (as published on tug.org/tex-hyphen).
//!
//! The format is line based:
//!
//! ```text
//! % comment
//! \patterns{
//! .ach4
//! a1bc3d4
//! }
//! \hyphenation{
//! as-so-ciate
//! }
//! ```
//!
//! Directives must stand alone on their line. Anything outside the two
//! blocks (e.g. `\message{...}`) is ignored.

use std::io::{self, BufRead, Read};

use bstr::ByteSlice;

use super::Dictionary;
use crate::error::PatternError;

/// Longest accepted line, in bytes, excluding the line terminator.
pub const MAX_LINE_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Neutral,
    Patterns,
    Exceptions,
}

impl Mode {
    fn directive(self) -> &'static str {
        match self {
            Mode::Neutral => "",
            Mode::Patterns => "\\patterns{",
            Mode::Exceptions => "\\hyphenation{",
        }
    }
}

pub(super) fn parse<R: BufRead>(mut reader: R) -> Result<Dictionary, PatternError> {
    let mut dict = Dictionary::empty();
    let mut mode = Mode::Neutral;
    let mut buf = Vec::with_capacity(128);
    let mut line_no = 0;

    loop {
        buf.clear();
        if !read_line(&mut reader, &mut buf)? {
            break;
        }
        line_no += 1;
        if buf.len() > MAX_LINE_LEN {
            return Err(PatternError::LineTooLong { line: line_no });
        }

        if let Some(comment) = memchr::memchr(b'%', &buf) {
            buf.truncate(comment);
        }
        let line = buf
            .to_str()
            .map_err(|_| PatternError::InvalidUtf8 { line: line_no })?
            .trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "\\patterns{" => mode = Mode::Patterns,
            "\\hyphenation{" => mode = Mode::Exceptions,
            "}" => mode = Mode::Neutral,
            _ => match mode {
                Mode::Patterns => {
                    let (letters, points) = parse_pattern(line);
                    dict.trie.insert(&letters, points);
                }
                Mode::Exceptions => {
                    let (word, points) = parse_exception(line);
                    dict.exceptions.insert(word, points.into_boxed_slice());
                }
                Mode::Neutral => {}
            },
        }
    }

    if mode != Mode::Neutral {
        return Err(PatternError::Unterminated {
            directive: mode.directive(),
        });
    }

    tracing::debug!(
        patterns = dict.pattern_count(),
        exceptions = dict.exception_count(),
        nodes = dict.node_count(),
        "parsed hyphenation patterns"
    );
    Ok(dict)
}

/// Read one line into `buf`, without its terminator. Returns `false` at end of input.
///
/// At most `MAX_LINE_LEN + 1` bytes are consumed per call, so an overlong
/// line is detected without buffering all of it.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    let read = reader
        .by_ref()
        .take(MAX_LINE_LEN as u64 + 1)
        .read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(true)
}

/// Split a pattern like `a1bc3d4` into its letters `abcd` and points `[0, 1, 0, 3, 4]`.
///
/// A digit applies to the gap in front of the next letter; the final entry is
/// the gap after the last letter. Only single-digit weights are supported.
fn parse_pattern(pattern: &str) -> (Vec<char>, Vec<u8>) {
    let mut letters = Vec::with_capacity(pattern.len());
    let mut points = Vec::with_capacity(pattern.len() + 1);
    let mut pending = 0u8;

    for c in pattern.chars() {
        if let Some(digit) = c.to_digit(10) {
            pending = digit as u8;
            continue;
        }
        points.push(pending);
        pending = 0;
        letters.push(c);
    }
    points.push(pending);

    (letters, points)
}

/// Split an exception like `as-so-ciate` into `associate` and its gap weights.
///
/// The weights have one entry per gap (`letters + 1`), index `k` being the gap
/// in front of letter `k`; a `-` marks that gap with 1.
fn parse_exception(entry: &str) -> (String, Vec<u8>) {
    let mut word = String::with_capacity(entry.len());
    let mut points = Vec::with_capacity(entry.len() + 1);
    points.push(0);

    for c in entry.chars() {
        if c == '-' {
            if let Some(last) = points.last_mut() {
                *last = 1;
            }
            continue;
        }
        word.push(c);
        points.push(0);
    }

    (word, points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> Result<Dictionary, PatternError> {
        parse(input.as_bytes())
    }

    #[test]
    fn test_parse_pattern_digits() {
        let (letters, points) = parse_pattern("a1bc3d4");
        assert_eq!(letters, vec!['a', 'b', 'c', 'd']);
        assert_eq!(points, vec![0, 1, 0, 3, 4]);
    }

    #[test]
    fn test_parse_pattern_boundary_markers() {
        let (letters, points) = parse_pattern(".ach4");
        assert_eq!(letters, vec!['.', 'a', 'c', 'h']);
        assert_eq!(points, vec![0, 0, 0, 0, 4]);

        let (letters, points) = parse_pattern("1k1");
        assert_eq!(letters, vec!['k']);
        assert_eq!(points, vec![1, 1]);
    }

    #[test]
    fn test_parse_exception_markers() {
        let (word, points) = parse_exception("as-so-ciate");
        assert_eq!(word, "associate");
        assert_eq!(points, vec![0, 0, 1, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(points.len(), word.len() + 1);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let dict = parse_str(
            "% header comment\n\n\\patterns{ % trailing comment\n  1k1   \n% skipped\n}\n",
        )
        .unwrap();
        assert_eq!(dict.pattern_count(), 1);
        assert_eq!(dict.exception_count(), 0);
    }

    #[test]
    fn test_lines_outside_blocks_are_ignored() {
        let dict = parse_str("\\message{Polish hyphenation}\nabc1d\n\\patterns{\nab1c\n}\nzz1z\n")
            .unwrap();
        assert_eq!(dict.pattern_count(), 1);
    }

    #[test]
    fn test_exception_key_keeps_case() {
        let dict = parse_str("\\hyphenation{\nTeX-nic\nas-so-ciate\n}\n").unwrap();
        assert_eq!(dict.exception_count(), 2);
        assert!(dict.exception("TeXnic").is_some());
        assert!(dict.exception("texnic").is_none());
        assert!(dict.exception("associate").is_some());
    }

    #[test]
    fn test_crlf_line_endings() {
        let dict = parse_str("\\patterns{\r\n1k1\r\n}\r\n").unwrap();
        assert_eq!(dict.pattern_count(), 1);
    }

    #[test]
    fn test_line_too_long() {
        let input = format!("\\patterns{{\n{}\n}}\n", "a".repeat(MAX_LINE_LEN + 1));
        match parse_str(&input) {
            Err(PatternError::LineTooLong { line }) => assert_eq!(line, 2),
            other => panic!("expected LineTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_line_at_limit_is_accepted() {
        let input = format!("% {}\n", "a".repeat(MAX_LINE_LEN - 2));
        assert!(parse_str(&input).is_ok());
    }

    #[test]
    fn test_unterminated_block() {
        match parse_str("\\patterns{\n1k1\n") {
            Err(PatternError::Unterminated { directive }) => assert_eq!(directive, "\\patterns{"),
            other => panic!("expected Unterminated, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let input: &[u8] = b"\\patterns{\n\xffk1\n}\n";
        assert!(matches!(
            parse(input),
            Err(PatternError::InvalidUtf8 { line: 2 })
        ));
    }

    #[test]
    fn test_io_error_propagates() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }
        let result = parse(io::BufReader::new(Failing));
        assert!(matches!(result, Err(PatternError::Io(_))));
    }
}
