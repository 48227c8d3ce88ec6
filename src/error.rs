//! Error types for epub-hyph operations.

use std::io;

use thiserror::Error;
use zip::result::ZipError;

/// Errors raised while loading a TeX hyphenation pattern file.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("line {line}: line too long")]
    LineTooLong { line: usize },

    #[error("line {line}: invalid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("unexpected end of file inside {directive} block")]
    Unterminated { directive: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that can occur while hyphenating a document or an archive.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid hyphenation patterns: {0}")]
    Patterns(#[from] PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{context}: {source}")]
    IoContext {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Zip {
        context: &'static str,
        #[source]
        source: ZipError,
    },

    #[error("invalid UTF-8 code in input at byte {offset}")]
    InvalidEncoding { offset: u64 },

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("cannot hyphenate {name}: {source}")]
    Entry {
        name: String,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Attach a short description of the failed operation to a lower-level error.
pub trait Context<T> {
    fn context(self, context: &'static str) -> Result<T>;
}

impl<T> Context<T> for io::Result<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| Error::IoContext { context, source })
    }
}

impl<T> Context<T> for zip::result::ZipResult<T> {
    fn context(self, context: &'static str) -> Result<T> {
        self.map_err(|source| Error::Zip { context, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_prefixes_message() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone")).context("cannot open input epub");
        assert_eq!(err.unwrap_err().to_string(), "cannot open input epub: gone");
    }

    #[test]
    fn test_entry_error_names_entry() {
        let err = Error::Entry {
            name: "OEBPS/ch1.xhtml".to_string(),
            source: Box::new(Error::InvalidEncoding { offset: 12 }),
        };
        assert_eq!(
            err.to_string(),
            "cannot hyphenate OEBPS/ch1.xhtml: invalid UTF-8 code in input at byte 12"
        );
    }
}
