use std::io::BufRead;

use crate::error::{Error, Result};

/// Decodes UTF-8 from a buffered byte stream one character at a time.
///
/// Malformed input is an error rather than a replacement character: a
/// document that is not valid UTF-8 must not be rewritten.
pub struct CharReader<R> {
    inner: R,
    offset: u64,
}

impl<R: BufRead> CharReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, offset: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Decode the next character, or `None` at end of input.
    pub fn next_char(&mut self) -> Result<Option<char>> {
        let buf = self.inner.fill_buf()?;
        if buf.is_empty() {
            return Ok(None);
        }

        let width = sequence_width(buf[0]);
        if buf.len() >= width {
            let (ch, size) = bstr::decode_utf8(buf);
            return match ch {
                Some(c) => {
                    self.inner.consume(size);
                    self.offset += size as u64;
                    Ok(Some(c))
                }
                None => Err(Error::InvalidEncoding {
                    offset: self.offset,
                }),
            };
        }

        // The sequence straddles the end of the buffer.
        let mut seq = [0u8; 4];
        let mut len = 0;
        while len < width {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                break;
            }
            let take = (width - len).min(buf.len());
            seq[len..len + take].copy_from_slice(&buf[..take]);
            self.inner.consume(take);
            len += take;
        }

        match bstr::decode_utf8(&seq[..len]) {
            (Some(c), size) if size == len => {
                self.offset += size as u64;
                Ok(Some(c))
            }
            _ => Err(Error::InvalidEncoding {
                offset: self.offset,
            }),
        }
    }
}

/// Length of the UTF-8 sequence introduced by `lead`; 1 for bytes that cannot start one.
fn sequence_width(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}
