//! Streaming soft-hyphen insertion for HTML/XHTML documents.
//!
//! This is a small state machine, not an HTML parser: it copies markup
//! through untouched and only rewrites runs of letters that appear after
//! the opening `<body>` tag. Each run is hyphenated with a [`Dictionary`]
//! and the fragments are joined with the configured soft hyphen marker.
//!
//! Soft hyphens already present as `&shy;` are removed before the word is
//! hyphenated again, so running the transform twice gives the same output.
//!
//! Not handled: comments, CDATA, `<script>`/`<style>` content and markup
//! recovery.

use std::io::{self, BufReader, BufWriter, Read, Write};
use std::ops::AddAssign;

use crate::error::Result;
use crate::hyphen::Dictionary;
use crate::io::CharReader;
use crate::options::HyphenateOptions;

/// Longest entity name accepted between `&` and `;`.
const MAX_ENTITY_LEN: usize = 32;

/// Only this much of a tag is kept for the `<body>` check.
const MAX_TAG_PREFIX: usize = 64;

/// Counters for one scanned document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ScanStats {
    /// Letter runs found in body text.
    pub words: u64,
    /// Runs that were split into more than one fragment.
    pub hyphenated_words: u64,
    /// Soft hyphens written.
    pub soft_hyphens: u64,
    /// Pre-existing `&shy;` entities dropped.
    pub removed_soft_hyphens: u64,
}

impl AddAssign for ScanStats {
    fn add_assign(&mut self, other: Self) {
        self.words += other.words;
        self.hyphenated_words += other.hyphenated_words;
        self.soft_hyphens += other.soft_hyphens;
        self.removed_soft_hyphens += other.removed_soft_hyphens;
    }
}

/// Hyphenate the body text of one HTML document.
///
/// Reads UTF-8 from `reader` and writes the transformed document to
/// `writer`. Everything except letter runs in body text (and `&shy;`
/// entities inside them) is copied byte for byte.
///
/// # Errors
///
/// Fails with [`Error::InvalidEncoding`](crate::Error::InvalidEncoding) on
/// malformed UTF-8 and with an I/O error if reading or writing fails. Output
/// written before the failure is not rolled back.
pub fn hyphenate_html<R: Read, W: Write>(
    reader: R,
    writer: W,
    dict: &Dictionary,
    options: &HyphenateOptions,
) -> Result<ScanStats> {
    let mut input = CharReader::new(BufReader::new(reader));
    let mut scanner = Scanner::new(dict, options.marker.as_str(), BufWriter::new(writer));

    while let Some(c) = input.next_char()? {
        scanner.feed(c)?;
    }

    let stats = scanner.finish()?;
    tracing::debug!(
        bytes = input.offset(),
        words = stats.words,
        hyphenated = stats.hyphenated_words,
        "scanned document"
    );
    Ok(stats)
}

/// Hyphenate an in-memory HTML document.
///
/// # Example
///
/// ```
/// use epub_hyph::{hyphenate_html_str, Dictionary, HyphenateOptions};
///
/// let dict: Dictionary = "\\patterns{\n1k1\n1l\n2jk\n}\n".parse()?;
/// let html = hyphenate_html_str("<body><p>kolejka</p></body>", &dict, &HyphenateOptions::new())?;
/// assert_eq!(html, "<body><p>ko&shy;lej&shy;ka</p></body>");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn hyphenate_html_str(
    html: &str,
    dict: &Dictionary,
    options: &HyphenateOptions,
) -> Result<String> {
    let mut out = Vec::with_capacity(html.len() + html.len() / 8);
    hyphenate_html(html.as_bytes(), &mut out, dict, options)?;
    Ok(String::from_utf8(out)?)
}

/// Whether the inside of a tag (between `<` and `>`) opens the body.
///
/// Accepts an optional single namespace prefix (`h:body`) and any case.
pub fn is_body_tag(tag: &str) -> bool {
    fn name_end(s: &str) -> usize {
        s.find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(s.len())
    }

    let tag = tag.trim_start();
    let (name, rest) = tag.split_at(name_end(tag));
    let local = match name.split_once(':') {
        Some((_, "")) => {
            let rest = rest.trim_start();
            &rest[..name_end(rest)]
        }
        Some((_, local)) => local,
        None => name,
    };
    local.eq_ignore_ascii_case("body")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the body: everything is copied.
    Outside,
    /// Inside a tag before the body.
    Tag,
    /// Body text: letters collect into the pending word.
    Body,
    /// Inside a tag within the body.
    TagInBody,
    /// Between `&` and `;` within the body.
    EntityInBody,
}

struct Scanner<'a, W: Write> {
    dict: &'a Dictionary,
    marker: &'static str,
    out: W,
    state: State,
    word: String,
    tag: String,
    entity: String,
    stats: ScanStats,
}

impl<'a, W: Write> Scanner<'a, W> {
    fn new(dict: &'a Dictionary, marker: &'static str, out: W) -> Self {
        Self {
            dict,
            marker,
            out,
            state: State::Outside,
            word: String::with_capacity(128),
            tag: String::with_capacity(MAX_TAG_PREFIX),
            entity: String::with_capacity(MAX_ENTITY_LEN),
            stats: ScanStats::default(),
        }
    }

    fn feed(&mut self, c: char) -> io::Result<()> {
        match self.state {
            State::Outside => self.outside(c),
            State::Tag => self.in_tag(c),
            State::Body => self.body(c),
            State::TagInBody => self.tag_in_body(c),
            State::EntityInBody => self.entity_in_body(c),
        }
    }

    fn outside(&mut self, c: char) -> io::Result<()> {
        if c == '<' {
            self.state = State::Tag;
            self.tag.clear();
        }
        self.emit(c)
    }

    fn in_tag(&mut self, c: char) -> io::Result<()> {
        if c == '>' {
            self.state = if is_body_tag(&self.tag) {
                State::Body
            } else {
                State::Outside
            };
            self.tag.clear();
        } else if self.tag.len() < MAX_TAG_PREFIX {
            self.tag.push(c);
        }
        self.emit(c)
    }

    fn body(&mut self, c: char) -> io::Result<()> {
        if c.is_alphabetic() {
            self.word.push(c);
            return Ok(());
        }
        match c {
            '&' => {
                self.state = State::EntityInBody;
                self.entity.clear();
                Ok(())
            }
            '<' => {
                self.state = State::TagInBody;
                self.flush_word()?;
                self.emit(c)
            }
            _ => {
                self.flush_word()?;
                self.emit(c)
            }
        }
    }

    fn tag_in_body(&mut self, c: char) -> io::Result<()> {
        if c == '>' {
            self.state = State::Body;
        }
        self.emit(c)
    }

    fn entity_in_body(&mut self, c: char) -> io::Result<()> {
        if c == ';' {
            self.state = State::Body;
            if self.entity == "shy" {
                // The word continues and is hyphenated as a whole.
                self.stats.removed_soft_hyphens += 1;
                self.entity.clear();
                return Ok(());
            }
            self.flush_word()?;
            self.out.write_all(b"&")?;
            self.out.write_all(self.entity.as_bytes())?;
            self.entity.clear();
            return self.out.write_all(b";");
        }

        if (c.is_ascii_alphanumeric() || c == '#') && self.entity.len() < MAX_ENTITY_LEN {
            self.entity.push(c);
            return Ok(());
        }

        // A bare ampersand: write it back out and treat `c` as body text.
        self.state = State::Body;
        self.flush_unterminated_entity()?;
        self.body(c)
    }

    fn flush_unterminated_entity(&mut self) -> io::Result<()> {
        self.flush_word()?;
        self.out.write_all(b"&")?;
        self.out.write_all(self.entity.as_bytes())?;
        self.entity.clear();
        Ok(())
    }

    /// Write the pending word, hyphenated, and clear it.
    fn flush_word(&mut self) -> io::Result<()> {
        if self.word.is_empty() {
            return Ok(());
        }

        let fragments = self.dict.hyphenate(&self.word);
        self.stats.words += 1;
        if fragments.len() > 1 {
            self.stats.hyphenated_words += 1;
            self.stats.soft_hyphens += fragments.len() as u64 - 1;
            tracing::trace!(word = %self.word, fragments = fragments.len(), "hyphenated");
        }

        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                self.out.write_all(self.marker.as_bytes())?;
            }
            self.out.write_all(fragment.as_bytes())?;
        }
        self.word.clear();
        Ok(())
    }

    fn emit(&mut self, c: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.out.write_all(c.encode_utf8(&mut buf).as_bytes())
    }

    /// Flush the pending word and any buffered output at end of input.
    fn finish(mut self) -> io::Result<ScanStats> {
        if self.state == State::EntityInBody {
            self.flush_unterminated_entity()?;
        } else {
            self.flush_word()?;
        }
        self.out.flush()?;
        Ok(self.stats)
    }
}
