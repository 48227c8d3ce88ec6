//! # epub-hyph
//!
//! Insert soft hyphens into the body text of EPUB books, using TeX
//! hyphenation patterns and Frank Liang's algorithm.
//!
//! ## Features
//!
//! - Reads standard TeX pattern files (`\patterns{...}`, `\hyphenation{...}`)
//! - Streams each HTML/XHTML document once, character by character
//! - Leaves markup, attributes and entities untouched
//! - Copies every other archive entry byte for byte
//!
//! ## Quick Start
//!
//! ```no_run
//! use epub_hyph::{hyphenate_epub_file, output_path, Dictionary, HyphenateOptions};
//! use std::path::Path;
//!
//! let dict = Dictionary::open("hyph-pl.tex")?;
//! let input = Path::new("book.epub");
//! hyphenate_epub_file(input, output_path(input), &dict, &HyphenateOptions::new())?;
//! # Ok::<(), epub_hyph::Error>(())
//! ```
//!
//! ## Hyphenating words and documents
//!
//! ```
//! use epub_hyph::{hyphenate_html_str, Dictionary, HyphenateOptions};
//!
//! let dict: Dictionary = "\\patterns{\n1k1\n1l\n2jk\n}\n".parse()?;
//! assert_eq!(dict.hyphenate("kolejka"), vec!["ko", "lej", "ka"]);
//!
//! let html = hyphenate_html_str("<body>kolejka</body>", &dict, &HyphenateOptions::new())?;
//! assert_eq!(html, "<body>ko&shy;lej&shy;ka</body>");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod epub;
pub mod error;
pub mod hyphen;
pub mod io;
pub mod options;
pub mod transform;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use epub::{EntryAction, EntryReport, TransformReport, hyphenate_epub, hyphenate_epub_file};
pub use error::{Error, PatternError, Result};
pub use hyphen::Dictionary;
pub use options::{HyphenateOptions, SoftHyphen};
pub use transform::html::{ScanStats, hyphenate_html, hyphenate_html_str};
pub use util::output_path;
