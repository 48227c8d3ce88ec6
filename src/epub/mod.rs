//! EPUB archive rewriting.
//!
//! An EPUB is a ZIP container. Hyphenation rewrites only its HTML/XHTML
//! content documents and copies every other entry unchanged.

mod rewrite;

pub use rewrite::{
    EntryAction, EntryReport, TransformReport, hyphenate_epub, hyphenate_epub_file,
};

/// Whether an archive entry is an HTML or XHTML content document, by extension.
///
/// ```
/// use epub_hyph::epub::is_content_document;
///
/// assert!(is_content_document("OEBPS/Text/chapter01.XHTML"));
/// assert!(!is_content_document("OEBPS/Images/cover.jpg"));
/// ```
pub fn is_content_document(name: &str) -> bool {
    let file_name = name.rsplit('/').next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("xhtml"),
        None => false,
    }
}
