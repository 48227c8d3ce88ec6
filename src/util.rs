//! Path helpers.

use std::path::{Path, PathBuf};

/// Default output path for a hyphenated copy of `input`.
///
/// A `.1` version marker goes in front of the extension, so
/// `books/novel.epub` becomes `books/novel.1.epub`. Without an extension
/// the marker is appended.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use epub_hyph::output_path;
///
/// assert_eq!(output_path(Path::new("books/novel.epub")), Path::new("books/novel.1.epub"));
/// assert_eq!(output_path(Path::new("novel")), Path::new("novel.1"));
/// ```
pub fn output_path(input: &Path) -> PathBuf {
    match (input.file_stem(), input.extension()) {
        (Some(stem), Some(ext)) => {
            let mut name = stem.to_os_string();
            name.push(".1.");
            name.push(ext);
            input.with_file_name(name)
        }
        _ => {
            let mut name = input.as_os_str().to_os_string();
            name.push(".1");
            PathBuf::from(name)
        }
    }
}
