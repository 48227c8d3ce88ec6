//! Configuration for a hyphenation run.

/// How break points are written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum SoftHyphen {
    /// The `&shy;` character entity.
    #[default]
    Entity,
    /// A literal U+00AD SOFT HYPHEN.
    Character,
}

impl SoftHyphen {
    /// Text inserted between word fragments.
    pub fn as_str(self) -> &'static str {
        match self {
            SoftHyphen::Entity => "&shy;",
            SoftHyphen::Character => "\u{00AD}",
        }
    }
}

/// Options shared by the document scanner and the archive transformer.
///
/// # Example
///
/// ```
/// use epub_hyph::{HyphenateOptions, SoftHyphen};
///
/// let options = HyphenateOptions::new().with_marker(SoftHyphen::Character);
/// assert_eq!(options.marker.as_str(), "\u{ad}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HyphenateOptions {
    pub marker: SoftHyphen,
}

impl HyphenateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(mut self, marker: SoftHyphen) -> Self {
        self.marker = marker;
        self
    }
}
