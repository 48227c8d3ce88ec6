//! Content transforms applied to archive entries
//!
//! - HTML: soft-hyphen insertion in body text

pub mod html;
