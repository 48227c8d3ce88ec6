//! WASM bindings for browser-based hyphenation.
//!
//! This module exposes the archive transform to JavaScript via wasm-bindgen.

use std::io::Cursor;
use wasm_bindgen::prelude::*;

use crate::epub::hyphenate_epub;
use crate::hyphen::Dictionary;
use crate::options::{HyphenateOptions, SoftHyphen};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Hyphenate an EPUB.
///
/// Takes raw EPUB bytes and the text of a TeX pattern file, returns the
/// rewritten EPUB bytes.
#[wasm_bindgen]
pub fn hyphenate_epub_bytes(epub: &[u8], patterns: &str) -> Result<Vec<u8>, JsValue> {
    hyphenate(epub, patterns, SoftHyphen::Entity)
}

/// Like [`hyphenate_epub_bytes`], but inserts literal U+00AD characters.
#[wasm_bindgen]
pub fn hyphenate_epub_bytes_unicode(epub: &[u8], patterns: &str) -> Result<Vec<u8>, JsValue> {
    hyphenate(epub, patterns, SoftHyphen::Character)
}

fn hyphenate(epub: &[u8], patterns: &str, marker: SoftHyphen) -> Result<Vec<u8>, JsValue> {
    let dict: Dictionary = patterns
        .parse()
        .map_err(|e: crate::error::PatternError| JsValue::from_str(&e.to_string()))?;
    let options = HyphenateOptions::new().with_marker(marker);

    let mut output = Cursor::new(Vec::new());
    hyphenate_epub(Cursor::new(epub), &mut output, &dict, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    Ok(output.into_inner())
}
