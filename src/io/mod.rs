//! Streaming input helpers.

mod char_reader;

pub use char_reader::CharReader;
