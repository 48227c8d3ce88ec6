//! Hyphenation using Frank Liang's pattern algorithm.
//!
//! A [`Dictionary`] is built once from a TeX pattern file and then only read.
//! For every word it answers where the word may be broken:
//!
//! ```
//! use epub_hyph::Dictionary;
//!
//! let dict: Dictionary = "\\patterns{\n1k1\n1l\n2jk\n}\n".parse()?;
//! assert_eq!(dict.hyphenate("kolejka"), vec!["ko", "lej", "ka"]);
//! assert_eq!(dict.hyphenate("ten"), vec!["ten"]);
//! # Ok::<(), epub_hyph::PatternError>(())
//! ```
//!
//! Patterns assign a weight to each gap between letters of a matching
//! substring. All matching patterns are overlaid and the largest weight wins
//! at each gap; odd weights allow a break, even weights forbid it.

mod patterns;
mod trie;

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::error::{Context, PatternError, Result};

pub use patterns::MAX_LINE_LEN;
pub use trie::{NodeId, PatternTrie};

/// Words up to this many characters are never hyphenated.
pub const SHORT_WORD_LEN: usize = 4;

/// Marks the start and end of a word in patterns such as `.ach4`.
const BOUNDARY: char = '.';

/// Parsed hyphenation patterns and exceptions for one language.
#[derive(Debug, Default)]
pub struct Dictionary {
    trie: PatternTrie,
    /// Whole words with explicit gap weights, keyed exactly as written in the file.
    exceptions: FxHashMap<String, Box<[u8]>>,
}

impl Dictionary {
    fn empty() -> Self {
        Self::default()
    }

    /// Parse a TeX hyphenation pattern file.
    pub fn parse<R: BufRead>(reader: R) -> std::result::Result<Self, PatternError> {
        patterns::parse(reader)
    }

    /// Load a TeX hyphenation pattern file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).context("cannot open hyphenation patterns")?;
        Ok(Self::parse(BufReader::new(file))?)
    }

    /// Number of patterns in the trie.
    pub fn pattern_count(&self) -> usize {
        self.trie.pattern_count()
    }

    /// Number of exception words.
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Number of trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Gap weights of an exception word, one per gap (`letters + 1`).
    pub fn exception(&self, word: &str) -> Option<&[u8]> {
        self.exceptions.get(word).map(|points| &points[..])
    }

    /// Break `word` at its hyphenation points.
    ///
    /// The returned fragments borrow from `word` and concatenate back to it.
    /// Words of at most [`SHORT_WORD_LEN`] characters come back whole.
    pub fn hyphenate<'w>(&self, word: &'w str) -> Vec<&'w str> {
        if word.chars().count() <= SHORT_WORD_LEN {
            return vec![word];
        }

        let folded: Vec<char> = word.chars().map(fold_case).collect();
        let key: String = folded.iter().collect();
        let gaps: Cow<'_, [u8]> = match self.exceptions.get(&key) {
            Some(points) => Cow::Borrowed(&points[..]),
            None => Cow::Owned(self.infer(&folded)),
        };

        let mut fragments = Vec::new();
        let mut start = 0;
        for (k, (idx, _)) in word.char_indices().enumerate().skip(1) {
            if gaps.get(k).is_some_and(|p| p % 2 == 1) {
                fragments.push(&word[start..idx]);
                start = idx;
            }
        }
        fragments.push(&word[start..]);
        fragments
    }

    /// Hyphenate `word` and join the fragments with `marker`.
    pub fn hyphenate_with(&self, word: &str, marker: &str) -> String {
        self.hyphenate(word).join(marker)
    }

    /// Gap weights for a lower-cased word from the pattern trie.
    ///
    /// Index `k` of the result is the gap in front of letter `k`; the two gaps
    /// at either edge of the word are always 0.
    fn infer(&self, folded: &[char]) -> Vec<u8> {
        let mut padded = Vec::with_capacity(folded.len() + 2);
        padded.push(BOUNDARY);
        padded.extend_from_slice(folded);
        padded.push(BOUNDARY);

        let mut points = vec![0u8; padded.len() + 1];
        for offset in 0..padded.len() {
            self.trie.apply(&padded, offset, &mut points);
        }

        // No hyphens after the first letter or before the last one.
        let n = points.len();
        points[1] = 0;
        points[2] = 0;
        points[n - 2] = 0;
        points[n - 3] = 0;

        // Drop the gap in front of the leading boundary marker and the one
        // after the trailing marker.
        points[1..n - 1].to_vec()
    }
}

impl FromStr for Dictionary {
    type Err = PatternError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

/// Lower-case a single character, keeping it as-is when its lowercase form
/// is not a single character.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PATTERNS: &str = r"% test patterns
\patterns{
1k1
1l
2jk
}
\hyphenation{
as-so-ciate
}
";

    fn dict() -> Dictionary {
        PATTERNS.parse().unwrap()
    }

    /// Breaks between any two letters, so only the edge rule limits splitting.
    fn eager_dict() -> Dictionary {
        let mut src = String::from("\\patterns{\n");
        for c in 'a'..='z' {
            src.push_str(&format!("1{c}1\n"));
        }
        src.push_str("}\n");
        src.parse().unwrap()
    }

    #[test]
    fn test_trie_hyphenation() {
        assert_eq!(dict().hyphenate("kolejka"), vec!["ko", "lej", "ka"]);
    }

    #[test]
    fn test_short_word_unsplit() {
        assert_eq!(dict().hyphenate("ten"), vec!["ten"]);
        assert_eq!(eager_dict().hyphenate("abcd"), vec!["abcd"]);
    }

    #[test]
    fn test_short_word_counts_characters() {
        // Four characters, eight bytes.
        assert_eq!(eager_dict().hyphenate("żółw"), vec!["żółw"]);
    }

    #[test]
    fn test_exception_word() {
        assert_eq!(dict().hyphenate("associate"), vec!["as", "so", "ciate"]);
    }

    #[test]
    fn test_exception_lookup_is_lowercased() {
        assert_eq!(dict().hyphenate("Associate"), vec!["As", "so", "ciate"]);
    }

    #[test]
    fn test_exception_overrides_trie() {
        let trie_only: Dictionary = "\\patterns{\n1c1\n1s1\n}\n".parse().unwrap();
        assert_eq!(
            trie_only.hyphenate("associate"),
            vec!["as", "s", "o", "c", "iate"]
        );

        let src = format!("{PATTERNS}\\patterns{{\n1c1\n1s1\n}}\n");
        let dict: Dictionary = src.parse().unwrap();
        assert_eq!(dict.hyphenate("associate"), vec!["as", "so", "ciate"]);
    }

    #[test]
    fn test_case_preserved_in_fragments() {
        assert_eq!(dict().hyphenate("KOLEJKA"), vec!["KO", "LEJ", "KA"]);
    }

    #[test]
    fn test_multibyte_letters() {
        let dict = eager_dict();
        let fragments = dict.hyphenate("abcdę");
        assert_eq!(fragments.concat(), "abcdę");
        assert_eq!(fragments, vec!["ab", "c", "dę"]);
    }

    #[test]
    fn test_edge_gaps_never_break() {
        assert_eq!(eager_dict().hyphenate("abcde"), vec!["ab", "c", "de"]);
    }

    #[test]
    fn test_boundary_patterns() {
        let dict: Dictionary = "\\patterns{\n.ko1\n}\n".parse().unwrap();
        assert_eq!(dict.hyphenate("kolano"), vec!["ko", "lano"]);
        assert_eq!(dict.hyphenate("makolo"), vec!["makolo"]);
    }

    #[test]
    fn test_hyphenate_with_marker() {
        assert_eq!(dict().hyphenate_with("kolejka", "&shy;"), "ko&shy;lej&shy;ka");
        assert_eq!(dict().hyphenate_with("ten", "&shy;"), "ten");
    }

    #[test]
    fn test_empty_word() {
        assert_eq!(dict().hyphenate(""), vec![""]);
    }

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case('Ż'), 'ż');
        assert_eq!(fold_case('a'), 'a');
        // 'İ' lowercases to two characters.
        assert_eq!(fold_case('İ'), 'İ');
    }

    proptest! {
        #[test]
        fn prop_fragments_concatenate_to_word(word in "\\PC{0,16}") {
            prop_assert_eq!(eager_dict().hyphenate(&word).concat(), word.clone());
            prop_assert_eq!(dict().hyphenate(&word).concat(), word);
        }

        #[test]
        fn prop_short_words_are_whole(word in "[a-zA-Zżółęą]{0,4}") {
            prop_assert_eq!(eager_dict().hyphenate(&word), vec![word.as_str()]);
        }

        #[test]
        fn prop_no_break_at_word_edges(word in "[a-z]{5,16}") {
            let fragments = eager_dict().hyphenate(&word);
            let first = fragments[0].chars().count();
            let last = fragments[fragments.len() - 1].chars().count();
            prop_assert!(first >= 2, "first fragment too short: {:?}", fragments);
            prop_assert!(last >= 2, "last fragment too short: {:?}", fragments);
        }
    }
}
