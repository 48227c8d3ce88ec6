//! Arena-backed prefix tree of hyphenation patterns.
//!
//! Nodes live in a single `Vec` and refer to their children by index, so the
//! whole trie is one allocation plus one small map per node. Each node may
//! carry the point sequence of the pattern that ends there.

use rustc_hash::FxHashMap;

/// Index of a node inside a [`PatternTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
struct Node {
    children: FxHashMap<char, NodeId>,
    points: Option<Box<[u8]>>,
}

/// Prefix tree mapping pattern letters to their point sequences.
#[derive(Debug)]
pub struct PatternTrie {
    nodes: Vec<Node>,
    patterns: usize,
}

impl Default for PatternTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            patterns: 0,
        }
    }

    /// Store `points` at the node reached by `letters`, creating the path as needed.
    ///
    /// `points` has one entry per letter gap, i.e. `letters.len() + 1` entries.
    /// A pattern inserted twice keeps the last point sequence.
    pub fn insert(&mut self, letters: &[char], points: Vec<u8>) {
        debug_assert_eq!(points.len(), letters.len() + 1);

        let mut node = NodeId::ROOT;
        for &c in letters {
            node = match self.nodes[node.index()].children.get(&c) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len() as u32);
                    self.nodes.push(Node::default());
                    self.nodes[node.index()].children.insert(c, child);
                    child
                }
            };
        }

        let slot = &mut self.nodes[node.index()].points;
        if slot.is_none() {
            self.patterns += 1;
        }
        *slot = Some(points.into_boxed_slice());
    }

    /// Follow the edge labelled `c` out of `node`.
    #[inline]
    pub fn child(&self, node: NodeId, c: char) -> Option<NodeId> {
        self.nodes[node.index()].children.get(&c).copied()
    }

    /// Point sequence of the pattern ending at `node`, if any.
    #[inline]
    pub fn points(&self, node: NodeId) -> Option<&[u8]> {
        self.nodes[node.index()].points.as_deref()
    }

    /// Number of distinct patterns stored.
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Number of nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Merge every pattern matching a prefix of `text` into `acc`, starting at `offset`.
    ///
    /// Overlapping patterns keep the larger weight at each gap.
    pub fn apply(&self, text: &[char], offset: usize, acc: &mut [u8]) {
        let mut node = NodeId::ROOT;
        for &c in &text[offset..] {
            let Some(next) = self.child(node, c) else {
                break;
            };
            node = next;
            if let Some(points) = self.points(node) {
                for (j, &p) in points.iter().enumerate() {
                    let slot = &mut acc[offset + j];
                    *slot = (*slot).max(p);
                }
            }
        }
    }
}
