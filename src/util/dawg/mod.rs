//! The lexicon, held as a directed acyclic word graph in a flat array of
//! bit-packed edges.
//!
//! A node is the index of its first edge; a node's edges are contiguous
//! and the final one carries a last-edge flag. Node 0 is the universal
//! dead end (no outgoing edges). Edge 0 of the array is a reserved dead
//! entry and the root is node 1, so the packed file needs no separate
//! root field.

mod builder;

pub use builder::DawgBuilder;

use crate::{
    error::{EngineError, EngineResult},
    game::tile::Letter,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Identifies a node: the index of its first edge in the array. Node 0
/// means "no further extensions".
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// The dead-end node.
    pub const DEAD_END: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One labeled transition out of a node, packed into 32 bits:
///
/// | bit   | meaning                          |
/// |-------|----------------------------------|
/// | 31    | last edge of this node           |
/// | 30    | this letter completes a word     |
/// | 22-29 | letter                           |
/// | 0-21  | child node index                 |
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge(u32);

impl Edge {
    const LAST: u32 = 1 << 31;
    const TERMINAL: u32 = 1 << 30;
    const LETTER_SHIFT: u32 = 22;
    const LETTER_MASK: u32 = 0xff;
    /// Child indices are 22 bits wide; a dictionary must fit below this.
    pub(crate) const NODE_LIMIT: u32 = 1 << 22;

    pub(crate) fn new(letter: Letter, node: NodeId, terminal: bool, last: bool) -> Self {
        debug_assert!(node.0 < Self::NODE_LIMIT);
        let mut raw = ((letter.index() as u32) << Self::LETTER_SHIFT) | node.0;
        if terminal {
            raw |= Self::TERMINAL;
        }
        if last {
            raw |= Self::LAST;
        }
        Edge(raw)
    }
    pub(crate) fn dead() -> Self {
        Edge(Self::LAST)
    }
    /// Checks whether this is the final edge of its node.
    pub fn is_last(self) -> bool {
        self.0 & Self::LAST != 0
    }
    /// Checks whether the word ending with this edge's letter is in the
    /// lexicon.
    pub fn is_terminal(self) -> bool {
        self.0 & Self::TERMINAL != 0
    }
    /// The letter labelling this edge.
    pub fn letter(self) -> Letter {
        Letter::from(((self.0 >> Self::LETTER_SHIFT) & Self::LETTER_MASK) as usize)
    }
    /// The node this edge leads to.
    pub fn node(self) -> NodeId {
        NodeId(self.0 & (Self::NODE_LIMIT - 1))
    }
    fn raw_letter(self) -> u32 {
        (self.0 >> Self::LETTER_SHIFT) & Self::LETTER_MASK
    }
}

/// The lexicon. Built once (from a packed file or a [`DawgBuilder`]) and
/// immutable afterwards, so it can be shared read-only between engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dawg {
    edges: Vec<Edge>,
    root: NodeId,
}

impl Dawg {
    pub(crate) fn from_parts(edges: Vec<Edge>, root: NodeId) -> Self {
        Self { edges, root }
    }
    /// The root node, from which every word starts.
    pub fn root(&self) -> NodeId {
        self.root
    }
    /// The total number of edges, the reserved dead entry included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    /// Returns an iterator over the edges of `node` (none for the dead
    /// end).
    pub fn edges(&self, node: NodeId) -> Edges<'_> {
        Edges {
            edges: &self.edges,
            next: node.index(),
            done: node == NodeId::DEAD_END,
        }
    }
    /// Finds the edge of `node` labelled with `letter`.
    pub fn edge_with(&self, node: NodeId, letter: Letter) -> Option<Edge> {
        self.edges(node).find(|e| e.letter() == letter)
    }
    /// Follows `letters` from `node`, returning the node after the final
    /// letter, or [`None`] if some letter has no edge. The returned node
    /// may be the dead end (a word with no extensions).
    pub fn traverse_from(
        &self,
        node: NodeId,
        letters: impl IntoIterator<Item = Letter>,
    ) -> Option<NodeId> {
        let mut node = node;

        for letter in letters {
            node = self.edge_with(node, letter)?.node();
        }

        Some(node)
    }
    /// Checks whether `letters` spells a word when read from `node`: the
    /// whole sequence must match and the final edge must be terminal. An
    /// empty sequence is never a word.
    pub fn accepts_from(
        &self,
        node: NodeId,
        letters: impl IntoIterator<Item = Letter>,
    ) -> bool {
        let mut node = node;
        let mut last = None;

        for letter in letters {
            match self.edge_with(node, letter) {
                Some(edge) => {
                    node = edge.node();
                    last = Some(edge);
                }
                None => return false,
            }
        }

        last.map_or(false, Edge::is_terminal)
    }
    /// Checks whether `letters` is a word of the lexicon.
    pub fn accepts(&self, letters: impl IntoIterator<Item = Letter>) -> bool {
        self.accepts_from(self.root, letters)
    }
    /// Reads the packed binary form: a little-endian `u32` edge count,
    /// then that many little-endian `u32` edges.
    pub fn read_from(mut rdr: impl Read) -> EngineResult<Self> {
        let mut buf = [0u8; 4];
        let read_u32 = |rdr: &mut dyn Read, buf: &mut [u8; 4]| -> EngineResult<u32> {
            rdr.read_exact(buf)
                .map_err(|e| EngineError::Dictionary(e.to_string()))?;
            Ok(u32::from_le_bytes(*buf))
        };

        let count = read_u32(&mut rdr, &mut buf)?;
        let mut edges = Vec::with_capacity(count as usize);
        for _ in 0..count {
            edges.push(Edge(read_u32(&mut rdr, &mut buf)?));
        }

        for edge in &edges {
            if edge.node().0 >= count {
                return Err(EngineError::Dictionary(format!(
                    "edge child {} out of range",
                    edge.node().0
                )));
            }
            if edge.raw_letter() > 25 {
                return Err(EngineError::Dictionary(format!(
                    "edge letter {} out of range",
                    edge.raw_letter()
                )));
            }
        }

        let root = match count > 1 {
            true => NodeId(1),
            false => NodeId::DEAD_END,
        };

        Ok(Self { edges, root })
    }
    /// Writes the packed binary form consumed by [`Dawg::read_from`].
    pub fn write_to(&self, mut wtr: impl Write) -> std::io::Result<()> {
        wtr.write_all(&(self.edges.len() as u32).to_le_bytes())?;
        for edge in &self.edges {
            wtr.write_all(&edge.0.to_le_bytes())?;
        }
        Ok(())
    }
}

/// Iterator over the edges of a node, stopping after the edge that
/// carries the last-edge flag.
pub struct Edges<'a> {
    edges: &'a [Edge],
    next: usize,
    done: bool,
}

impl Iterator for Edges<'_> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        if self.done || self.next >= self.edges.len() {
            return None;
        }

        let edge = self.edges[self.next];
        self.next += 1;
        self.done = edge.is_last();
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().filter_map(Letter::new).collect()
    }

    #[test]
    fn accepts_every_inserted_word() {
        let dawg = testing::dawg();
        for word in testing::WORDS {
            assert!(dawg.accepts(letters(word)), "missing {word:?}");
        }
    }

    #[test]
    fn rejects_non_words() {
        let dawg = testing::dawg();
        for word in ["", "a", "zz", "qui", "antss", "teat"] {
            assert!(!dawg.accepts(letters(word)), "accepted {word:?}");
        }
    }

    #[test]
    fn traverses_prefixes() {
        let dawg = testing::dawg();

        // every prefix of a word reaches a node
        assert!(dawg.traverse_from(dawg.root(), letters("qui")).is_some());
        // a word with no extensions reaches the dead end
        assert_eq!(
            dawg.traverse_from(dawg.root(), letters("quiets")),
            Some(NodeId::DEAD_END)
        );
        // a non-prefix does not
        assert_eq!(dawg.traverse_from(dawg.root(), letters("zz")), None);
    }

    #[test]
    fn edge_iteration_honours_last_flag() {
        let dawg = testing::dawg();

        let root_letters: Vec<char> = dawg
            .edges(dawg.root())
            .map(|e| char::from(e.letter()))
            .collect();
        assert_eq!(
            root_letters,
            vec!['a', 'e', 'i', 'n', 'q', 'r', 's', 't', 'u']
        );
        assert_eq!(dawg.edges(NodeId::DEAD_END).count(), 0);
    }

    #[test]
    fn suffix_sharing_packs_tighter_than_the_word_list() {
        let dawg = testing::dawg();
        let total_letters: usize = testing::WORDS.iter().map(|w| w.len()).sum();

        assert!(dawg.edge_count() < total_letters);
    }

    #[test]
    fn binary_round_trip() {
        let dawg = testing::dawg();
        let mut bytes = Vec::new();
        dawg.write_to(&mut bytes).unwrap();

        let reread = Dawg::read_from(bytes.as_slice()).unwrap();
        assert_eq!(dawg, reread);
    }

    #[test]
    fn rejects_corrupt_data() {
        // truncated edge list
        let mut bytes = Vec::new();
        testing::dawg().write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() - 2);
        assert!(matches!(
            Dawg::read_from(bytes.as_slice()),
            Err(EngineError::Dictionary(_))
        ));

        // child index past the end of the array
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u32.to_le_bytes());
        bytes.extend_from_slice(&Edge::dead().0.to_le_bytes());
        bytes.extend_from_slice(&Edge::new(Letter::from(0), NodeId(1000), true, true).0.to_le_bytes());
        assert!(matches!(
            Dawg::read_from(bytes.as_slice()),
            Err(EngineError::Dictionary(_))
        ));
    }

    #[test]
    fn bincode_round_trip() {
        let dawg = testing::dawg();
        let bytes = bincode::serialize(&dawg).unwrap();
        let reread: Dawg = bincode::deserialize(&bytes).unwrap();

        assert_eq!(dawg, reread);
    }
}
