//! Incremental DAWG construction from a sorted word list.
//!
//! Words are inserted in alphabetical order; once a word can no longer
//! share a prefix with anything still to come, its tail is merged into a
//! register of unique suffix subtrees. `build` then flattens the live
//! states into the packed edge array.

use crate::{
    game::tile::Letter,
    util::dawg::{Dawg, Edge, NodeId},
};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

#[derive(Debug)]
struct State {
    terminal: bool,
    transitions: BTreeMap<Letter, u32>,
}

/// Builds a [`Dawg`] from words inserted in alphabetical order.
#[derive(Debug)]
pub struct DawgBuilder {
    states: HashMap<u32, State>,
    register: HashSet<u32>,
    previous: Vec<Letter>,
    next_id: u32,
}

impl Default for DawgBuilder {
    fn default() -> Self {
        let mut states = HashMap::new();

        states.insert(
            0,
            State {
                terminal: false,
                transitions: BTreeMap::new(),
            },
        );

        Self {
            states,
            register: HashSet::new(),
            previous: Vec::new(),
            next_id: 1,
        }
    }
}

impl DawgBuilder {
    /// Inserts a word. Words must arrive in alphabetical order;
    /// characters outside the alphabet are skipped.
    pub fn insert(&mut self, word: &str) {
        let seq: Vec<_> = word.chars().filter_map(Letter::new).collect();
        if seq.is_empty() {
            return;
        }
        debug_assert!(self.previous <= seq, "words must be inserted in order");

        let prefix_len = common_prefix_len(&self.previous, &seq);
        let last_state = self.walk(&seq[..prefix_len]);

        self.replace_or_register(last_state);
        self.add_suffix(last_state, &seq[prefix_len..]);
        self.previous = seq;
    }
    /// Consumes the builder, producing the packed edge array.
    pub fn build(mut self) -> Dawg {
        self.replace_or_register(0);
        self.flatten()
    }

    fn state(&self, id: u32) -> &State {
        &self.states[&id]
    }
    fn state_mut(&mut self, id: u32) -> &mut State {
        self.states.get_mut(&id).expect("state to be present")
    }
    /// Follows an existing path from the initial state.
    fn walk(&self, prefix: &[Letter]) -> u32 {
        let mut id = 0;
        for letter in prefix {
            id = self.state(id).transitions[letter];
        }
        id
    }
    /// Appends a fresh branch below `id`.
    fn add_suffix(&mut self, id: u32, suffix: &[Letter]) {
        let mut id = id;

        for &letter in suffix {
            let new_id = self.next_id;
            self.next_id += 1;
            self.states.insert(
                new_id,
                State {
                    terminal: false,
                    transitions: BTreeMap::new(),
                },
            );
            self.state_mut(id).transitions.insert(letter, new_id);
            id = new_id;
        }

        self.state_mut(id).terminal = true;
    }
    /// Merges the most recent branch below `id` into the register,
    /// replacing any subtree that duplicates an already-registered one.
    fn replace_or_register(&mut self, id: u32) {
        let newest = self
            .state(id)
            .transitions
            .iter()
            .next_back()
            .map(|(&letter, &child)| (letter, child));

        if let Some((letter, child)) = newest {
            self.replace_or_register(child);

            let identical = self
                .register
                .iter()
                .copied()
                .find(|&registered| self.states_eq(registered, child));

            match identical {
                Some(registered) => {
                    self.state_mut(id).transitions.insert(letter, registered);
                    self.states.remove(&child);
                }
                None => {
                    self.register.insert(child);
                }
            }
        }
    }
    /// Recursively checks whether two states accept the same language.
    fn states_eq(&self, a: u32, b: u32) -> bool {
        if a == b {
            return true;
        }

        let a_state = self.state(a);
        let b_state = self.state(b);

        a_state.terminal == b_state.terminal
            && a_state.transitions.len() == b_state.transitions.len()
            && a_state.transitions.keys().eq(b_state.transitions.keys())
            && a_state
                .transitions
                .values()
                .zip(b_state.transitions.values())
                .all(|(&a_child, &b_child)| self.states_eq(a_child, b_child))
    }
    /// Lays the remaining states out as the flat edge array. States with
    /// no outgoing transitions collapse onto the dead-end node 0; every
    /// other state gets a contiguous, letter-ordered block, the initial
    /// state first (so the root is node 1).
    fn flatten(self) -> Dawg {
        let mut starts: HashMap<u32, u32> = HashMap::new();
        let mut order = Vec::new();
        let mut next_index = 1u32;

        let mut queue = VecDeque::from([0u32]);
        let mut seen = HashSet::from([0u32]);
        while let Some(id) = queue.pop_front() {
            let state = self.state(id);
            if !state.transitions.is_empty() {
                starts.insert(id, next_index);
                order.push(id);
                next_index += state.transitions.len() as u32;
            }
            for &child in state.transitions.values() {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        assert!(
            next_index < Edge::NODE_LIMIT,
            "dictionary too large for 22-bit node indices"
        );

        let mut edges = vec![Edge::dead(); next_index as usize];
        for id in order {
            let state = self.state(id);
            let start = starts[&id] as usize;
            let count = state.transitions.len();

            for (offset, (&letter, &child)) in state.transitions.iter().enumerate() {
                let child_state = self.state(child);
                let node = match child_state.transitions.is_empty() {
                    true => NodeId::DEAD_END,
                    false => NodeId(starts[&child]),
                };
                edges[start + offset] =
                    Edge::new(letter, node, child_state.terminal, offset + 1 == count);
            }
        }

        let root = match edges.len() > 1 {
            true => NodeId(1),
            false => NodeId::DEAD_END,
        };

        Dawg::from_parts(edges, root)
    }
}

fn common_prefix_len(a: &[Letter], b: &[Letter]) -> usize {
    a.iter().zip(b).take_while(|&(a, b)| a == b).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> Vec<Letter> {
        s.chars().filter_map(Letter::new).collect()
    }

    #[test]
    fn empty_builder_accepts_nothing() {
        let dawg = DawgBuilder::default().build();

        assert_eq!(dawg.root(), NodeId::DEAD_END);
        assert!(!dawg.accepts(letters("a")));
    }

    #[test]
    fn prefixes_are_not_words_unless_inserted() {
        let mut builder = DawgBuilder::default();
        builder.insert("ant");
        builder.insert("ants");
        let dawg = builder.build();

        assert!(dawg.accepts(letters("ant")));
        assert!(dawg.accepts(letters("ants")));
        assert!(!dawg.accepts(letters("an")));
        assert!(!dawg.accepts(letters("antss")));
    }

    #[test]
    fn shares_suffixes() {
        let mut builder = DawgBuilder::default();
        for word in ["bat", "bats", "cat", "cats", "hat", "hats"] {
            builder.insert(word);
        }
        let dawg = builder.build();

        for word in ["bat", "bats", "cat", "cats", "hat", "hats"] {
            assert!(dawg.accepts(letters(word)));
        }
        // b/c/h branch from the root onto one shared "at(s)" tail:
        // 3 + 1 + 1 + 1 edges, plus the reserved dead entry.
        assert_eq!(dawg.edge_count(), 7);
    }
}
