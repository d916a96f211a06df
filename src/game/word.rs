//! The word buffer used by the generator and by plays: an ordered run of
//! tiles, each knowing whether a blank plays it.

use crate::{
    error::{EngineError, EngineResult},
    game::tile::{Letter, Tile},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// An ordered sequence of up to 15 tiles. The generator grows and shrinks
/// a single `Word` as it recurses; every `push` is paired with a `pop` (or
/// covered by a `truncate`) on the way back out.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    tiles: Vec<Tile>,
}

impl Word {
    /// Creates an empty word.
    pub fn new() -> Self {
        Self::default()
    }
    /// The number of tiles in the word.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    /// Checks whether the word holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    /// Appends a tile.
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }
    /// Removes and returns the final tile.
    pub fn pop(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }
    /// Shortens the word to `len` tiles, unwinding a run of pushes.
    pub fn truncate(&mut self, len: usize) {
        self.tiles.truncate(len);
    }
    /// Empties the word.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
    /// The tiles of the word, in order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
    /// The letters of the word, in order. Unassigned blanks (which a
    /// well-formed word never holds) are skipped.
    pub fn letters(&self) -> impl Iterator<Item = Letter> + '_ {
        self.tiles.iter().filter_map(Tile::letter)
    }
}

impl FromStr for Word {
    type Err = EngineError;

    /// Parses the host convention: lowercase letters, each optionally
    /// followed by `_` to mark that a blank plays it (`qu_een` plays
    /// q, blank-as-u, e, e, n).
    fn from_str(s: &str) -> EngineResult<Self> {
        let mut tiles = Vec::new();
        let mut chars = s.chars().peekable();

        while let Some(ch) = chars.next() {
            let letter = Letter::new(ch).ok_or(EngineError::BadLetter(ch))?;

            if chars.peek() == Some(&'_') {
                chars.next();
                tiles.push(Tile::Blank(Some(letter)));
            } else {
                tiles.push(Tile::Letter(letter));
            }
        }

        Ok(Self { tiles })
    }
}
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for s in ["quiet", "qu_een", "a_b_c_", "x"] {
            let word: Word = s.parse().unwrap();
            assert_eq!(word.to_string(), s);
        }
    }

    #[test]
    fn parses_blank_markers() {
        let word: Word = "qu_een".parse().unwrap();
        let u = Letter::new('u').unwrap();

        assert_eq!(word.len(), 5);
        assert_eq!(word.tiles()[1], Tile::Blank(Some(u)));
        assert_eq!(
            word.letters().map(char::from).collect::<String>(),
            "queen"
        );
    }

    #[test]
    fn rejects_bad_characters() {
        assert_eq!(
            "qu!et".parse::<Word>(),
            Err(EngineError::BadLetter('!'))
        );
        // a marker with no letter before it is not a word
        assert_eq!(
            "_ab".parse::<Word>(),
            Err(EngineError::BadLetter('_'))
        );
    }

    #[test]
    fn push_pop_balance() {
        let mut word: Word = "ear".parse().unwrap();
        let len = word.len();

        word.push(Tile::Letter(Letter::new('n').unwrap()));
        assert_eq!(word.to_string(), "earn");
        word.truncate(len);
        assert_eq!(word.to_string(), "ear");
    }
}
