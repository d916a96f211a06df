//! Letters and tiles, with their point values.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A letter `a..=z`, stored as an unsigned integer from `0..=25` to make
/// board and dictionary operations cheap.
#[derive(
    Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct Letter(u8);

impl Letter {
    /// Creates a letter from a `char`, returning [`None`] for anything
    /// outside the latin alphabet.
    pub fn new(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Letter(ch as u8 - b'a')),
            'A'..='Z' => Some(Letter(ch as u8 - b'A')),
            _ => None,
        }
    }
    /// The letter's position in the alphabet, `0..=25`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Returns an iterator over all 26 letters.
    pub fn iter() -> impl Iterator<Item = Letter> {
        (0..26).map(Letter::from)
    }
}
impl From<usize> for Letter {
    fn from(v: usize) -> Self {
        Self((v % 26) as u8)
    }
}
impl From<Letter> for usize {
    fn from(letter: Letter) -> Self {
        letter.0 as usize
    }
}
impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        (letter.0 + b'a') as char
    }
}
impl Display for Letter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}
impl fmt::Debug for Letter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", char::from(*self))
    }
}

/// A tile: one of the 26 letters, or a blank. A blank that has been played
/// carries the letter it stands for, but still scores zero; the two halves
/// of that representation feed dictionary traversal and scoring
/// respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// A natural letter tile.
    Letter(Letter),
    /// A blank, with the letter it was played as (if any).
    Blank(Option<Letter>),
}

impl From<Letter> for Tile {
    fn from(letter: Letter) -> Self {
        Self::Letter(letter)
    }
}
impl From<Tile> for usize {
    fn from(tile: Tile) -> Self {
        match tile {
            // a letter is from `0..=25`
            Tile::Letter(letter) => letter.index(),
            // a blank is `26`, however it was played
            Tile::Blank(_) => 26,
        }
    }
}
impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Letter(l) => write!(f, "{}", l),
            Tile::Blank(Some(l)) => write!(f, "{}_", l),
            Tile::Blank(None) => write!(f, "_"),
        }
    }
}
impl Tile {
    /// An unassigned blank tile.
    pub fn blank() -> Tile {
        Tile::Blank(None)
    }
    /// Checks whether `self` is a blank tile.
    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank(_))
    }
    /// The letter this tile plays as, [`None`] for an unassigned blank.
    pub fn letter(&self) -> Option<Letter> {
        match self {
            Tile::Letter(l) => Some(*l),
            Tile::Blank(opt) => *opt,
        }
    }
    /// Gets the score of the tile. Blanks score zero.
    pub fn score(&self) -> usize {
        const TILE_SCORES: [usize; 27] = [
            1,  // a
            3,  // b
            3,  // c
            2,  // d
            1,  // e
            4,  // f
            2,  // g
            4,  // h
            1,  // i
            8,  // j
            5,  // k
            1,  // l
            3,  // m
            1,  // n
            1,  // o
            3,  // p
            10, // q
            1,  // r
            1,  // s
            1,  // t
            1,  // u
            4,  // v
            4,  // w
            8,  // x
            4,  // y
            10, // z
            0,  // blank
        ];

        TILE_SCORES[usize::from(*self)]
    }
}
