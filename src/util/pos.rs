//! Board positions, the two play orientations, and premium squares.
//!
//! Coordinates are 1-indexed: `(1, 1)..=(15, 15)` are playable, while the
//! 0 and 16 rows and columns form a sentinel ring whose cross-check masks
//! are identically zero, so board walks can step off the playing area
//! without branching.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the stored board: 15 playable squares plus the sentinel ring.
pub const BOARD_LEN: usize = 17;

/// A board position `(x, y)` with `0..=16` on each axis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    x: u8,
    y: u8,
}

impl Pos {
    /// Creates a position. Both coordinates must be within the stored
    /// board, sentinels included.
    pub fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < BOARD_LEN && (y as usize) < BOARD_LEN);
        Self { x, y }
    }
    /// The centre square `(8, 8)`, which the first play must cover.
    pub fn centre() -> Self {
        Self { x: 8, y: 8 }
    }
    /// Checks whether this is the centre square.
    pub fn is_centre(self) -> bool {
        self == Self::centre()
    }
    /// Checks whether the position lies on the sentinel ring.
    pub fn is_edge(self) -> bool {
        self.x == 0 || self.y == 0 || self.x == 16 || self.y == 16
    }
    /// Checks whether the position is a playable square.
    pub fn on_board(self) -> bool {
        (1..=15).contains(&self.x) && (1..=15).contains(&self.y)
    }
    /// The x (column) coordinate.
    pub fn x(self) -> u8 {
        self.x
    }
    /// The y (row) coordinate.
    pub fn y(self) -> u8 {
        self.y
    }
    /// Steps one square backwards along `orient`. Must not be called on
    /// the leading sentinel of that axis.
    pub fn prev(self, orient: Orient) -> Self {
        match orient {
            Orient::Across => Self { x: self.x - 1, y: self.y },
            Orient::Down => Self { x: self.x, y: self.y - 1 },
        }
    }
    /// Steps one square forwards along `orient`. Must not be called on
    /// the trailing sentinel of that axis.
    pub fn next(self, orient: Orient) -> Self {
        match orient {
            Orient::Across => Self { x: self.x + 1, y: self.y },
            Orient::Down => Self { x: self.x, y: self.y + 1 },
        }
    }
    /// Index into a flat `BOARD_LEN x BOARD_LEN` array.
    pub(crate) fn index(self) -> usize {
        self.y as usize * BOARD_LEN + self.x as usize
    }
    /// Returns an iterator over the playable squares, column-major (the
    /// order the generator visits anchors in).
    pub fn iter() -> impl Iterator<Item = Pos> {
        (1..=15).flat_map(|x| (1..=15).map(move |y| Pos::new(x, y)))
    }
    /// Gets the premium of the square, if it carries one on a fresh
    /// board. The layout is the standard one, four-fold symmetric about
    /// the centre; the centre itself is a double-word square.
    pub fn premium(self) -> Option<Premium> {
        let delta_x = self.x.abs_diff(8);
        let delta_y = self.y.abs_diff(8);

        match (delta_x, delta_y) {
            (2, 2) | (2, 6) | (6, 2) => Some(Premium::TripleLetter),
            (0, 4) | (4, 0) | (1, 1) | (1, 5) | (5, 1) | (7, 4) | (4, 7) => {
                Some(Premium::DoubleLetter)
            }
            (7, 7) | (0, 7) | (7, 0) => Some(Premium::TripleWord),
            (a, b) if a == b => Some(Premium::DoubleWord),
            _ => None,
        }
    }
}
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
impl fmt::Debug for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos{}", self)
    }
}

/// The two axes a word can lie along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orient {
    /// Horizontal: the word advances in `+x`.
    Across,
    /// Vertical: the word advances in `+y`.
    Down,
}

impl Orient {
    /// Gets the perpendicular orientation.
    pub fn ortho(self) -> Self {
        match self {
            Orient::Across => Orient::Down,
            Orient::Down => Orient::Across,
        }
    }
    /// Index for per-orientation square state.
    pub(crate) fn index(self) -> usize {
        match self {
            Orient::Across => 0,
            Orient::Down => 1,
        }
    }
    /// Both orientations, in generator visiting order.
    pub fn iter() -> impl Iterator<Item = Orient> {
        [Orient::Across, Orient::Down].into_iter()
    }
    /// Parses the host convention: `h` for across, `v` for down.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'h' => Some(Orient::Across),
            'v' => Some(Orient::Down),
            _ => None,
        }
    }
    /// The host character for this orientation.
    pub fn as_char(self) -> char {
        match self {
            Orient::Across => 'h',
            Orient::Down => 'v',
        }
    }
}
impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Score bonus attached to certain squares. A premium applies only while
/// its square is empty; committing a tile consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Premium {
    /// Doubles the value of the tile placed on it.
    DoubleLetter,
    /// Triples the value of the tile placed on it.
    TripleLetter,
    /// Doubles the value of every word through it.
    DoubleWord,
    /// Triples the value of every word through it.
    TripleWord,
}

impl Premium {
    /// Gets the multiplier for a tile placed on a square with this
    /// premium.
    pub fn tile_multiplier(self) -> usize {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }
    /// Gets the multiplier for a word through a square with this premium.
    pub fn word_multiplier(self) -> usize {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }
    /// The character used for this premium in board dumps.
    pub fn symbol(self) -> char {
        match self {
            Premium::DoubleLetter => 'd',
            Premium::TripleLetter => 't',
            Premium::DoubleWord => 'D',
            Premium::TripleWord => 'T',
        }
    }
}
