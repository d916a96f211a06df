//! The error and result types for the library.

use crate::{game::tile::Letter, util::pos::Pos};
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// The [`Result`] type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// The error type for engine operations. Play-validation variants keep
/// the coordinates they were detected at, so the reason shown to the
/// host pinpoints the offending square.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineError {
    /// A letter of the play falls outside the 15x15 playing area.
    OffBoard,
    /// The square just before or just after the play holds a tile, so the
    /// word as stated is only part of a longer block.
    AbutsWord,
    /// The play's word is not in the lexicon.
    NotWord,
    /// The play runs over a resident tile that holds a different letter.
    WrongResident {
        /// Square holding the mismatched tile.
        pos: Pos,
        /// Letter the play expects there.
        wanted: Letter,
        /// Letter actually resident there.
        found: Letter,
    },
    /// A placed letter would form an invalid perpendicular word.
    InvalidCrossWord {
        /// Square failing its cross-check.
        pos: Pos,
    },
    /// The first play of a game must cover the centre square.
    MissedCentre,
    /// After the first play, every play must touch an existing word.
    NotAttached,
    /// The play places no new tiles.
    NoNewTiles,
    /// A rack or word string held a character outside `a-z` / `_`.
    BadLetter(char),
    /// An orientation character other than `h` or `v`.
    BadOrient(char),
    /// The generator exhausted the search without finding a legal play.
    NoMove,
    /// The dictionary data source was unreadable or corrupt.
    Dictionary(String),
}

impl Error for EngineError {}
impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::OffBoard => write!(f, "off the edge"),
            EngineError::AbutsWord => write!(f, "abuts another word"),
            EngineError::NotWord => write!(f, "not a word"),
            EngineError::WrongResident { pos, wanted, found } => {
                write!(f, "wanted {}, got {} at {}", wanted, found, pos)
            }
            EngineError::InvalidCrossWord { pos } => {
                write!(f, "invalid cross word at {}", pos)
            }
            EngineError::MissedCentre => {
                write!(f, "first move doesn't touch the centre square")
            }
            EngineError::NotAttached => write!(f, "not attached to another word"),
            EngineError::NoNewTiles => write!(f, "adds no letters"),
            EngineError::BadLetter(ch) => write!(f, "invalid letter {:?}", ch),
            EngineError::BadOrient(ch) => {
                write!(f, "invalid orientation {:?} (expected 'h' or 'v')", ch)
            }
            EngineError::NoMove => write!(f, "no legal move"),
            EngineError::Dictionary(reason) => write!(f, "dictionary: {}", reason),
        }
    }
}
