//! A play: a word, the position of its final letter, and an orientation.

use crate::{
    error::{EngineError, EngineResult},
    game::word::Word,
    util::pos::{Orient, Pos},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposed or generated play. `pos` names the square of the **last**
/// character of the word; earlier letters lie at successive `prev` steps
/// along `orient`. A play carries no score, as scoring is a pure function
/// of play and board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    word: Word,
    pos: Pos,
    orient: Orient,
}

impl Play {
    /// Creates a play from its parts.
    pub fn new(word: Word, pos: Pos, orient: Orient) -> Self {
        Self { word, pos, orient }
    }
    /// Parses the host convention: a 1-indexed column-first position of
    /// the word's last letter, `h`/`v`, and a word string with `_`
    /// marking blank-played letters.
    pub fn from_coords(x: u8, y: u8, orient: char, word: &str) -> EngineResult<Self> {
        if !(1..=15).contains(&x) || !(1..=15).contains(&y) {
            return Err(EngineError::OffBoard);
        }
        let orient = Orient::from_char(orient).ok_or(EngineError::BadOrient(orient))?;
        let word: Word = word.parse()?;

        Ok(Self {
            word,
            pos: Pos::new(x, y),
            orient,
        })
    }
    /// The word of the play.
    pub fn word(&self) -> &Word {
        &self.word
    }
    /// The position of the final letter of the word.
    pub fn pos(&self) -> Pos {
        self.pos
    }
    /// The orientation of the play.
    pub fn orient(&self) -> Orient {
        self.orient
    }
}
impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{}) {}",
            self.pos.x(),
            self.pos.y(),
            self.orient,
            self.word
        )
    }
}
