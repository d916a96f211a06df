//! The engine value a host owns, one per game: the board, a shared
//! handle on the lexicon, the first-move flag and the good-enough
//! ceiling, with the six operations the engine exposes.

use crate::{
    ai::movegen,
    error::{EngineError, EngineResult},
    game::{board::Board, play::Play, rack::Rack},
    util::{dawg::Dawg, scoring},
};
use log::debug;
use std::{io::Read, sync::Arc};

/// The default good-enough ceiling. Legal plays rarely exceed a few
/// hundred points, so the search never short-circuits by default.
pub const DEFAULT_GOOD_ENOUGH: i32 = 2000;

/// One game's worth of engine state. The dictionary is immutable and
/// shared; the board belongs to this engine alone and changes only when
/// a validated play commits.
#[derive(Debug, Clone)]
pub struct Engine {
    dawg: Arc<Dawg>,
    board: Board,
    first_move: bool,
    good_enough: i32,
}

impl Engine {
    /// Creates an engine with a fresh board over a shared lexicon.
    pub fn new(dawg: Arc<Dawg>) -> Self {
        Self {
            dawg,
            board: Board::new(),
            first_move: true,
            good_enough: DEFAULT_GOOD_ENOUGH,
        }
    }
    /// Creates an engine from a packed dictionary (see
    /// [`Dawg::read_from`] for the format).
    pub fn from_reader(rdr: impl Read) -> EngineResult<Self> {
        Ok(Self::new(Arc::new(Dawg::read_from(rdr)?)))
    }
    /// Clears the board back to the start of a game. The lexicon and the
    /// good-enough ceiling are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.first_move = true;
    }
    /// Sets the score at which the generator stops looking for anything
    /// better.
    pub fn set_good_enough(&mut self, ceiling: i32) {
        self.good_enough = ceiling;
    }
    /// The board, for inspection or display.
    pub fn board(&self) -> &Board {
        &self.board
    }
    /// The shared lexicon.
    pub fn dawg(&self) -> &Dawg {
        &self.dawg
    }
    /// Checks whether the next play would be the game's first.
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }
    /// Finds a best play for a rack given as a letter string (`_` for a
    /// blank). The board is not changed; commit the returned play with
    /// [`Engine::make_move`].
    pub fn find_move(&self, rack: &str) -> EngineResult<Play> {
        let rack: Rack = rack.parse()?;

        let play = movegen::best_play(
            &self.dawg,
            &self.board,
            &rack,
            self.first_move,
            self.good_enough,
        )
        .ok_or(EngineError::NoMove)?;

        debug!("rack {}: found {}", rack, play);
        Ok(play)
    }
    /// Validates a play and returns its score, without committing it.
    pub fn score_move(&self, play: &Play) -> EngineResult<usize> {
        self.board.validate(play, &self.dawg, self.first_move)?;
        Ok(scoring::score(
            play.word(),
            play.pos(),
            play.orient(),
            &self.board,
        ))
    }
    /// Validates a play and commits it to the board.
    pub fn make_move(&mut self, play: &Play) -> EngineResult<()> {
        self.board.make_play(play, &self.dawg, self.first_move)?;
        self.first_move = false;

        debug!("committed {}", play);
        Ok(())
    }
}
