//! The board: a 15x15 playing grid inside a sentinel ring, each square
//! carrying the cross-check masks, cross scores and anchor flag the
//! generator searches against. The masks are rebuilt incrementally:
//! committing a play only re-stats the squares flanking the tiles it
//! placed.

use crate::{
    error::{EngineError, EngineResult},
    game::{play::Play, tile::Tile},
    util::{
        dawg::Dawg,
        pos::{Orient, Pos, Premium, BOARD_LEN},
    },
};
use std::fmt;

/// The cross-check mask of a square no perpendicular word constrains:
/// all 27 bits set. Bit 26, the blank, is never consulted (blanks are
/// expanded through rack letters during search), but keeping it set
/// distinguishes "unconstrained" from any computed mask.
pub const OPEN_MASK: u32 = 0x7ff_ffff;

/// Per-square state. `cross[o]` is the set of letters that may be placed
/// here without invalidating the resident block that adjoins this square
/// **along** `o`; `side[o]` is the sum of resident scores in that block.
/// A play along `o` therefore consults the `ortho(o)` entries.
#[derive(Debug, Clone, Copy)]
struct Square {
    tile: Option<Tile>,
    premium: Option<Premium>,
    cross: [u32; 2],
    side: [usize; 2],
    anchor: bool,
}

impl Square {
    fn empty() -> Self {
        Self {
            tile: None,
            premium: None,
            cross: [OPEN_MASK; 2],
            side: [0; 2],
            anchor: false,
        }
    }
    fn sentinel() -> Self {
        Self {
            cross: [0; 2],
            ..Self::empty()
        }
    }
}

/// The board. Mutated only by committing a validated play; the generator
/// reads it immutably.
#[derive(Debug, Clone)]
pub struct Board {
    squares: [Square; BOARD_LEN * BOARD_LEN],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board: interior squares unconstrained with their
    /// premiums in place, sentinel ring with zero cross-checks.
    pub fn new() -> Self {
        let mut squares = [Square::sentinel(); BOARD_LEN * BOARD_LEN];

        for pos in Pos::iter() {
            squares[pos.index()] = Square {
                premium: pos.premium(),
                ..Square::empty()
            };
        }

        Self { squares }
    }

    fn square(&self, pos: Pos) -> &Square {
        &self.squares[pos.index()]
    }
    fn square_mut(&mut self, pos: Pos) -> &mut Square {
        &mut self.squares[pos.index()]
    }

    /// The tile resident at `pos`, if any.
    pub fn tile_at(&self, pos: Pos) -> Option<Tile> {
        self.square(pos).tile
    }
    /// Checks whether a tile is resident at `pos`.
    pub fn has_tile(&self, pos: Pos) -> bool {
        self.square(pos).tile.is_some()
    }
    /// The premium still active at `pos` (consumed when a tile lands).
    pub fn premium_at(&self, pos: Pos) -> Option<Premium> {
        self.square(pos).premium
    }
    /// The cross-check mask at `pos` for the resident block along
    /// `orient`.
    pub fn cross(&self, pos: Pos, orient: Orient) -> u32 {
        self.square(pos).cross[orient.index()]
    }
    /// The summed resident scores of the block adjoining `pos` along
    /// `orient`.
    pub fn side(&self, pos: Pos, orient: Orient) -> usize {
        self.square(pos).side[orient.index()]
    }
    /// Checks whether `pos` is an anchor: empty and adjoining at least
    /// one resident tile.
    pub fn is_anchor(&self, pos: Pos) -> bool {
        self.square(pos).anchor
    }

    /// Validates `play` and, if it is legal, commits it.
    pub fn make_play(
        &mut self,
        play: &Play,
        dawg: &Dawg,
        first_move: bool,
    ) -> EngineResult<()> {
        self.validate(play, dawg, first_move)?;
        self.commit(play, dawg);
        Ok(())
    }

    /// Checks a play against the board, walking the word backwards from
    /// its last-letter position. Returns the first violation found; never
    /// mutates.
    pub fn validate(&self, play: &Play, dawg: &Dawg, first_move: bool) -> EngineResult<()> {
        let orient = play.orient();

        // the play may not run into a resident block on its far side
        if self.has_tile(play.pos().next(orient)) {
            return Err(EngineError::AbutsWord);
        }
        if !dawg.accepts(play.word().letters()) {
            return Err(EngineError::NotWord);
        }

        let mut new_letter = false;
        let mut crosses_centre = false;
        let mut has_anchor = false;

        let mut pos = play.pos();
        for tile in play.word().tiles().iter().rev() {
            if !pos.on_board() {
                return Err(EngineError::OffBoard);
            }
            let letter = tile.letter().ok_or(EngineError::BadLetter('_'))?;

            if self.is_anchor(pos) {
                has_anchor = true;
            }
            match self.tile_at(pos) {
                Some(resident) => {
                    let found = resident.letter().expect("resident tiles carry a letter");
                    if found != letter {
                        return Err(EngineError::WrongResident {
                            pos,
                            wanted: letter,
                            found,
                        });
                    }
                }
                None => {
                    new_letter = true;
                    if !first_move
                        && self.cross(pos, orient.ortho()) & (1 << letter.index()) == 0
                    {
                        return Err(EngineError::InvalidCrossWord { pos });
                    }
                }
            }
            if pos.is_centre() {
                crosses_centre = true;
            }
            pos = pos.prev(orient);
        }

        if first_move {
            if !crosses_centre {
                return Err(EngineError::MissedCentre);
            }
        } else if !has_anchor {
            return Err(EngineError::NotAttached);
        }
        // `pos` has walked one square past the first letter
        if self.has_tile(pos) {
            return Err(EngineError::AbutsWord);
        }
        if !new_letter {
            return Err(EngineError::NoNewTiles);
        }

        Ok(())
    }

    /// Commits a validated play: stamps the new tiles, then re-stats the
    /// squares flanking them, perpendicular at every new tile, and along
    /// the play axis at the ends of the completed block.
    fn commit(&mut self, play: &Play, dawg: &Dawg) {
        let orient = play.orient();

        let mut pos = play.pos();
        for &tile in play.word().tiles().iter().rev() {
            if !self.has_tile(pos) {
                let square = self.square_mut(pos);
                square.tile = Some(tile);
                square.premium = None;
                square.anchor = false;
                self.adjust(pos, orient.ortho(), dawg);
            }
            pos = pos.prev(orient);
        }

        let pos = pos.next(orient);
        self.adjust(pos, orient, dawg);
    }

    /// Finds the two empty (or sentinel) squares flanking the resident
    /// block through `pos` along `orient` and recomputes both.
    fn adjust(&mut self, pos: Pos, orient: Orient, dawg: &Dawg) {
        let mut after = pos;
        while self.has_tile(after) {
            after = after.next(orient);
        }
        let mut before = pos;
        while self.has_tile(before) {
            before = before.prev(orient);
        }

        self.recompute_square(before, orient, dawg);
        self.recompute_square(after, orient, dawg);
    }

    /// Rebuilds the cross-check mask, cross score and anchor flag at an
    /// empty square, from the resident blocks on either side of it along
    /// `orient`.
    fn recompute_square(&mut self, pos: Pos, orient: Orient, dawg: &Dawg) {
        if pos.is_edge() {
            return;
        }

        // the block before `pos`, read in play order, and its score
        let mut before_word = Vec::new();
        let mut score = 0;
        let mut walk = pos;
        while self.has_tile(walk.prev(orient)) {
            walk = walk.prev(orient);
        }
        while walk != pos {
            let tile = self.tile_at(walk).expect("walked over resident tiles");
            before_word.push(tile.letter().expect("resident tiles carry a letter"));
            score += tile.score();
            walk = walk.next(orient);
        }
        // the block after `pos`
        let mut after_word = Vec::new();
        let mut walk = pos.next(orient);
        while let Some(tile) = self.tile_at(walk) {
            after_word.push(tile.letter().expect("resident tiles carry a letter"));
            score += tile.score();
            walk = walk.next(orient);
        }

        if before_word.is_empty() && after_word.is_empty() {
            return;
        }

        let square = self.square_mut(pos);
        square.side[orient.index()] = score;
        square.anchor = true;

        let mut mask = 0u32;
        let node = dawg
            .traverse_from(dawg.root(), before_word.iter().copied())
            .expect("resident tiles spell a word prefix");
        for edge in dawg.edges(node) {
            let completes = match after_word.is_empty() {
                true => edge.is_terminal(),
                false => dawg.accepts_from(edge.node(), after_word.iter().copied()),
            };
            if completes {
                mask |= 1 << edge.letter().index();
            }
        }
        self.square_mut(pos).cross[orient.index()] = mask;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn header(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "   ")?;
            for x in 1..=15 {
                write!(f, "{:>2} ", x)?;
            }
            writeln!(f)
        }

        header(f)?;
        for y in 1..=15 {
            write!(f, "{:>2} ", y)?;
            for x in 1..=15 {
                let pos = Pos::new(x, y);
                let ch = match self.tile_at(pos) {
                    Some(tile) => {
                        char::from(tile.letter().expect("resident tiles carry a letter"))
                    }
                    None => match self.premium_at(pos) {
                        Some(premium) => premium.symbol(),
                        None => '.',
                    },
                };
                write!(f, " {} ", ch)?;
            }
            writeln!(f, "{:>2}", y)?;
        }
        header(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::tile::Letter, testing};

    fn bit(ch: char) -> u32 {
        1 << Letter::new(ch).unwrap().index()
    }

    fn quiet_board(dawg: &Dawg) -> Board {
        let mut board = Board::new();
        let play = Play::from_coords(8, 8, 'h', "quiet").unwrap();
        board.make_play(&play, dawg, true).unwrap();
        board
    }

    #[test]
    fn fresh_board_state() {
        let board = Board::new();

        for pos in Pos::iter() {
            assert!(!board.has_tile(pos));
            assert!(!board.is_anchor(pos));
            for o in Orient::iter() {
                assert_eq!(board.cross(pos, o), OPEN_MASK);
                assert_eq!(board.side(pos, o), 0);
            }
        }
        for i in 0..BOARD_LEN as u8 {
            for sentinel in [
                Pos::new(0, i),
                Pos::new(16, i),
                Pos::new(i, 0),
                Pos::new(i, 16),
            ] {
                assert_eq!(board.cross(sentinel, Orient::Across), 0);
                assert_eq!(board.cross(sentinel, Orient::Down), 0);
            }
        }
    }

    #[test]
    fn commit_stamps_tiles_and_consumes_premiums() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        let q = Pos::new(4, 8);
        assert_eq!(
            board.tile_at(q).and_then(|t| t.letter()),
            Letter::new('q')
        );
        // (4,8) held a double-letter premium; placement consumed it
        assert_eq!(board.premium_at(q), None);
        assert!(!board.is_anchor(q));
    }

    #[test]
    fn anchors_flag_empty_neighbours() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        for pos in Pos::iter() {
            let neighbours = [
                pos.prev(Orient::Across),
                pos.next(Orient::Across),
                pos.prev(Orient::Down),
                pos.next(Orient::Down),
            ];
            let expected = !board.has_tile(pos)
                && neighbours.into_iter().any(|n| board.has_tile(n));
            assert_eq!(board.is_anchor(pos), expected, "at {}", pos);
        }
    }

    #[test]
    fn cross_checks_match_the_lexicon() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        for pos in Pos::iter().filter(|&p| !board.has_tile(p)) {
            for o in Orient::iter() {
                // gather the resident block that placing a tile at `pos`
                // would join along `o`
                let mut letters = Vec::new();
                let mut walk = pos;
                while board.has_tile(walk.prev(o)) {
                    walk = walk.prev(o);
                }
                while walk != pos {
                    letters.push(board.tile_at(walk).unwrap().letter().unwrap());
                    walk = walk.next(o);
                }
                let placed_at = letters.len();
                let mut walk = pos.next(o);
                while let Some(tile) = board.tile_at(walk) {
                    letters.push(tile.letter().unwrap());
                    walk = walk.next(o);
                }

                if letters.is_empty() {
                    assert_eq!(board.cross(pos, o), OPEN_MASK, "at {}", pos);
                    continue;
                }

                for letter in Letter::iter() {
                    let mut with_letter = letters.clone();
                    with_letter.insert(placed_at, letter);
                    let expected = dawg.accepts(with_letter.into_iter());
                    let masked =
                        board.cross(pos, o) & (1 << letter.index()) != 0;
                    assert_eq!(masked, expected, "{} at {} {:?}", letter, pos, o);
                }
            }
        }
    }

    #[test]
    fn cross_scores_sum_the_block() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        // flanks of the whole word along the play axis
        assert_eq!(board.side(Pos::new(9, 8), Orient::Across), 14);
        assert_eq!(board.side(Pos::new(3, 8), Orient::Across), 14);
        // perpendicular flanks of single tiles
        assert_eq!(board.side(Pos::new(4, 7), Orient::Down), 10);
        assert_eq!(board.side(Pos::new(8, 9), Orient::Down), 1);
        // only the extension "quiets" is available after the final t
        assert_eq!(board.cross(Pos::new(9, 8), Orient::Across), bit('s'));
    }

    #[test]
    fn validate_rejects_each_violation() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        // a word ending just before the q abuts it
        let play = Play::from_coords(3, 8, 'h', "rat").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::AbutsWord)
        );
        // not in the lexicon
        let play = Play::from_coords(8, 12, 'h', "zzz").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::NotWord)
        );
        // resident mismatch: "rate" crossing the i of quiet
        let play = Play::from_coords(6, 10, 'v', "rate").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::WrongResident {
                pos: Pos::new(6, 8),
                wanted: Letter::new('a').unwrap(),
                found: Letter::new('i').unwrap(),
            })
        );
        // valid word, but the cross word "te" does not exist
        let play = Play::from_coords(5, 9, 'h', "ten").unwrap();
        assert!(matches!(
            board.validate(&play, &dawg, false),
            Err(EngineError::InvalidCrossWord { .. })
        ));
        // not attached to anything
        let play = Play::from_coords(3, 12, 'h', "rat").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::NotAttached)
        );
        // walking back off the left edge
        let play = Play::from_coords(2, 8, 'h', "quiet").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::OffBoard)
        );
        // replaying the resident word exactly hits no anchor (anchors
        // are empty squares), so it reads as unattached
        let play = Play::from_coords(8, 8, 'h', "quiet").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, false),
            Err(EngineError::NotAttached)
        );
    }

    #[test]
    fn first_move_must_cross_the_centre() {
        let dawg = testing::dawg();
        let board = Board::new();

        let play = Play::from_coords(3, 3, 'h', "ant").unwrap();
        assert_eq!(
            board.validate(&play, &dawg, true),
            Err(EngineError::MissedCentre)
        );
        let play = Play::from_coords(8, 8, 'h', "ant").unwrap();
        assert_eq!(board.validate(&play, &dawg, true), Ok(()));
    }

    #[test]
    fn validate_does_not_mutate() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);
        let before = board.to_string();

        let play = Play::from_coords(3, 8, 'h', "rat").unwrap();
        let _ = board.validate(&play, &dawg, false);
        assert_eq!(board.to_string(), before);
    }
}
