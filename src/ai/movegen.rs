//! The move generator: an anchor-square traversal of the board against
//! the lexicon.
//!
//! For every anchor and orientation the search builds a left part (fixed
//! by resident tiles, or drawn from the rack within a budget of free
//! squares), then extends rightwards through the cross-check masks,
//! passing over resident runs as it goes. All rack and word mutation is
//! balanced push/pop within the recursion; the board is never touched.

use crate::{
    game::{
        board::{Board, OPEN_MASK},
        play::Play,
        rack::Rack,
        tile::{Letter, Tile},
        word::Word,
    },
    util::{
        dawg::{Dawg, Edge, NodeId},
        pos::{Orient, Pos},
        scoring,
    },
};
use log::debug;

/// Finds a highest-scoring legal play for `rack`, or [`None`] if no play
/// exists. On the first move the board holds no anchors, so the search
/// degenerates to a rack anagram placed through the centre square; the
/// `good_enough` ceiling lets a caller accept the first play at or above
/// a target score instead of exhausting the search.
pub fn best_play(
    dawg: &Dawg,
    board: &Board,
    rack: &Rack,
    first_move: bool,
    good_enough: i32,
) -> Option<Play> {
    let mut search = Search {
        dawg,
        board,
        rack: rack.clone(),
        word: Word::new(),
        best: None,
        best_score: -1,
        good_enough,
    };

    match first_move {
        true => search.anagram(dawg.root()),
        false => search.anchors(),
    }

    if let Some(play) = &search.best {
        debug!("best play {} scoring {}", play, search.best_score);
    }
    search.best
}

/// The state of one generation pass: scratch copies of the rack and the
/// working word, and the best candidate so far.
struct Search<'a> {
    dawg: &'a Dawg,
    board: &'a Board,
    rack: Rack,
    word: Word,
    best: Option<Play>,
    best_score: i32,
    good_enough: i32,
}

impl Search<'_> {
    /// Visits every anchor x orientation pair whose perpendicular cross mask
    /// admits at least one letter.
    fn anchors(&mut self) {
        let board = self.board;

        for pos in Pos::iter() {
            for orient in Orient::iter() {
                if !board.is_anchor(pos) || board.cross(pos, orient.ortho()) == 0 {
                    continue;
                }
                self.word.clear();

                let left = pos.prev(orient);
                if board.has_tile(left) {
                    // the left part is fixed by the resident block
                    let mut start = left;
                    while board.has_tile(start) {
                        start = start.prev(orient);
                    }
                    let mut walk = start.next(orient);
                    while let Some(tile) = board.tile_at(walk) {
                        let letter = tile.letter().expect("resident tiles carry a letter");
                        self.word.push(Tile::Letter(letter));
                        walk = walk.next(orient);
                    }

                    let node = self
                        .dawg
                        .traverse_from(self.dawg.root(), self.word.letters())
                        .expect("resident tiles spell a word prefix");
                    self.extend_right(node, pos, orient);
                } else {
                    // count the free squares a rack-built left part may
                    // use: unconstrained in both orientations, so no
                    // resident tile is anywhere adjacent
                    let mut budget = 0;
                    let mut walk = left;
                    while board.cross(walk, orient) == OPEN_MASK
                        && board.cross(walk, orient.ortho()) == OPEN_MASK
                    {
                        budget += 1;
                        walk = walk.prev(orient);
                    }
                    self.left_part(self.dawg.root(), pos, budget, orient);
                }
            }
        }
    }

    /// Tries every rack-built left part up to `budget` tiles, calling
    /// [`Search::extend_right`] for each (the zero-length part first).
    /// At least one rack tile must be kept back for the anchor itself.
    fn left_part(&mut self, node: NodeId, anchor: Pos, budget: usize, orient: Orient) {
        self.extend_right(node, anchor, orient);

        if budget == 0 || self.rack.len() < 2 {
            return;
        }
        let dawg = self.dawg;
        for edge in dawg.edges(node) {
            let letter = edge.letter();
            if self.rack.has(Tile::blank()) {
                self.place(letter, true);
                self.left_part(edge.node(), anchor, budget - 1, orient);
                self.unplace();
            }
            if self.rack.has(Tile::Letter(letter)) {
                self.place(letter, false);
                self.left_part(edge.node(), anchor, budget - 1, orient);
                self.unplace();
            }
        }
    }

    /// Places every rack tile the square's cross mask admits, following
    /// the matching lexicon edges.
    fn extend_right(&mut self, node: NodeId, pos: Pos, orient: Orient) {
        debug_assert!(!self.board.has_tile(pos));

        if self.rack.is_empty() {
            return;
        }
        let dawg = self.dawg;
        let cross = self.board.cross(pos, orient.ortho());
        for edge in dawg.edges(node) {
            let letter = edge.letter();
            if cross & (1 << letter.index()) == 0 {
                continue;
            }
            if self.rack.has(Tile::blank()) {
                self.place(letter, true);
                self.place_step(edge, pos, orient);
                self.unplace();
            }
            if self.rack.has(Tile::Letter(letter)) {
                self.place(letter, false);
                self.place_step(edge, pos, orient);
                self.unplace();
            }
        }
    }

    /// A tile has just been placed at `pos`. Resident tiles beyond it
    /// are handled separately; otherwise report a word end and keep
    /// extending.
    fn place_step(&mut self, edge: Edge, pos: Pos, orient: Orient) {
        let next = pos.next(orient);

        if self.board.has_tile(next) {
            self.pass_over(edge.node(), next, orient);
            return;
        }
        if edge.is_terminal() {
            self.candidate(pos, orient);
        }
        self.extend_right(edge.node(), next, orient);
    }

    /// Follows a run of resident tiles through the lexicon, starting at
    /// resident square `pos`. If the run leaves the lexicon the branch
    /// dies silently; otherwise report a word end at the final resident
    /// tile and keep extending from the first empty square. The appended
    /// letters are unwound on the way out.
    fn pass_over(&mut self, node: NodeId, pos: Pos, orient: Orient) {
        let dawg = self.dawg;
        let board = self.board;
        let unwind_to = self.word.len();

        let mut node = node;
        let mut pos = pos;
        let mut last = None;
        while let Some(tile) = board.tile_at(pos) {
            let resident = tile.letter().expect("resident tiles carry a letter");
            match dawg.edge_with(node, resident) {
                Some(edge) => {
                    node = edge.node();
                    last = Some(edge);
                    self.word.push(Tile::Letter(resident));
                    pos = pos.next(orient);
                }
                // dead end; nothing has been disturbed
                None => {
                    self.word.truncate(unwind_to);
                    return;
                }
            }
        }

        let edge = last.expect("pass_over starts on a resident square");
        if edge.is_terminal() {
            self.candidate(pos.prev(orient), orient);
        }
        self.extend_right(node, pos, orient);
        self.word.truncate(unwind_to);
    }

    /// Remembers the highest-scoring candidate seen so far, under the
    /// good-enough ceiling: once the best play reaches the ceiling, no
    /// later candidate replaces it. This is the seam for a smarter
    /// selection policy (penalising plays that spend useful letters, or
    /// avoiding openings that hand a premium square to the opponent).
    fn candidate(&mut self, pos: Pos, orient: Orient) {
        debug_assert!(self.dawg.accepts(self.word.letters()));

        if self.best_score >= self.good_enough {
            return;
        }
        let score = scoring::score(&self.word, pos, orient, self.board) as i32;
        if score > self.best_score {
            self.best_score = score;
            self.best = Some(Play::new(self.word.clone(), pos, orient));
        }
    }

    /// The first-move search: a pure rack x lexicon anagram, ranked by
    /// plain tile scores, placed with its last letter on the centre
    /// square.
    fn anagram(&mut self, node: NodeId) {
        let dawg = self.dawg;
        for edge in dawg.edges(node) {
            let letter = edge.letter();
            if self.rack.has(Tile::Letter(letter)) {
                self.place(letter, false);
                if edge.is_terminal() {
                    let score = scoring::simple_score(&self.word) as i32;
                    if score > self.best_score {
                        self.best_score = score;
                        self.best =
                            Some(Play::new(self.word.clone(), Pos::centre(), Orient::Across));
                    }
                }
                if !self.rack.is_empty() {
                    self.anagram(edge.node());
                }
                self.unplace();
            }
        }
    }

    /// Moves a tile from the rack onto the working word.
    fn place(&mut self, letter: Letter, blank: bool) {
        let tile = match blank {
            true => Tile::Blank(Some(letter)),
            false => Tile::Letter(letter),
        };
        self.rack.remove_one(tile);
        self.word.push(tile);
    }
    /// Undoes the matching [`Search::place`].
    fn unplace(&mut self) {
        let tile = self.word.pop().expect("place and unplace are paired");
        self.rack.insert_one(tile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::DEFAULT_GOOD_ENOUGH, testing};

    fn quiet_board(dawg: &Dawg) -> Board {
        let mut board = Board::new();
        let play = Play::from_coords(8, 8, 'h', "quiet").unwrap();
        board.make_play(&play, dawg, true).unwrap();
        board
    }

    fn find(dawg: &Dawg, board: &Board, rack: &str, first_move: bool) -> Option<Play> {
        let rack: Rack = rack.parse().unwrap();
        best_play(dawg, board, &rack, first_move, DEFAULT_GOOD_ENOUGH)
    }

    #[test]
    fn first_move_plays_the_whole_rack_through_the_centre() {
        let dawg = testing::dawg();
        let board = Board::new();

        let play = find(&dawg, &board, "aeinrst", true).unwrap();
        assert_eq!(play.word().to_string(), "retains");
        assert_eq!(play.pos(), Pos::centre());
        assert_eq!(play.orient(), Orient::Across);
        assert_eq!(board.validate(&play, &dawg, true), Ok(()));
    }

    #[test]
    fn finds_the_only_extension() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        let play = find(&dawg, &board, "s", false).unwrap();
        assert_eq!(play.word().to_string(), "quiets");
        assert_eq!(play.pos(), Pos::new(9, 8));
        assert_eq!(play.orient(), Orient::Across);
    }

    #[test]
    fn spends_a_blank_when_nothing_else_fits() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        let play = find(&dawg, &board, "_", false).unwrap();
        assert_eq!(play.word().to_string(), "quiets_");
        assert_eq!(board.validate(&play, &dawg, false), Ok(()));
    }

    #[test]
    fn reports_no_move_when_nothing_fits() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        assert!(find(&dawg, &board, "iiuuuww", false).is_none());
        assert!(find(&dawg, &board, "", false).is_none());
        assert!(find(&dawg, &Board::new(), "", true).is_none());
    }

    #[test]
    fn generated_plays_always_validate() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);

        for rack in ["aest", "nart", "ei_u", "sssss"] {
            if let Some(play) = find(&dawg, &board, rack, false) {
                assert_eq!(
                    board.validate(&play, &dawg, false),
                    Ok(()),
                    "rack {rack:?} produced {play}"
                );
            }
        }
    }

    #[test]
    fn search_leaves_its_inputs_untouched() {
        let dawg = testing::dawg();
        let board = quiet_board(&dawg);
        let rack: Rack = "aest_".parse().unwrap();

        let board_before = board.to_string();
        let rack_before = rack.clone();
        let _ = best_play(&dawg, &board, &rack, false, DEFAULT_GOOD_ENOUGH);

        assert_eq!(board.to_string(), board_before);
        assert_eq!(rack, rack_before);
    }
}
