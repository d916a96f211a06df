//! Scoring a play: letter and word premiums, perpendicular-word credit,
//! and the seven-tile bonus.

use crate::{
    game::{board::Board, rack::RACK_SIZE, tile::Tile, word::Word},
    util::pos::{Orient, Pos},
};

/// Bonus for playing the whole rack in one turn.
pub const BINGO_BONUS: usize = 50;

/// Scores placing `word` with its last letter at `pos` along `orient`.
///
/// A pure function of the board: it may be called before or after the
/// play commits, and repeated calls agree. The word is walked backwards
/// from `pos`. Resident squares contribute their stored (blank-aware)
/// score with no premium and no perpendicular credit; each newly placed
/// tile reads its square's premium and, where a perpendicular block
/// adjoins, closes that block's word and credits it.
pub fn score(word: &Word, pos: Pos, orient: Orient, board: &Board) -> usize {
    let mut pos = pos;
    let mut multiplier = 1;
    let mut word_score = 0;
    let mut cross_total = 0;
    let mut placed = 0;

    for tile in word.tiles().iter().rev() {
        let (mut letter_score, mut cross_score, premium) = match board.tile_at(pos) {
            Some(resident) => (resident.score(), 0, None),
            None => {
                placed += 1;
                (
                    tile.score(),
                    board.side(pos, orient.ortho()),
                    board.premium_at(pos),
                )
            }
        };

        let (tile_m, word_m) = match premium {
            Some(premium) => (premium.tile_multiplier(), premium.word_multiplier()),
            None => (1, 1),
        };

        letter_score *= tile_m;
        // a perpendicular word only forms where resident tiles adjoin
        if cross_score > 0 {
            cross_score += letter_score;
        }
        cross_score *= word_m;
        multiplier *= word_m;

        word_score += letter_score;
        cross_total += cross_score;
        pos = pos.prev(orient);
    }

    debug_assert!((1..=RACK_SIZE).contains(&placed));

    let mut total = word_score * multiplier + cross_total;
    if placed == RACK_SIZE {
        total += BINGO_BONUS;
    }
    total
}

/// The plain sum of a word's tile scores, with no board in play. The
/// first-move anagram search ranks candidates with this.
pub fn simple_score(word: &Word) -> usize {
    word.tiles().iter().map(Tile::score).sum()
}
