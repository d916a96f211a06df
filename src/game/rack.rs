//! The player's rack, a multiset of up to seven tiles.

use crate::{
    error::{EngineError, EngineResult},
    game::tile::Tile,
};
use std::{fmt, iter::repeat, str::FromStr};

/// The maximum number of tiles a rack holds.
pub const RACK_SIZE: usize = 7;

/// A rack, stored as a count per tile: one slot per letter plus one for
/// blanks, with the total cached. The generator owns a scratch clone and
/// removes and re-inserts tiles around each recursive step, so the
/// caller's rack is never disturbed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rack {
    counts: [u8; 27],
    len: usize,
}

impl Rack {
    /// The number of tiles on the rack.
    pub fn len(&self) -> usize {
        self.len
    }
    /// Checks whether the rack is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// The number of copies of `tile` on the rack (blanks count as one
    /// kind, whatever letter they may later play).
    pub fn count(&self, tile: Tile) -> usize {
        self.counts[usize::from(tile)] as usize
    }
    /// Checks whether at least one copy of `tile` is on the rack.
    pub fn has(&self, tile: Tile) -> bool {
        self.count(tile) > 0
    }
    /// Removes one copy of `tile`. The rack must hold one.
    pub(crate) fn remove_one(&mut self, tile: Tile) {
        debug_assert!(self.has(tile));
        self.counts[usize::from(tile)] -= 1;
        self.len -= 1;
    }
    /// Returns one copy of `tile` to the rack.
    pub(crate) fn insert_one(&mut self, tile: Tile) {
        self.counts[usize::from(tile)] += 1;
        self.len += 1;
    }
    /// An iterator over the tiles on the rack, letters first in
    /// alphabetical order, then blanks.
    pub fn iter(&self) -> impl Iterator<Item = Tile> + '_ {
        self.counts
            .iter()
            .enumerate()
            .flat_map(|(index, &count)| {
                let tile = match index {
                    26 => Tile::blank(),
                    _ => Tile::Letter(index.into()),
                };
                repeat(tile).take(count as usize)
            })
    }
}

impl FromStr for Rack {
    type Err = EngineError;

    /// Parses the host convention: lowercase letters, `_` for a blank.
    fn from_str(s: &str) -> EngineResult<Self> {
        let mut rack = Rack::default();

        for ch in s.chars() {
            let tile = match ch {
                '_' => Tile::blank(),
                _ => Tile::Letter(
                    crate::game::tile::Letter::new(ch).ok_or(EngineError::BadLetter(ch))?,
                ),
            };
            rack.insert_one(tile);
        }

        Ok(rack)
    }
}
impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for tile in self.iter() {
            write!(f, "{}", tile)?;
        }
        write!(f, "]")
    }
}
