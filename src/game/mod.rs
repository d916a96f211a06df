//! The game data model: the board and the plays, racks, tiles and words
//! that move across it.

pub mod board;
pub mod play;
pub mod rack;
pub mod tile;
pub mod word;
