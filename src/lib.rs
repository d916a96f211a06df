//! A Scrabble move-generation engine: a DAWG lexicon traversed with the
//! anchor-square algorithm, over a board that keeps per-square cross-check
//! masks and cross scores up to date as plays are committed.

// Produce a compiler warning for missing documentation.
#![warn(missing_docs)]

pub mod ai;
pub mod engine;
pub mod error;
pub mod game;
pub mod util;
