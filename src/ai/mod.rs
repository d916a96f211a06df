//! Move search over a board position.

pub mod movegen;
