//! Core domain types for cryptograms
//!
//! Quotes, ciphers, difficulty levels and the puzzles built from them.
//! Everything here is deterministic given an rng, with no I/O.

mod cipher;
mod difficulty;
mod puzzle;
mod quote;

pub use cipher::{Cipher, CipherError};
pub use difficulty::Difficulty;
pub use puzzle::Puzzle;
pub use quote::{Quote, QuoteError};
