//! Cryptogram
//!
//! A cryptogram puzzle engine: famous quotes enciphered with random derangement
//! ciphers, per-letter guess tracking, scoring and timed auto-reveals.
//!
//! # Quick Start
//!
//! ```rust
//! use cryptogram::core::{Difficulty, Puzzle, Quote};
//! use cryptogram::game::{Game, GameMode, GameStatus};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let quote = Quote::new("Knowledge is power.", "Francis Bacon").unwrap();
//! let puzzle = Puzzle::generate(quote, Difficulty::Medium, &mut StdRng::seed_from_u64(7));
//! let mut game = Game::new(puzzle, GameMode::Classic);
//!
//! // Solve every letter using the key
//! for letter in game.puzzle().cipher_letters() {
//!     let plain = game.puzzle().plain_for(letter).unwrap();
//!     let _ = game.guess(char::from(letter), char::from(plain));
//! }
//! assert_eq!(game.status(), GameStatus::Won);
//! ```

// Core domain types
pub mod core;

// Game rules: tracking, scoring, reveals
pub mod game;

// Daily challenge selection
pub mod daily;

// Quote corpora
pub mod quotes;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
