//! Game rules on top of a puzzle
//!
//! Guess tracking, scoring, reveal ordering and the timed-mode session.

pub mod reveal;
pub mod score;
mod session;
mod tracker;

pub use reveal::{LetterRank, RevealOrderPlanner};
pub use score::{ScoreBreakdown, ScoreCalculator, ScoreInput, ScoreWeights};
pub use session::{Game, GameMode, TimedConfig};
pub use tracker::{GameStatus, GuessError, GuessOutcome, GuessRecord, GuessTracker, RevealSource};
