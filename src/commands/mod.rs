//! Command implementations

pub mod generate;
pub mod play;
pub mod simulate;

pub use generate::{GenerateConfig, PuzzleExport, QuoteChoice, generate_puzzle};
pub use play::{FixedPuzzle, PlayerCommand, PuzzleSource, RandomPuzzles, SessionStats, run_play};
pub use simulate::{SimulateConfig, SimulationResult, play_bot, run_simulation};
