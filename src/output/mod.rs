//! Terminal output formatting
//!
//! Display utilities for boards, scores and command results.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_game_summary, print_plan, print_puzzle, print_score, print_session_stats,
    print_simulation_result,
};
