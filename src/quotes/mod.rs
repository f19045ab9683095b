//! Quote corpora for cryptogram puzzles
//!
//! Provides the embedded corpus compiled into the binary plus file loading.

mod embedded;
pub mod loader;

pub use embedded::{QUOTES, QUOTES_COUNT};
