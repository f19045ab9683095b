//! Puzzle generation command
//!
//! Builds a puzzle from the corpus or from custom text, optionally seeded.

use crate::core::{Difficulty, Puzzle, Quote};
use anyhow::{Context, Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Which quote to encipher
#[derive(Debug, Clone, Default)]
pub enum QuoteChoice {
    /// Pick one with the rng
    #[default]
    Random,
    /// Index into the corpus
    Index(usize),
    /// Custom plaintext
    Text { text: String, author: String },
}

/// Configuration for generating a puzzle
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    pub quote: QuoteChoice,
}

impl GenerateConfig {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }
}

/// Generate a puzzle according to `config`
///
/// # Errors
///
/// Returns an error if:
/// - The corpus is empty and no custom text was given
/// - The quote index is out of range
/// - The custom text is not a valid quote
pub fn generate_puzzle(quotes: &[Quote], config: &GenerateConfig) -> Result<Puzzle> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let quote = match &config.quote {
        QuoteChoice::Random => {
            if quotes.is_empty() {
                bail!("No quotes available");
            }
            quotes[rng.random_range(0..quotes.len())].clone()
        }
        QuoteChoice::Index(index) => quotes
            .get(*index)
            .cloned()
            .with_context(|| format!("Quote index {index} out of range (0..{})", quotes.len()))?,
        QuoteChoice::Text { text, author } => {
            Quote::new(text.as_str(), author.as_str()).context("Invalid quote text")?
        }
    };

    Ok(Puzzle::generate(quote, config.difficulty, &mut rng))
}

/// Serializable puzzle for JSON export
#[derive(Debug, Serialize)]
pub struct PuzzleExport {
    pub ciphertext: String,
    pub author: String,
    pub difficulty: Difficulty,
    pub prerevealed: Vec<PrerevealedLetter>,
    pub letters: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PrerevealedLetter {
    pub cipher: char,
    pub plain: char,
}

impl PuzzleExport {
    /// Build an export; the key and plaintext are only included when asked
    #[must_use]
    pub fn new(puzzle: &Puzzle, include_key: bool) -> Self {
        let prerevealed = puzzle
            .prerevealed()
            .iter()
            .filter_map(|&c| {
                puzzle.plain_for(c).map(|p| PrerevealedLetter {
                    cipher: char::from(c),
                    plain: char::from(p),
                })
            })
            .collect();

        Self {
            ciphertext: puzzle.ciphertext().to_string(),
            author: puzzle.quote().author().to_string(),
            difficulty: puzzle.difficulty(),
            prerevealed,
            letters: puzzle.cipher_letters().len(),
            key: include_key.then(|| puzzle.cipher().key()),
            solution: include_key.then(|| puzzle.quote().text().to_string()),
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize puzzle")
    }
}
