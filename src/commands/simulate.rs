//! Batch simulation with a frequency-analysis bot
//!
//! Plays many seeded puzzles in parallel and reports how the rules and scoring
//! behave across difficulties.

use crate::core::{Difficulty, Puzzle, Quote};
use crate::game::reveal::ENGLISH_FREQUENCY_ORDER;
use crate::game::{Game, GameMode, GameStatus, GuessOutcome};
use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::{Duration, Instant};
use tracing::info;

/// Simulated thinking time per guess, used for the time component of scores
pub const SECONDS_PER_GUESS: u64 = 5;

/// Configuration for a simulation batch
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub games: usize,
    pub seed: u64,
    /// Fixed difficulty, or cycle through all levels when `None`
    pub difficulty: Option<Difficulty>,
    pub show_progress: bool,
}

impl SimulateConfig {
    #[must_use]
    pub const fn new(games: usize) -> Self {
        Self {
            games,
            seed: 0,
            difficulty: None,
            show_progress: true,
        }
    }
}

/// Result from one simulated game
#[derive(Debug, Clone, Copy)]
pub struct GameOutcome {
    pub difficulty: Difficulty,
    pub won: bool,
    pub mistakes: u32,
    pub guesses: usize,
    pub score: u32,
}

/// Aggregate for one difficulty level
#[derive(Debug, Clone, Copy, Default)]
pub struct DifficultySummary {
    pub games: usize,
    pub won: usize,
    pub total_score: u64,
    pub total_mistakes: u64,
}

impl DifficultySummary {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        ratio(self.won as f64, self.games)
    }

    #[must_use]
    pub fn mean_score(&self) -> f64 {
        ratio(self.total_score as f64, self.games)
    }

    #[must_use]
    pub fn mean_mistakes(&self) -> f64 {
        ratio(self.total_mistakes as f64, self.games)
    }

    fn record(&mut self, outcome: &GameOutcome) {
        self.games += 1;
        self.won += usize::from(outcome.won);
        self.total_score += u64::from(outcome.score);
        self.total_mistakes += u64::from(outcome.mistakes);
    }
}

fn ratio(value: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        value / count as f64
    }
}

/// Statistics from a simulation batch
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub overall: DifficultySummary,
    pub by_difficulty: Vec<(Difficulty, DifficultySummary)>,
    pub best_score: u32,
    pub duration: Duration,
}

/// Play one puzzle to the end with the frequency-analysis bot
///
/// The bot works on the most frequent unsolved cipher letter. It tries
/// plaintext letters in English frequency order and skips any letter that
/// is already placed, already ruled out, or equal to the cipher letter.
#[must_use]
pub fn play_bot(puzzle: Puzzle) -> GameOutcome {
    let difficulty = puzzle.difficulty();
    let mut game = Game::new(puzzle, GameMode::Classic);
    let mut ruled_out: FxHashMap<u8, FxHashSet<u8>> = FxHashMap::default();
    let mut guesses = 0usize;

    while game.status() == GameStatus::InProgress {
        let counts = game.puzzle().letter_counts();
        let Some(target) = game
            .tracker()
            .unsolved()
            .into_iter()
            .max_by_key(|c| (counts.get(c).copied().unwrap_or(0), std::cmp::Reverse(*c)))
        else {
            break;
        };

        let placed: FxHashSet<u8> = game
            .tracker()
            .solved()
            .iter()
            .filter_map(|&c| game.puzzle().plain_for(c))
            .collect();
        let tried = ruled_out.entry(target).or_default();

        let Some(&plain) = ENGLISH_FREQUENCY_ORDER
            .iter()
            .find(|&&p| p != target && !placed.contains(&p) && !tried.contains(&p))
        else {
            break;
        };

        guesses += 1;
        match game.guess(char::from(target), char::from(plain)) {
            Ok(GuessOutcome::Incorrect { .. }) => {
                tried.insert(plain);
            }
            Ok(_) => {}
            Err(_) => break,
        }
    }

    let elapsed = Duration::from_secs(SECONDS_PER_GUESS * guesses as u64);
    GameOutcome {
        difficulty,
        won: game.status() == GameStatus::Won,
        mistakes: game.tracker().mistakes(),
        guesses,
        score: game.score(elapsed).total,
    }
}

/// Run a simulation batch over the quote corpus
///
/// Game `i` uses the rng seeded with `seed + i`, so results do not depend on
/// thread scheduling.
///
/// # Errors
///
/// Returns an error if the quote list is empty.
///
/// # Panics
///
/// Panics if the progress bar template is invalid.
pub fn run_simulation(quotes: &[Quote], config: &SimulateConfig) -> Result<SimulationResult> {
    if quotes.is_empty() {
        bail!("No quotes available to simulate");
    }

    let start = Instant::now();
    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap()
                .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };
    pb.set_message("Simulating");

    let outcomes: Vec<GameOutcome> = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            let difficulty = config
                .difficulty
                .unwrap_or(Difficulty::ALL[i % Difficulty::ALL.len()]);
            let quote = quotes[rng.random_range(0..quotes.len())].clone();
            let outcome = play_bot(Puzzle::generate(quote, difficulty, &mut rng));
            pb.inc(1);
            outcome
        })
        .collect();

    pb.finish_with_message("Complete!");

    let mut overall = DifficultySummary::default();
    let mut by_difficulty: Vec<(Difficulty, DifficultySummary)> = Difficulty::ALL
        .iter()
        .map(|&d| (d, DifficultySummary::default()))
        .collect();

    for outcome in &outcomes {
        overall.record(outcome);
        if let Some((_, summary)) = by_difficulty
            .iter_mut()
            .find(|(d, _)| *d == outcome.difficulty)
        {
            summary.record(outcome);
        }
    }
    by_difficulty.retain(|(_, s)| s.games > 0);

    let best_score = outcomes.iter().map(|o| o.score).max().unwrap_or(0);
    let duration = start.elapsed();

    info!(
        games = overall.games,
        won = overall.won,
        elapsed_ms = duration.as_millis() as u64,
        "simulation finished"
    );

    Ok(SimulationResult {
        overall,
        by_difficulty,
        best_score,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cipher;
    use crate::quotes::{QUOTES, loader::quotes_from_slice};

    fn quiet(games: usize) -> SimulateConfig {
        SimulateConfig {
            show_progress: false,
            ..SimulateConfig::new(games)
        }
    }

    #[test]
    fn bot_finishes_every_game() {
        let quote = Quote::new("The quick brown fox jumps over the lazy dog.", "x").unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let outcome = play_bot(Puzzle::generate(quote, Difficulty::Easy, &mut rng));

        assert!(outcome.guesses > 0);
        assert!(outcome.won || outcome.mistakes == Difficulty::Easy.max_mistakes());
        if !outcome.won {
            assert_eq!(outcome.score, 0);
        }
    }

    #[test]
    fn bot_wins_when_frequency_order_matches() {
        // Plaintext "ET" under a cipher sending E->F, T->U: the bot guesses E
        // for the first cipher letter, then T, without a miss
        let quote = Quote::new("et", "x").unwrap();
        let cipher = Cipher::from_key("BCDEFGHIJKLMNOPQRSTUVWXYZA").unwrap();
        let puzzle = Puzzle::with_cipher(quote, cipher, Difficulty::Hard, &[]);
        let outcome = play_bot(puzzle);

        assert!(outcome.won);
        assert_eq!(outcome.mistakes, 0);
        assert_eq!(outcome.guesses, 2);
        assert_eq!(outcome.score, 2000);
    }

    #[test]
    fn simulation_counts_add_up() {
        let quotes = quotes_from_slice(QUOTES);
        let result = run_simulation(&quotes, &quiet(12)).unwrap();

        assert_eq!(result.overall.games, 12);
        let per_level: usize = result.by_difficulty.iter().map(|(_, s)| s.games).sum();
        assert_eq!(per_level, 12);
        assert_eq!(result.by_difficulty.len(), 3);
        assert!(result.overall.win_rate() <= 1.0);
    }

    #[test]
    fn simulation_is_deterministic() {
        let quotes = quotes_from_slice(QUOTES);
        let a = run_simulation(&quotes, &quiet(9)).unwrap();
        let b = run_simulation(&quotes, &quiet(9)).unwrap();
        assert_eq!(a.overall.total_score, b.overall.total_score);
        assert_eq!(a.overall.won, b.overall.won);
    }

    #[test]
    fn fixed_difficulty() {
        let quotes = quotes_from_slice(QUOTES);
        let config = SimulateConfig {
            difficulty: Some(Difficulty::Hard),
            ..quiet(4)
        };
        let result = run_simulation(&quotes, &config).unwrap();
        assert_eq!(result.by_difficulty.len(), 1);
        assert_eq!(result.by_difficulty[0].0, Difficulty::Hard);
    }

    #[test]
    fn empty_corpus_is_error() {
        assert!(run_simulation(&[], &quiet(1)).is_err());
    }

    #[test]
    fn summary_ratios_handle_zero() {
        let summary = DifficultySummary::default();
        assert!(summary.win_rate().abs() < f64::EPSILON);
        assert!(summary.mean_score().abs() < f64::EPSILON);
    }
}
