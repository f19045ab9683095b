//! Score calculation
//!
//! A won game starts from a base score and loses points for mistakes, hints,
//! timed reveals and time spent over par. The remainder is scaled by the
//! difficulty multiplier. A lost game scores zero.

use crate::core::Difficulty;
use std::time::Duration;
use tracing::debug;

/// Tunable scoring constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub base: f64,
    pub mistake_penalty: f64,
    pub hint_penalty: f64,
    pub timed_reveal_penalty: f64,
    /// Allowed time per distinct letter before the clock costs points
    pub par_per_letter: Duration,
    pub points_per_second_over_par: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 1000.0,
            mistake_penalty: 100.0,
            hint_penalty: 75.0,
            timed_reveal_penalty: 50.0,
            par_per_letter: Duration::from_secs(10),
            points_per_second_over_par: 2.0,
        }
    }
}

/// Everything the score depends on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub difficulty: Difficulty,
    pub won: bool,
    pub mistakes: u32,
    pub hints_used: u32,
    pub timed_reveals: u32,
    pub distinct_letters: usize,
    pub elapsed: Duration,
}

/// Itemized score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub mistake_penalty: f64,
    pub hint_penalty: f64,
    pub timed_reveal_penalty: f64,
    pub time_penalty: f64,
    pub multiplier: f64,
    pub total: u32,
}

impl ScoreBreakdown {
    const ZERO: Self = Self {
        base: 0.0,
        mistake_penalty: 0.0,
        hint_penalty: 0.0,
        timed_reveal_penalty: 0.0,
        time_penalty: 0.0,
        multiplier: 0.0,
        total: 0,
    };
}

/// Computes scores from a fixed set of weights
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator {
    weights: ScoreWeights,
}

impl ScoreCalculator {
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score a finished game
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::Difficulty;
    /// use cryptogram::game::{ScoreCalculator, ScoreInput};
    /// use std::time::Duration;
    ///
    /// let input = ScoreInput {
    ///     difficulty: Difficulty::Medium,
    ///     won: true,
    ///     mistakes: 1,
    ///     hints_used: 0,
    ///     timed_reveals: 0,
    ///     distinct_letters: 12,
    ///     elapsed: Duration::from_secs(60),
    /// };
    ///
    /// // (1000 - 100) * 1.5
    /// assert_eq!(ScoreCalculator::default().score(&input).total, 1350);
    /// ```
    #[must_use]
    pub fn score(&self, input: &ScoreInput) -> ScoreBreakdown {
        if !input.won {
            return ScoreBreakdown::ZERO;
        }

        let w = &self.weights;
        let mistake_penalty = f64::from(input.mistakes) * w.mistake_penalty;
        let hint_penalty = f64::from(input.hints_used) * w.hint_penalty;
        let timed_reveal_penalty = f64::from(input.timed_reveals) * w.timed_reveal_penalty;

        let par = w.par_per_letter.as_secs_f64() * input.distinct_letters as f64;
        let over_par = (input.elapsed.as_secs_f64() - par).max(0.0);
        let time_penalty = over_par.floor() * w.points_per_second_over_par;

        let multiplier = input.difficulty.score_multiplier();
        let raw = (w.base - mistake_penalty - hint_penalty - timed_reveal_penalty - time_penalty)
            .max(0.0);
        let total = (raw * multiplier).round() as u32;

        debug!(
            total,
            mistake_penalty, hint_penalty, timed_reveal_penalty, time_penalty, "scored game"
        );

        ScoreBreakdown {
            base: w.base,
            mistake_penalty,
            hint_penalty,
            timed_reveal_penalty,
            time_penalty,
            multiplier,
            total,
        }
    }
}
