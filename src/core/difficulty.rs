//! Difficulty levels and their tuning parameters

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Puzzle difficulty
///
/// Controls the mistake budget, how many letters start revealed, the hint
/// budget and the score multiplier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All levels, easiest first
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Mistakes allowed before the game is lost
    #[must_use]
    pub const fn max_mistakes(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 4,
            Self::Hard => 3,
        }
    }

    /// Share of distinct letters given away at the start
    #[must_use]
    pub const fn prereveal_share(self) -> f64 {
        match self {
            Self::Easy => 0.30,
            Self::Medium => 0.15,
            Self::Hard => 0.0,
        }
    }

    /// Hints the player may request
    #[must_use]
    pub const fn hint_budget(self) -> u32 {
        match self {
            Self::Easy => 5,
            Self::Medium => 3,
            Self::Hard => 1,
        }
    }

    /// Final score multiplier
    #[must_use]
    pub const fn score_multiplier(self) -> f64 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }

    /// Number of letters to pre-reveal for a puzzle with `distinct` cipher letters
    ///
    /// Always leaves at least one letter for the player.
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::Difficulty;
    ///
    /// assert_eq!(Difficulty::Easy.prereveal_count(20), 6);
    /// assert_eq!(Difficulty::Hard.prereveal_count(20), 0);
    /// assert_eq!(Difficulty::Easy.prereveal_count(1), 0);
    /// ```
    #[must_use]
    pub fn prereveal_count(self, distinct: usize) -> usize {
        let wanted = (self.prereveal_share() * distinct as f64).round() as usize;
        wanted.min(distinct.saturating_sub(1))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" => Ok(Self::Easy),
            "medium" | "m" => Ok(Self::Medium),
            "hard" | "h" => Ok(Self::Hard),
            other => Err(format!("Unknown difficulty: {other}")),
        }
    }
}
