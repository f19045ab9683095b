//! A playable game: puzzle, tracker, mode and the clock-driven reveals

use super::reveal::RevealOrderPlanner;
use super::score::{ScoreBreakdown, ScoreCalculator, ScoreInput};
use super::tracker::{GameStatus, GuessError, GuessOutcome, GuessTracker, RevealSource};
use crate::core::Puzzle;
use std::time::Duration;
use tracing::{debug, info};

/// Timed-mode settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedConfig {
    /// One letter is auto-revealed per elapsed interval
    pub reveal_interval: Duration,
    /// The game is lost once this much time has passed
    pub time_limit: Duration,
}

impl Default for TimedConfig {
    fn default() -> Self {
        Self {
            reveal_interval: Duration::from_secs(20),
            time_limit: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Classic,
    Timed(TimedConfig),
}

/// One game in progress
///
/// Time is supplied by the caller, so the game itself never reads a clock.
#[derive(Debug, Clone)]
pub struct Game {
    puzzle: Puzzle,
    tracker: GuessTracker,
    mode: GameMode,
    planner: RevealOrderPlanner,
    calculator: ScoreCalculator,
    expired: bool,
}

impl Game {
    #[must_use]
    pub fn new(puzzle: Puzzle, mode: GameMode) -> Self {
        Self::with_calculator(puzzle, mode, ScoreCalculator::default())
    }

    #[must_use]
    pub fn with_calculator(puzzle: Puzzle, mode: GameMode, calculator: ScoreCalculator) -> Self {
        let tracker = GuessTracker::new(&puzzle);
        Self {
            puzzle,
            tracker,
            mode,
            planner: RevealOrderPlanner,
            calculator,
            expired: false,
        }
    }

    #[must_use]
    pub const fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub const fn tracker(&self) -> &GuessTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Lost once the timed-mode clock has run out
    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.tracker.status() {
            GameStatus::InProgress if self.expired => GameStatus::Lost,
            status => status,
        }
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.expired
    }

    /// Guess a plaintext letter for a cipher letter
    ///
    /// # Errors
    /// Returns `GuessError::GameOver` after the clock expires, otherwise the
    /// tracker's errors.
    pub fn guess(&mut self, cipher: char, plain: char) -> Result<GuessOutcome, GuessError> {
        if self.expired {
            return Err(GuessError::GameOver);
        }
        self.tracker.guess(cipher, plain)
    }

    /// Reveal the planner's next letter as a hint and return it
    ///
    /// # Errors
    /// Returns `GuessError` when the game is over or the hint budget is spent.
    pub fn hint(&mut self) -> Result<u8, GuessError> {
        if self.status().is_over() {
            return Err(GuessError::GameOver);
        }
        let letter = self
            .planner
            .next(&self.puzzle, self.tracker.solved())
            .ok_or(GuessError::GameOver)?;
        let cipher = char::from(letter);
        self.tracker.reveal(cipher, RevealSource::Hint)?;
        Ok(letter)
    }

    /// Advance the timed-mode clock to `elapsed` since the game started
    ///
    /// Applies every reveal that is due and returns the newly revealed cipher
    /// letters. Auto-reveals never solve the final letter. Does nothing in
    /// classic mode.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<u8> {
        let GameMode::Timed(config) = self.mode else {
            return Vec::new();
        };
        if self.status().is_over() {
            return Vec::new();
        }

        if elapsed >= config.time_limit {
            self.expired = true;
            info!(elapsed_secs = elapsed.as_secs(), "time limit reached");
            return Vec::new();
        }

        let interval = config.reveal_interval.as_millis();
        if interval == 0 {
            return Vec::new();
        }
        let due = u32::try_from(elapsed.as_millis() / interval).unwrap_or(u32::MAX);

        let mut revealed = Vec::new();
        while self.tracker.timed_reveals() < due && self.tracker.unsolved().len() > 1 {
            let Some(letter) = self.planner.next(&self.puzzle, self.tracker.solved()) else {
                break;
            };
            match self.tracker.reveal(char::from(letter), RevealSource::Timed) {
                Ok(true) => revealed.push(letter),
                Ok(false) | Err(_) => break,
            }
        }

        if !revealed.is_empty() {
            debug!(count = revealed.len(), "timed reveals applied");
        }
        revealed
    }

    /// Time until the next auto-reveal
    ///
    /// `None` outside an active timed game, and once only the last letter is
    /// left since auto-reveals never solve it.
    #[must_use]
    pub fn next_reveal_in(&self, elapsed: Duration) -> Option<Duration> {
        let GameMode::Timed(config) = self.mode else {
            return None;
        };
        if self.status().is_over()
            || config.reveal_interval.is_zero()
            || self.tracker.unsolved().len() <= 1
        {
            return None;
        }
        let interval = config.reveal_interval.as_millis();
        let into_interval = elapsed.as_millis() % interval;
        let remaining = u64::try_from(interval - into_interval).unwrap_or(u64::MAX);
        Some(Duration::from_millis(remaining))
    }

    /// Score as of `elapsed`
    #[must_use]
    pub fn score(&self, elapsed: Duration) -> ScoreBreakdown {
        self.calculator.score(&ScoreInput {
            difficulty: self.puzzle.difficulty(),
            won: self.status() == GameStatus::Won,
            mistakes: self.tracker.mistakes(),
            hints_used: self.tracker.hints_used(),
            timed_reveals: self.tracker.timed_reveals(),
            distinct_letters: self.tracker.letter_count(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cipher, Difficulty, Quote};

    const SHIFT_KEY: &str = "BCDEFGHIJKLMNOPQRSTUVWXYZA";

    // JAZZ IS A TEA -> KBAA JT B UFB, reveal order K A T F J U B
    fn game(mode: GameMode) -> Game {
        let quote = Quote::new("Jazz is a tea", "x").unwrap();
        let cipher = Cipher::from_key(SHIFT_KEY).unwrap();
        Game::new(
            Puzzle::with_cipher(quote, cipher, Difficulty::Medium, &[]),
            mode,
        )
    }

    fn timed() -> GameMode {
        GameMode::Timed(TimedConfig {
            reveal_interval: Duration::from_secs(10),
            time_limit: Duration::from_secs(120),
        })
    }

    #[test]
    fn classic_tick_is_noop() {
        let mut g = game(GameMode::Classic);
        assert!(g.tick(Duration::from_secs(1_000)).is_empty());
        assert_eq!(g.status(), GameStatus::InProgress);
        assert_eq!(g.next_reveal_in(Duration::ZERO), None);
    }

    #[test]
    fn timed_reveals_follow_plan() {
        let mut g = game(timed());
        assert!(g.tick(Duration::from_secs(9)).is_empty());
        assert_eq!(g.tick(Duration::from_secs(10)), vec![b'K']);
        // Catch up on two intervals at once
        assert_eq!(g.tick(Duration::from_secs(35)), vec![b'A', b'T']);
        assert_eq!(g.tracker().timed_reveals(), 3);
        assert_eq!(
            g.next_reveal_in(Duration::from_secs(35)),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn timed_reveals_leave_last_letter() {
        let mut g = game(timed());
        let revealed = g.tick(Duration::from_secs(110));
        assert_eq!(revealed.len(), 6);
        assert_eq!(g.tracker().unsolved(), vec![b'B']);
        assert_eq!(g.status(), GameStatus::InProgress);
        assert_eq!(g.next_reveal_in(Duration::from_secs(115)), None);

        assert_eq!(
            g.guess('B', 'A'),
            Ok(GuessOutcome::Correct { occurrences: 3 })
        );
        assert_eq!(g.status(), GameStatus::Won);
    }

    #[test]
    fn time_limit_loses() {
        let mut g = game(timed());
        g.tick(Duration::from_secs(120));
        assert!(g.is_expired());
        assert_eq!(g.status(), GameStatus::Lost);
        assert_eq!(g.guess('K', 'J'), Err(GuessError::GameOver));
        assert_eq!(g.score(Duration::from_secs(120)).total, 0);
    }

    #[test]
    fn hint_uses_planner_order() {
        let mut g = game(GameMode::Classic);
        assert_eq!(g.hint(), Ok(b'K'));
        assert_eq!(g.hint(), Ok(b'A'));
        assert_eq!(g.tracker().hints_used(), 2);
    }

    #[test]
    fn won_game_scores() {
        let mut g = game(GameMode::Classic);
        for (c, p) in "KBAJTUF".chars().zip("JAZISTQ".chars()) {
            g.guess(c, p).unwrap();
        }
        g.guess('F', 'E').unwrap();
        assert_eq!(g.status(), GameStatus::Won);
        // (1000 - 100) * 1.5
        assert_eq!(g.score(Duration::from_secs(30)).total, 1350);
    }
}
