//! Per-letter guess tracking
//!
//! Records every guess against a puzzle, counts mistakes and decides whether
//! the game is won, lost or still going.

use crate::core::Puzzle;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Current state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Result of a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Every position of the cipher letter is now solved
    Correct { occurrences: usize },
    /// Wrong plaintext letter; one mistake spent
    Incorrect { mistakes_left: u32 },
    /// The cipher letter was already solved; nothing changed
    AlreadySolved,
}

/// Why a letter became solved without a correct guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealSource {
    /// Given away when the puzzle was generated
    Initial,
    /// Requested by the player
    Hint,
    /// Disclosed by the timed-mode clock
    Timed,
}

/// Error type for rejected guesses and reveals
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("{0:?} is not a letter")]
    NotALetter(char),
    #[error("{0} does not appear in this puzzle")]
    NotInPuzzle(char),
    #[error("The game is already over")]
    GameOver,
    #[error("No hints left")]
    HintsExhausted,
}

/// One entry of the guess log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRecord {
    pub cipher: u8,
    pub plain: u8,
    pub correct: bool,
}

/// Tracks guesses, reveals and mistakes for one puzzle
#[derive(Debug, Clone)]
pub struct GuessTracker {
    solution: FxHashMap<u8, u8>,
    counts: FxHashMap<u8, usize>,
    solved: FxHashSet<u8>,
    history: Vec<GuessRecord>,
    mistakes: u32,
    max_mistakes: u32,
    hints_used: u32,
    hint_budget: u32,
    timed_reveals: u32,
    total_positions: usize,
}

fn normalize(letter: char) -> Result<u8, GuessError> {
    u8::try_from(letter)
        .ok()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_uppercase())
        .ok_or(GuessError::NotALetter(letter))
}

impl GuessTracker {
    /// Start tracking a puzzle; its pre-revealed letters begin solved
    #[must_use]
    pub fn new(puzzle: &Puzzle) -> Self {
        let solution = puzzle
            .cipher_letters()
            .into_iter()
            .filter_map(|c| puzzle.plain_for(c).map(|p| (c, p)))
            .collect();
        let difficulty = puzzle.difficulty();

        Self {
            solution,
            counts: puzzle.letter_counts(),
            solved: puzzle.prerevealed().iter().copied().collect(),
            history: Vec::new(),
            mistakes: 0,
            max_mistakes: difficulty.max_mistakes(),
            hints_used: 0,
            hint_budget: difficulty.hint_budget(),
            timed_reveals: 0,
            total_positions: puzzle.letter_positions(),
        }
    }

    /// Guess that `cipher` decrypts to `plain`
    ///
    /// # Errors
    /// Returns `GuessError` if either input is not a letter, the cipher letter
    /// is not in the puzzle, or the game has already ended.
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::{Cipher, Difficulty, Puzzle, Quote};
    /// use cryptogram::game::{GuessOutcome, GuessTracker};
    ///
    /// let quote = Quote::new("Well done", "x").unwrap();
    /// let cipher = Cipher::from_key("BCDEFGHIJKLMNOPQRSTUVWXYZA").unwrap();
    /// let puzzle = Puzzle::with_cipher(quote, cipher, Difficulty::Hard, &[]);
    /// let mut tracker = GuessTracker::new(&puzzle);
    ///
    /// // WELL DONE is shown as XFMM EPOF
    /// assert_eq!(
    ///     tracker.guess('m', 'l').unwrap(),
    ///     GuessOutcome::Correct { occurrences: 2 }
    /// );
    /// assert_eq!(
    ///     tracker.guess('X', 'Q').unwrap(),
    ///     GuessOutcome::Incorrect { mistakes_left: 2 }
    /// );
    /// ```
    pub fn guess(&mut self, cipher: char, plain: char) -> Result<GuessOutcome, GuessError> {
        let cipher_letter = normalize(cipher)?;
        let plain_letter = normalize(plain)?;

        let expected = *self
            .solution
            .get(&cipher_letter)
            .ok_or(GuessError::NotInPuzzle(char::from(cipher_letter)))?;

        if self.status().is_over() {
            return Err(GuessError::GameOver);
        }

        if self.solved.contains(&cipher_letter) {
            return Ok(GuessOutcome::AlreadySolved);
        }

        let correct = expected == plain_letter;
        self.history.push(GuessRecord {
            cipher: cipher_letter,
            plain: plain_letter,
            correct,
        });

        if correct {
            self.solved.insert(cipher_letter);
            let occurrences = self.occurrences(cipher_letter);
            debug!(
                cipher = %char::from(cipher_letter),
                occurrences,
                "correct guess"
            );
            self.log_if_finished();
            Ok(GuessOutcome::Correct { occurrences })
        } else {
            self.mistakes += 1;
            debug!(
                cipher = %char::from(cipher_letter),
                plain = %char::from(plain_letter),
                mistakes = self.mistakes,
                "incorrect guess"
            );
            self.log_if_finished();
            Ok(GuessOutcome::Incorrect {
                mistakes_left: self.mistakes_left(),
            })
        }
    }

    /// Mark a cipher letter solved without spending a mistake
    ///
    /// Returns `false` if the letter was already solved.
    ///
    /// # Errors
    /// Returns `GuessError` if the letter is not in the puzzle, the game is
    /// over, or a hint is requested with the budget spent.
    pub fn reveal(&mut self, cipher: char, source: RevealSource) -> Result<bool, GuessError> {
        let cipher_letter = normalize(cipher)?;
        if !self.solution.contains_key(&cipher_letter) {
            return Err(GuessError::NotInPuzzle(char::from(cipher_letter)));
        }
        if self.status().is_over() {
            return Err(GuessError::GameOver);
        }
        if self.solved.contains(&cipher_letter) {
            return Ok(false);
        }

        match source {
            RevealSource::Hint => {
                if self.hints_used >= self.hint_budget {
                    return Err(GuessError::HintsExhausted);
                }
                self.hints_used += 1;
            }
            RevealSource::Timed => self.timed_reveals += 1,
            RevealSource::Initial => {}
        }

        self.solved.insert(cipher_letter);
        debug!(cipher = %char::from(cipher_letter), ?source, "revealed letter");
        self.log_if_finished();
        Ok(true)
    }

    /// Win takes precedence: a fully solved board is a win
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.solved.len() == self.solution.len() {
            GameStatus::Won
        } else if self.mistakes >= self.max_mistakes {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        }
    }

    fn log_if_finished(&self) {
        let status = self.status();
        if status.is_over() {
            info!(
                ?status,
                mistakes = self.mistakes,
                hints = self.hints_used,
                timed_reveals = self.timed_reveals,
                "game finished"
            );
        }
    }

    fn occurrences(&self, cipher_letter: u8) -> usize {
        self.counts.get(&cipher_letter).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_solved(&self, cipher_letter: u8) -> bool {
        self.solved.contains(&cipher_letter.to_ascii_uppercase())
    }

    /// Solved cipher letters
    #[must_use]
    pub const fn solved(&self) -> &FxHashSet<u8> {
        &self.solved
    }

    /// Unsolved cipher letters, sorted
    #[must_use]
    pub fn unsolved(&self) -> Vec<u8> {
        let mut letters: Vec<u8> = self
            .solution
            .keys()
            .filter(|c| !self.solved.contains(c))
            .copied()
            .collect();
        letters.sort_unstable();
        letters
    }

    /// Solved share of letter positions, in `[0, 1]`
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_positions == 0 {
            return 1.0;
        }
        let solved: usize = self.solved.iter().map(|&c| self.occurrences(c)).sum();
        solved as f64 / self.total_positions as f64
    }

    #[must_use]
    pub fn history(&self) -> &[GuessRecord] {
        &self.history
    }

    #[must_use]
    pub const fn mistakes(&self) -> u32 {
        self.mistakes
    }

    #[must_use]
    pub const fn mistakes_left(&self) -> u32 {
        self.max_mistakes.saturating_sub(self.mistakes)
    }

    #[must_use]
    pub const fn hints_used(&self) -> u32 {
        self.hints_used
    }

    #[must_use]
    pub const fn hints_left(&self) -> u32 {
        self.hint_budget.saturating_sub(self.hints_used)
    }

    #[must_use]
    pub const fn timed_reveals(&self) -> u32 {
        self.timed_reveals
    }

    /// Number of distinct cipher letters in the puzzle
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.solution.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cipher, Difficulty, Quote};

    const SHIFT_KEY: &str = "BCDEFGHIJKLMNOPQRSTUVWXYZA";

    // WELL DONE -> XFMM EPOF
    fn tracker(difficulty: Difficulty, prerevealed: &[u8]) -> GuessTracker {
        let quote = Quote::new("Well done", "x").unwrap();
        let cipher = Cipher::from_key(SHIFT_KEY).unwrap();
        GuessTracker::new(&Puzzle::with_cipher(quote, cipher, difficulty, prerevealed))
    }

    fn solve_all(tracker: &mut GuessTracker) {
        for (c, p) in "XFMEPO".chars().zip("WELDON".chars()) {
            let _ = tracker.guess(c, p);
        }
    }

    #[test]
    fn correct_guesses_win() {
        let mut t = tracker(Difficulty::Hard, &[]);
        assert_eq!(t.status(), GameStatus::InProgress);
        solve_all(&mut t);
        assert_eq!(t.status(), GameStatus::Won);
        assert_eq!(t.mistakes(), 0);
        assert!((t.progress() - 1.0).abs() < f64::EPSILON);
        assert_eq!(t.history().len(), 6);
    }

    #[test]
    fn mistakes_lose_at_threshold() {
        let mut t = tracker(Difficulty::Hard, &[]);
        assert_eq!(
            t.guess('X', 'A'),
            Ok(GuessOutcome::Incorrect { mistakes_left: 2 })
        );
        assert_eq!(
            t.guess('X', 'B'),
            Ok(GuessOutcome::Incorrect { mistakes_left: 1 })
        );
        assert_eq!(
            t.guess('X', 'C'),
            Ok(GuessOutcome::Incorrect { mistakes_left: 0 })
        );
        assert_eq!(t.status(), GameStatus::Lost);
        assert_eq!(t.guess('X', 'W'), Err(GuessError::GameOver));
    }

    #[test]
    fn already_solved_is_free() {
        let mut t = tracker(Difficulty::Hard, &[]);
        t.guess('M', 'L').unwrap();
        assert_eq!(t.guess('M', 'Q'), Ok(GuessOutcome::AlreadySolved));
        assert_eq!(t.mistakes(), 0);
        assert_eq!(t.history().len(), 1);
    }

    #[test]
    fn invalid_guesses_rejected() {
        let mut t = tracker(Difficulty::Hard, &[]);
        assert_eq!(t.guess('1', 'A'), Err(GuessError::NotALetter('1')));
        assert_eq!(t.guess('X', '?'), Err(GuessError::NotALetter('?')));
        assert_eq!(t.guess('a', 'B'), Err(GuessError::NotInPuzzle('A')));
        assert_eq!(t.mistakes(), 0);
    }

    #[test]
    fn prerevealed_start_solved() {
        let t = tracker(Difficulty::Easy, b"MX");
        assert!(t.is_solved(b'm'));
        assert!(t.is_solved(b'X'));
        assert_eq!(t.unsolved(), b"EFOP");
        // 3 of 8 positions
        assert!((t.progress() - 0.375).abs() < 1e-9);
    }

    #[test]
    fn hints_respect_budget() {
        let mut t = tracker(Difficulty::Hard, &[]);
        assert_eq!(t.hints_left(), 1);
        assert_eq!(t.reveal('F', RevealSource::Hint), Ok(true));
        assert_eq!(t.hints_used(), 1);
        assert_eq!(
            t.reveal('M', RevealSource::Hint),
            Err(GuessError::HintsExhausted)
        );
        assert_eq!(t.reveal('F', RevealSource::Hint), Ok(false));
    }

    #[test]
    fn timed_reveals_counted_separately() {
        let mut t = tracker(Difficulty::Hard, &[]);
        assert_eq!(t.reveal('O', RevealSource::Timed), Ok(true));
        assert_eq!(t.reveal('P', RevealSource::Timed), Ok(true));
        assert_eq!(t.timed_reveals(), 2);
        assert_eq!(t.hints_used(), 0);
        assert_eq!(
            t.reveal('Z', RevealSource::Timed),
            Err(GuessError::NotInPuzzle('Z'))
        );
    }

    #[test]
    fn late_win_after_mistakes() {
        let mut t = tracker(Difficulty::Hard, &[]);
        t.guess('X', 'A').unwrap();
        t.guess('X', 'B').unwrap();
        for (c, p) in "XFMEPO".chars().zip("WELDON".chars()) {
            t.guess(c, p).unwrap();
        }
        assert_eq!(t.status(), GameStatus::Won);
        assert_eq!(t.mistakes_left(), 1);
    }
}
