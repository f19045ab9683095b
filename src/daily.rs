//! Daily challenge selection
//!
//! Every player gets the same puzzle on a given calendar date: the date seeds
//! the rng that picks the quote, draws the cipher and chooses pre-reveals.

use crate::core::{Difficulty, Puzzle, Quote};
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

const DAILY_SALT: u64 = 0x5EED_C0DE_C1F3_2024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DailyError {
    #[error("No quotes available for the daily challenge")]
    NoQuotes,
}

/// Rng seed for a date
#[must_use]
pub fn daily_seed(date: NaiveDate) -> u64 {
    (i64::from(date.num_days_from_ce()) as u64) ^ DAILY_SALT
}

/// Today's date in local time
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The puzzle for `date`
///
/// # Errors
/// Returns `DailyError::NoQuotes` if `quotes` is empty.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use cryptogram::core::Difficulty;
/// use cryptogram::daily::daily_puzzle;
/// use cryptogram::quotes::{QUOTES, loader::quotes_from_slice};
///
/// let quotes = quotes_from_slice(QUOTES);
/// let date = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap();
///
/// let a = daily_puzzle(date, &quotes, Difficulty::Medium).unwrap();
/// let b = daily_puzzle(date, &quotes, Difficulty::Medium).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn daily_puzzle(
    date: NaiveDate,
    quotes: &[Quote],
    difficulty: Difficulty,
) -> Result<Puzzle, DailyError> {
    if quotes.is_empty() {
        return Err(DailyError::NoQuotes);
    }

    let mut rng = StdRng::seed_from_u64(daily_seed(date));
    let index = rng.random_range(0..quotes.len());
    debug!(%date, index, "selected daily quote");

    Ok(Puzzle::generate(
        quotes[index].clone(),
        difficulty,
        &mut rng,
    ))
}
