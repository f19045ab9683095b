//! Cryptogram puzzle generation
//!
//! A Puzzle is a quote enciphered with a random derangement, plus the cipher
//! letters handed to the player up front.

use super::cipher::letter_index;
use super::{Cipher, Difficulty, Quote};
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;
use tracing::debug;

/// An enciphered quote ready to play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    quote: Quote,
    cipher: Cipher,
    ciphertext: String,
    difficulty: Difficulty,
    prerevealed: Vec<u8>,
}

impl Puzzle {
    /// Generate a puzzle with a random cipher and random pre-revealed letters
    ///
    /// The rng drives both choices, so a seeded rng gives a reproducible puzzle.
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::{Difficulty, Puzzle, Quote};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let quote = Quote::new("Knowledge is power.", "Francis Bacon").unwrap();
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let puzzle = Puzzle::generate(quote, Difficulty::Hard, &mut rng);
    ///
    /// assert_eq!(puzzle.ciphertext().len(), "Knowledge is power.".len());
    /// assert!(puzzle.prerevealed().is_empty());
    /// ```
    pub fn generate<R: Rng + ?Sized>(quote: Quote, difficulty: Difficulty, rng: &mut R) -> Self {
        let cipher = Cipher::random(rng);
        let ciphertext = cipher.encrypt(quote.text());

        let mut letters = distinct_letters(&ciphertext);
        let count = difficulty.prereveal_count(letters.len());
        letters.shuffle(rng);
        letters.truncate(count);
        letters.sort_unstable();

        debug!(
            author = quote.author(),
            %difficulty,
            prerevealed = count,
            "generated puzzle"
        );

        Self {
            quote,
            cipher,
            ciphertext,
            difficulty,
            prerevealed: letters,
        }
    }

    /// Build a puzzle from a known cipher and pre-revealed cipher letters
    ///
    /// Pre-revealed letters that are not in the ciphertext are dropped.
    #[must_use]
    pub fn with_cipher(
        quote: Quote,
        cipher: Cipher,
        difficulty: Difficulty,
        prerevealed: &[u8],
    ) -> Self {
        let ciphertext = cipher.encrypt(quote.text());
        let present = distinct_letters(&ciphertext);

        let mut prerevealed: Vec<u8> = prerevealed
            .iter()
            .map(u8::to_ascii_uppercase)
            .filter(|c| present.contains(c))
            .collect();
        prerevealed.sort_unstable();
        prerevealed.dedup();

        Self {
            quote,
            cipher,
            ciphertext,
            difficulty,
            prerevealed,
        }
    }

    #[inline]
    #[must_use]
    pub const fn quote(&self) -> &Quote {
        &self.quote
    }

    #[inline]
    #[must_use]
    pub const fn cipher(&self) -> &Cipher {
        &self.cipher
    }

    #[inline]
    #[must_use]
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    #[inline]
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cipher letters solved before the first guess, sorted
    #[inline]
    #[must_use]
    pub fn prerevealed(&self) -> &[u8] {
        &self.prerevealed
    }

    /// Distinct cipher letters in the puzzle, sorted
    #[must_use]
    pub fn cipher_letters(&self) -> Vec<u8> {
        distinct_letters(&self.ciphertext)
    }

    /// Plaintext letter behind a cipher letter, if it appears in the puzzle
    #[must_use]
    pub fn plain_for(&self, cipher_letter: u8) -> Option<u8> {
        let upper = cipher_letter.to_ascii_uppercase();
        if self.occurrences(upper) == 0 {
            return None;
        }
        self.cipher.decrypt_letter(upper)
    }

    /// Number of times a cipher letter appears
    #[must_use]
    pub fn occurrences(&self, cipher_letter: u8) -> usize {
        let upper = cipher_letter.to_ascii_uppercase();
        if letter_index(upper).is_none() {
            return 0;
        }
        self.ciphertext.bytes().filter(|&b| b == upper).count()
    }

    /// Occurrence count of every cipher letter in the puzzle
    #[must_use]
    pub fn letter_counts(&self) -> FxHashMap<u8, usize> {
        let mut counts = FxHashMap::default();
        for b in self.ciphertext.bytes().filter(u8::is_ascii_uppercase) {
            *counts.entry(b).or_insert(0) += 1;
        }
        counts
    }

    /// Total number of letter positions to fill
    #[must_use]
    pub fn letter_positions(&self) -> usize {
        self.ciphertext
            .bytes()
            .filter(u8::is_ascii_uppercase)
            .count()
    }

    /// Whitespace-separated words of the ciphertext
    pub fn cipher_words(&self) -> impl Iterator<Item = &str> + '_ {
        self.ciphertext.split_whitespace()
    }

    /// The solved plaintext in the same uppercase form as the ciphertext
    #[must_use]
    pub fn solution(&self) -> String {
        self.cipher.decrypt(&self.ciphertext)
    }
}

fn distinct_letters(ciphertext: &str) -> Vec<u8> {
    let mut seen = [false; 26];
    for b in ciphertext.bytes() {
        if let Some(i) = letter_index(b) {
            seen[i] = true;
        }
    }
    (b'A'..=b'Z')
        .zip(seen)
        .filter_map(|(letter, present)| present.then_some(letter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SHIFT_KEY: &str = "BCDEFGHIJKLMNOPQRSTUVWXYZA";

    fn shift_puzzle(text: &str) -> Puzzle {
        let quote = Quote::new(text, "Test").unwrap();
        let cipher = Cipher::from_key(SHIFT_KEY).unwrap();
        Puzzle::with_cipher(quote, cipher, Difficulty::Hard, &[])
    }

    #[test]
    fn ciphertext_has_no_plain_letter_in_place() {
        let quote = Quote::new("The quick brown fox jumps over the lazy dog.", "x").unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let puzzle = Puzzle::generate(quote, Difficulty::Medium, &mut rng);

        let plain = puzzle.quote().text().to_ascii_uppercase();
        for (p, c) in plain.bytes().zip(puzzle.ciphertext().bytes()) {
            if p.is_ascii_alphabetic() {
                assert_ne!(p, c);
            } else {
                assert_eq!(p, c);
            }
        }
    }

    #[test]
    fn prerevealed_matches_difficulty() {
        let quote = Quote::new("The quick brown fox jumps over the lazy dog.", "x").unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let puzzle = Puzzle::generate(quote, Difficulty::Easy, &mut rng);

        // Pangram: 26 distinct letters, 0.30 * 26 = 7.8 rounds to 8
        assert_eq!(puzzle.cipher_letters().len(), 26);
        assert_eq!(puzzle.prerevealed().len(), 8);
        assert!(puzzle.prerevealed().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn generate_is_seed_deterministic() {
        let quote = Quote::new("Time is money.", "Benjamin Franklin").unwrap();
        let a = Puzzle::generate(
            quote.clone(),
            Difficulty::Easy,
            &mut StdRng::seed_from_u64(4),
        );
        let b = Puzzle::generate(quote, Difficulty::Easy, &mut StdRng::seed_from_u64(4));
        assert_eq!(a, b);
    }

    #[test]
    fn cipher_letters_and_counts() {
        let puzzle = shift_puzzle("Well done");
        // WELL DONE -> XFMM EPOF
        assert_eq!(puzzle.ciphertext(), "XFMM EPOF");
        assert_eq!(puzzle.cipher_letters(), b"EFMOPX");
        assert_eq!(puzzle.occurrences(b'M'), 2);
        assert_eq!(puzzle.occurrences(b'f'), 2);
        assert_eq!(puzzle.occurrences(b'Z'), 0);
        assert_eq!(puzzle.occurrences(b' '), 0);

        let counts = puzzle.letter_counts();
        assert_eq!(counts.get(&b'F'), Some(&2));
        assert_eq!(counts.get(&b'X'), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), puzzle.letter_positions());
    }

    #[test]
    fn plain_for_only_known_letters() {
        let puzzle = shift_puzzle("Well done");
        assert_eq!(puzzle.plain_for(b'X'), Some(b'W'));
        assert_eq!(puzzle.plain_for(b'm'), Some(b'L'));
        assert_eq!(puzzle.plain_for(b'A'), None);
    }

    #[test]
    fn with_cipher_filters_prerevealed() {
        let quote = Quote::new("Well done", "x").unwrap();
        let cipher = Cipher::from_key(SHIFT_KEY).unwrap();
        let puzzle = Puzzle::with_cipher(quote, cipher, Difficulty::Easy, b"mAxm");
        assert_eq!(puzzle.prerevealed(), b"MX");
    }

    #[test]
    fn solution_and_words() {
        let puzzle = shift_puzzle("Do or do not.");
        assert_eq!(puzzle.solution(), "DO OR DO NOT.");
        assert_eq!(puzzle.cipher_words().count(), 4);
    }
}
