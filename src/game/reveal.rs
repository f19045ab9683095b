//! Reveal ordering for timed mode
//!
//! Ranks unsolved cipher letters by how easily a player could deduce them.
//! Hard letters are revealed first. The common letters a solver reaches by
//! frequency analysis go last.

use crate::core::Puzzle;
use rustc_hash::{FxHashMap, FxHashSet};

/// English letters from most to least frequent
pub const ENGLISH_FREQUENCY_ORDER: &[u8; 26] = b"ETAOINSHRDLCUMWFGYPBVKJXQZ";

const TIER_HIGH: &[u8] = b"ETAOIN";
const TIER_MID: &[u8] = b"SHRDLU";

const TIER_WEIGHT: u32 = 4;
const SINGLE_LETTER_WORD_BONUS: u32 = 3;
const APOSTROPHE_BONUS: u32 = 2;
const DOUBLED_BONUS: u32 = 1;

/// Frequency tier of a plaintext letter: 3 for ETAOIN, 2 for SHRDLU, else 1
#[must_use]
pub fn frequency_tier(plain: u8) -> u32 {
    let upper = plain.to_ascii_uppercase();
    if TIER_HIGH.contains(&upper) {
        3
    } else if TIER_MID.contains(&upper) {
        2
    } else {
        1
    }
}

/// Ease score and its inputs for one cipher letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterRank {
    pub cipher: u8,
    pub plain: u8,
    pub occurrences: usize,
    pub tier: u32,
    pub pattern_bonus: u32,
    pub ease: u32,
}

/// Plans the order in which timed mode discloses letters
#[derive(Debug, Clone, Copy, Default)]
pub struct RevealOrderPlanner;

impl RevealOrderPlanner {
    /// Rank every unsolved cipher letter, first to reveal first
    ///
    /// Sorted by ascending ease, then fewer occurrences, then cipher letter.
    #[must_use]
    pub fn ranked(&self, puzzle: &Puzzle, solved: &FxHashSet<u8>) -> Vec<LetterRank> {
        let counts = puzzle.letter_counts();
        let bonuses = pattern_bonuses(puzzle.ciphertext());

        let mut ranks: Vec<LetterRank> = puzzle
            .cipher_letters()
            .into_iter()
            .filter(|c| !solved.contains(c))
            .filter_map(|cipher| {
                let plain = puzzle.plain_for(cipher)?;
                let occurrences = counts.get(&cipher).copied().unwrap_or(0);
                let tier = frequency_tier(plain);
                let pattern_bonus = bonuses.get(&cipher).copied().unwrap_or(0);
                let ease = tier * TIER_WEIGHT + occurrences as u32 + pattern_bonus;
                Some(LetterRank {
                    cipher,
                    plain,
                    occurrences,
                    tier,
                    pattern_bonus,
                    ease,
                })
            })
            .collect();

        ranks.sort_by_key(|r| (r.ease, r.occurrences, r.cipher));
        ranks
    }

    /// Unsolved cipher letters in reveal order
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::{Cipher, Difficulty, Puzzle, Quote};
    /// use cryptogram::game::RevealOrderPlanner;
    /// use rustc_hash::FxHashSet;
    ///
    /// let quote = Quote::new("Jazz is a tea", "x").unwrap();
    /// let cipher = Cipher::from_key("BCDEFGHIJKLMNOPQRSTUVWXYZA").unwrap();
    /// let puzzle = Puzzle::with_cipher(quote, cipher, Difficulty::Hard, &[]);
    ///
    /// let order = RevealOrderPlanner.plan(&puzzle, &FxHashSet::default());
    /// // J (cipher K) is the rarest letter and goes first
    /// assert_eq!(order.first(), Some(&b'K'));
    /// ```
    #[must_use]
    pub fn plan(&self, puzzle: &Puzzle, solved: &FxHashSet<u8>) -> Vec<u8> {
        self.ranked(puzzle, solved)
            .into_iter()
            .map(|r| r.cipher)
            .collect()
    }

    /// First letter of the plan, if any remain
    #[must_use]
    pub fn next(&self, puzzle: &Puzzle, solved: &FxHashSet<u8>) -> Option<u8> {
        self.ranked(puzzle, solved).first().map(|r| r.cipher)
    }
}

/// Pattern bonuses per cipher letter, each counted once per letter
fn pattern_bonuses(ciphertext: &str) -> FxHashMap<u8, u32> {
    let mut single = FxHashSet::default();
    let mut apostrophe = FxHashSet::default();
    let mut doubled = FxHashSet::default();

    for word in ciphertext.split_whitespace() {
        let letters: Vec<u8> = word.bytes().filter(u8::is_ascii_uppercase).collect();
        if let [only] = letters.as_slice() {
            single.insert(*only);
        }

        let bytes = word.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\'' {
                if let Some(&prev) = i.checked_sub(1).and_then(|j| bytes.get(j)) {
                    apostrophe.insert(prev);
                }
                if let Some(&next) = bytes.get(i + 1) {
                    apostrophe.insert(next);
                }
            }
        }

        for pair in bytes.windows(2) {
            if pair[0] == pair[1] && pair[0].is_ascii_uppercase() {
                doubled.insert(pair[0]);
            }
        }
    }

    let mut bonuses: FxHashMap<u8, u32> = FxHashMap::default();
    for (set, bonus) in [
        (single, SINGLE_LETTER_WORD_BONUS),
        (apostrophe, APOSTROPHE_BONUS),
        (doubled, DOUBLED_BONUS),
    ] {
        for letter in set.into_iter().filter(u8::is_ascii_uppercase) {
            *bonuses.entry(letter).or_insert(0) += bonus;
        }
    }
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cipher, Difficulty, Quote};

    const SHIFT_KEY: &str = "BCDEFGHIJKLMNOPQRSTUVWXYZA";

    fn shift_puzzle(text: &str) -> Puzzle {
        let quote = Quote::new(text, "x").unwrap();
        let cipher = Cipher::from_key(SHIFT_KEY).unwrap();
        Puzzle::with_cipher(quote, cipher, Difficulty::Hard, &[])
    }

    #[test]
    fn frequency_tiers() {
        assert_eq!(frequency_tier(b'E'), 3);
        assert_eq!(frequency_tier(b'n'), 3);
        assert_eq!(frequency_tier(b'S'), 2);
        assert_eq!(frequency_tier(b'U'), 2);
        assert_eq!(frequency_tier(b'Z'), 1);
        assert_eq!(frequency_tier(b'?'), 1);
    }

    #[test]
    fn frequency_tiers_follow_named_groups() {
        // C ranks just after L by frequency but is not in SHRDLU
        assert_eq!(frequency_tier(b'C'), 1);
        assert_eq!(frequency_tier(b'u'), 2);
        assert_eq!(frequency_tier(b'L'), 2);
        assert_eq!(frequency_tier(b'M'), 1);
        assert!(TIER_MID.iter().all(|&l| frequency_tier(l) == 2));
        assert!(TIER_HIGH.iter().all(|&l| frequency_tier(l) == 3));
    }

    #[test]
    fn rare_letters_first_common_last() {
        // JAZZ IS A TEA -> KBAA JT B UFB
        let puzzle = shift_puzzle("Jazz is a tea");
        let ranks = RevealOrderPlanner.ranked(&puzzle, &FxHashSet::default());
        let order: Vec<u8> = ranks.iter().map(|r| r.plain).collect();

        // J: 1*4+1 = 5, S: 2*4+1 = 9, Z: 1*4+2+1 = 7,
        // I: 3*4+1 = 13, T: 13, E: 13, A: 3*4+3+3 = 18
        assert_eq!(order.first(), Some(&b'J'));
        assert_eq!(order[1], b'Z');
        assert_eq!(order[2], b'S');
        assert_eq!(order.last(), Some(&b'A'));

        let a = ranks.iter().find(|r| r.plain == b'A').unwrap();
        assert_eq!(a.pattern_bonus, SINGLE_LETTER_WORD_BONUS);
        assert_eq!(a.ease, 18);
    }

    #[test]
    fn ties_break_by_cipher_letter() {
        let puzzle = shift_puzzle("Jazz is a tea");
        let plan = RevealOrderPlanner.plan(&puzzle, &FxHashSet::default());
        // I, T, E tie at 13 with one occurrence: cipher J, U, F sort as F, J, U
        assert_eq!(&plan[3..6], b"FJU");
    }

    #[test]
    fn plan_skips_solved() {
        let puzzle = shift_puzzle("Jazz is a tea");
        let solved: FxHashSet<u8> = [b'K', b'A'].into_iter().collect();
        let plan = RevealOrderPlanner.plan(&puzzle, &solved);
        assert!(!plan.contains(&b'K'));
        assert!(!plan.contains(&b'A'));
        assert_eq!(plan.len(), puzzle.cipher_letters().len() - 2);
        assert_eq!(RevealOrderPlanner.next(&puzzle, &solved), Some(b'T'));
    }

    #[test]
    fn apostrophe_and_doubled_bonuses() {
        // DON'T LOOK -> EPO'U MPPL
        let bonuses = pattern_bonuses("EPO'U MPPL");
        assert_eq!(bonuses.get(&b'O'), Some(&APOSTROPHE_BONUS));
        assert_eq!(bonuses.get(&b'U'), Some(&APOSTROPHE_BONUS));
        assert_eq!(bonuses.get(&b'P'), Some(&DOUBLED_BONUS));
        assert_eq!(bonuses.get(&b'E'), None);
    }

    #[test]
    fn single_letter_word_ignores_punctuation() {
        let bonuses = pattern_bonuses("J, BN \"B\"");
        assert_eq!(bonuses.get(&b'J'), Some(&SINGLE_LETTER_WORD_BONUS));
        assert_eq!(bonuses.get(&b'B'), Some(&SINGLE_LETTER_WORD_BONUS));
        assert_eq!(bonuses.get(&b'N'), None);
    }

    #[test]
    fn fully_solved_plan_is_empty() {
        let puzzle = shift_puzzle("Hi");
        let solved: FxHashSet<u8> = puzzle.cipher_letters().into_iter().collect();
        assert!(RevealOrderPlanner.plan(&puzzle, &solved).is_empty());
        assert_eq!(RevealOrderPlanner.next(&puzzle, &solved), None);
    }
}
