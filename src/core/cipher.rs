//! Monoalphabetic substitution cipher
//!
//! A Cipher maps each of the 26 letters to a different letter. The mapping is
//! always a derangement: no letter encrypts to itself.

use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use thiserror::Error;
use tracing::trace;

const ALPHABET_LEN: usize = 26;

/// Derangement of `A..=Z` used to encipher a quote
///
/// Stored as a forward table of letter indices (0 = A).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cipher {
    forward: [u8; ALPHABET_LEN],
}

/// Error type for cipher keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("Cipher key must be exactly 26 letters, got {0}")]
    InvalidLength(usize),
    #[error("Cipher key contains non-letter character {0:?}")]
    InvalidCharacter(char),
    #[error("Cipher key uses letter {0} more than once")]
    DuplicateLetter(char),
    #[error("Cipher key maps {0} to itself")]
    FixedPoint(char),
}

/// Map an ASCII letter (either case) to its alphabet index
#[inline]
pub(crate) fn letter_index(letter: u8) -> Option<usize> {
    letter
        .is_ascii_alphabetic()
        .then(|| usize::from(letter.to_ascii_uppercase() - b'A'))
}

#[inline]
fn index_letter(index: u8) -> u8 {
    b'A' + index
}

impl Cipher {
    /// Draw a uniformly random derangement
    ///
    /// Shuffles the alphabet and rejects any permutation with a fixed point.
    /// About 1 in e shuffles is accepted, so this takes under three draws on
    /// average.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut forward: [u8; ALPHABET_LEN] = std::array::from_fn(|i| i as u8);
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            forward.shuffle(rng);
            if forward
                .iter()
                .enumerate()
                .all(|(i, &c)| usize::from(c) != i)
            {
                trace!(attempts, "drew derangement");
                return Self { forward };
            }
        }
    }

    /// Build a cipher from a 26-letter key, where `key[i]` encrypts letter `i`
    ///
    /// # Errors
    /// Returns `CipherError` if the key is not a fixed-point-free permutation
    /// of the alphabet.
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::Cipher;
    ///
    /// let cipher = Cipher::from_key("BCDEFGHIJKLMNOPQRSTUVWXYZA").unwrap();
    /// assert_eq!(cipher.encrypt("Hal"), "IBM");
    ///
    /// // A maps to itself
    /// assert!(Cipher::from_key("ACBDEFGHIJKLMNOPQRSTUVWXYZ").is_err());
    /// ```
    pub fn from_key(key: &str) -> Result<Self, CipherError> {
        let chars: Vec<char> = key.trim().chars().collect();
        if chars.len() != ALPHABET_LEN {
            return Err(CipherError::InvalidLength(chars.len()));
        }

        let mut forward = [0u8; ALPHABET_LEN];
        let mut seen = [false; ALPHABET_LEN];

        for (i, &ch) in chars.iter().enumerate() {
            let index = u8::try_from(ch)
                .ok()
                .and_then(letter_index)
                .ok_or(CipherError::InvalidCharacter(ch))?;

            if seen[index] {
                return Err(CipherError::DuplicateLetter(ch.to_ascii_uppercase()));
            }
            if index == i {
                return Err(CipherError::FixedPoint(ch.to_ascii_uppercase()));
            }

            seen[index] = true;
            forward[i] = index as u8;
        }

        Ok(Self { forward })
    }

    /// Encrypt one letter; returns `None` for non-letters
    #[must_use]
    pub fn encrypt_letter(&self, letter: u8) -> Option<u8> {
        letter_index(letter).map(|i| index_letter(self.forward[i]))
    }

    /// Decrypt one letter; returns `None` for non-letters
    #[must_use]
    pub fn decrypt_letter(&self, letter: u8) -> Option<u8> {
        let target = letter_index(letter)? as u8;
        self.forward
            .iter()
            .position(|&c| c == target)
            .map(|i| index_letter(i as u8))
    }

    /// Encrypt text, emitting uppercase letters and copying everything else
    #[must_use]
    pub fn encrypt(&self, text: &str) -> String {
        text.chars()
            .map(|ch| {
                u8::try_from(ch)
                    .ok()
                    .and_then(|b| self.encrypt_letter(b))
                    .map_or(ch, char::from)
            })
            .collect()
    }

    /// Decrypt text produced by [`Cipher::encrypt`]
    #[must_use]
    pub fn decrypt(&self, text: &str) -> String {
        self.inverse().encrypt(text)
    }

    /// The cipher that undoes this one
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut backward = [0u8; ALPHABET_LEN];
        for (i, &c) in self.forward.iter().enumerate() {
            backward[usize::from(c)] = i as u8;
        }
        Self { forward: backward }
    }

    /// The 26-letter key accepted by [`Cipher::from_key`]
    #[must_use]
    pub fn key(&self) -> String {
        self.forward
            .iter()
            .map(|&c| char::from(index_letter(c)))
            .collect()
    }

    /// True if no letter maps to itself
    #[must_use]
    pub fn is_derangement(&self) -> bool {
        self.forward
            .iter()
            .enumerate()
            .all(|(i, &c)| usize::from(c) != i)
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
