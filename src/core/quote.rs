//! Quote representation
//!
//! A Quote is the plaintext of a cryptogram plus its attribution.

use std::fmt;
use thiserror::Error;

/// A famous quote used as cryptogram plaintext
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quote {
    text: String,
    author: String,
}

/// Error type for invalid quotes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Quote text must not be empty")]
    Empty,
    #[error("Quote must contain at least one ASCII letter")]
    NoLetters,
}

impl Quote {
    /// Create a new Quote
    ///
    /// Both fields are trimmed. A blank author becomes "Unknown".
    ///
    /// # Errors
    /// Returns `QuoteError` if:
    /// - The text is empty after trimming
    /// - The text has no ASCII letters to encipher
    ///
    /// # Examples
    /// ```
    /// use cryptogram::core::Quote;
    ///
    /// let quote = Quote::new("Knowledge is power.", "Francis Bacon").unwrap();
    /// assert_eq!(quote.author(), "Francis Bacon");
    ///
    /// assert!(Quote::new("   ", "Nobody").is_err());
    /// assert!(Quote::new("1984", "Orwell").is_err());
    /// ```
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Result<Self, QuoteError> {
        let text = text.into().trim().to_string();
        let author = author.into().trim().to_string();

        if text.is_empty() {
            return Err(QuoteError::Empty);
        }

        if !text.bytes().any(|b| b.is_ascii_alphabetic()) {
            return Err(QuoteError::NoLetters);
        }

        let author = if author.is_empty() {
            "Unknown".to_string()
        } else {
            author
        };

        Ok(Self { text, author })
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Uppercase ASCII letters of the text, in reading order
    pub fn letters(&self) -> impl Iterator<Item = u8> + '_ {
        self.text
            .bytes()
            .filter(u8::is_ascii_alphabetic)
            .map(|b| b.to_ascii_uppercase())
    }

    /// Whitespace-separated words of the text
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.split_whitespace()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_trims_fields() {
        let quote = Quote::new("  Time is money.  ", " Benjamin Franklin ").unwrap();
        assert_eq!(quote.text(), "Time is money.");
        assert_eq!(quote.author(), "Benjamin Franklin");
    }

    #[test]
    fn quote_blank_author_is_unknown() {
        let quote = Quote::new("Hello there", "  ").unwrap();
        assert_eq!(quote.author(), "Unknown");
    }

    #[test]
    fn quote_rejects_empty_and_letterless() {
        assert_eq!(Quote::new("", "x"), Err(QuoteError::Empty));
        assert_eq!(Quote::new("  \t ", "x"), Err(QuoteError::Empty));
        assert_eq!(Quote::new("123 ... !!", "x"), Err(QuoteError::NoLetters));
    }

    #[test]
    fn quote_letters_skip_punctuation() {
        let quote = Quote::new("I'm ok, 2!", "x").unwrap();
        let letters: Vec<u8> = quote.letters().collect();
        assert_eq!(letters, b"IMOK");
    }

    #[test]
    fn quote_words() {
        let quote = Quote::new("Do or  do not.", "Yoda").unwrap();
        let words: Vec<&str> = quote.words().collect();
        assert_eq!(words, vec!["Do", "or", "do", "not."]);
    }

    #[test]
    fn quote_display() {
        let quote = Quote::new("Hope is a waking dream.", "Aristotle").unwrap();
        assert_eq!(quote.to_string(), "\"Hope is a waking dream.\" - Aristotle");
    }
}
