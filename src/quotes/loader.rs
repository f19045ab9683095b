//! Quote loading utilities
//!
//! Loads quote corpora from `text|author` line files or JSON arrays, or
//! converts the embedded constants.

use crate::core::Quote;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for quote files
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read quote file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse quote JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct RawQuote {
    text: String,
    #[serde(default)]
    author: String,
}

/// Load quotes from a file
///
/// Files ending in `.json` are read as an array of `{"text", "author"}`
/// objects. Anything else is read as one `text|author` quote per line; lines
/// starting with `#` are comments. Invalid quotes are skipped.
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read or the JSON is malformed.
///
/// # Examples
/// ```no_run
/// use cryptogram::quotes::loader::load_from_file;
///
/// let quotes = load_from_file("data/quotes.txt").unwrap();
/// println!("Loaded {} quotes", quotes.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Quote>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let quotes = if is_json {
        parse_json(&content)?
    } else {
        parse_lines(&content)
    };

    debug!(path = %path.display(), count = quotes.len(), "loaded quotes");
    if quotes.is_empty() {
        warn!(path = %path.display(), "quote file contains no usable quotes");
    }
    Ok(quotes)
}

/// Parse `text|author` lines; a line without `|` is attributed to "Unknown"
#[must_use]
pub fn parse_lines(content: &str) -> Vec<Quote> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (text, author) = line.split_once('|').unwrap_or((line, ""));
            Quote::new(text, author).ok()
        })
        .collect()
}

/// Parse a JSON array of quote objects
///
/// # Errors
///
/// Returns the serde error if the input is not an array of quote objects.
pub fn parse_json(content: &str) -> Result<Vec<Quote>, serde_json::Error> {
    let raw: Vec<RawQuote> = serde_json::from_str(content)?;
    Ok(raw
        .into_iter()
        .filter_map(|q| Quote::new(q.text, q.author).ok())
        .collect())
}

/// Convert the embedded `(text, author)` slice to quotes
///
/// # Examples
/// ```
/// use cryptogram::quotes::loader::quotes_from_slice;
/// use cryptogram::quotes::QUOTES;
///
/// let quotes = quotes_from_slice(QUOTES);
/// assert_eq!(quotes.len(), QUOTES.len());
/// ```
#[must_use]
pub fn quotes_from_slice(slice: &[(&str, &str)]) -> Vec<Quote> {
    slice
        .iter()
        .filter_map(|&(text, author)| Quote::new(text, author).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn quotes_from_slice_skips_invalid() {
        let input = &[("Time is money.", "Franklin"), ("   ", "Nobody"), ("42", "Adams")];
        let quotes = quotes_from_slice(input);

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text(), "Time is money.");
    }

    #[test]
    fn parse_lines_handles_comments_and_missing_author() {
        let content = "# header\n\nKnowledge is power.|Francis Bacon\nHello world\n  |Ghost\n";
        let quotes = parse_lines(content);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].author(), "Francis Bacon");
        assert_eq!(quotes[1].text(), "Hello world");
        assert_eq!(quotes[1].author(), "Unknown");
    }

    #[test]
    fn parse_json_array() {
        let content = r#"[
            {"text": "Fortune favors the bold.", "author": "Virgil"},
            {"text": "No author here"},
            {"text": "", "author": "Empty"}
        ]"#;
        let quotes = parse_json(content).unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].author(), "Virgil");
        assert_eq!(quotes[1].author(), "Unknown");
    }

    #[test]
    fn parse_json_rejects_malformed() {
        assert!(parse_json("{not json").is_err());
        assert!(parse_json(r#"{"text": "object, not array"}"#).is_err());
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let result = load_from_file("/definitely/not/here/quotes.txt");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "quotes.json",
            r#"[{"text": "Carpe diem.", "author": "Horace"}]"#,
        );

        let quotes = load_from_file(&path).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text(), "Carpe diem.");
        assert_eq!(quotes[0].author(), "Horace");
    }

    #[test]
    fn load_text_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "quotes.txt",
            "# mine\nCarpe diem.|Horace\nVeni vidi vici\n",
        );

        let quotes = load_from_file(&path).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].author(), "Horace");
        assert_eq!(quotes[1].author(), "Unknown");
    }

    #[test]
    fn text_file_is_not_parsed_as_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "quotes.txt", r#"[{"text": "Carpe diem."}]"#);

        // Read as a single line quote, brackets and all
        let quotes = load_from_file(&path).unwrap();
        assert_eq!(quotes.len(), 1);
        assert!(quotes[0].text().starts_with('['));
    }

    #[test]
    fn malformed_json_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "broken.json", "[{\"text\": ");

        let result = load_from_file(&path);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn uppercase_json_extension_is_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "QUOTES.JSON", r#"[{"text": "Know thyself."}]"#);

        let quotes = load_from_file(&path).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].text(), "Know thyself.");
    }

    #[test]
    fn load_from_embedded_corpus() {
        use crate::quotes::QUOTES;

        let quotes = quotes_from_slice(QUOTES);
        assert_eq!(quotes.len(), QUOTES.len());
    }
}
