//! Build script to generate the embedded quote corpus
//!
//! Reads `text|author` lines and generates Rust source code with a const array.

use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    generate_quote_list(
        "data/quotes.txt",
        &Path::new(&out_dir).join("quotes.rs"),
        "QUOTES",
        "Famous quotes used as cryptogram plaintexts",
    );

    // Rebuild if the corpus changes
    println!("cargo:rerun-if-changed=data/quotes.txt");
}

fn generate_quote_list(input_path: &str, output_path: &Path, const_name: &str, doc_comment: &str) {
    let content = fs::read_to_string(input_path)
        .unwrap_or_else(|e| panic!("Failed to read {input_path}: {e}"));

    let entries: Vec<(&str, &str)> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once('|') {
            Some((text, author)) => (text.trim(), author.trim()),
            None => (line, "Unknown"),
        })
        .collect();
    let count = entries.len();

    let mut output = fs::File::create(output_path)
        .unwrap_or_else(|e| panic!("Failed to create {}: {e}", output_path.display()));

    writeln!(output, "// Generated quote list").unwrap();
    writeln!(output, "//").unwrap();
    writeln!(output, "// {doc_comment}").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// {doc_comment} as `(text, author)` pairs").unwrap();
    writeln!(output, "pub const {const_name}: &[(&str, &str)] = &[").unwrap();

    for (text, author) in entries {
        // Debug formatting yields a valid, escaped Rust string literal
        writeln!(output, "    ({text:?}, {author:?}),").unwrap();
    }

    writeln!(output, "];").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "/// Number of quotes in {const_name}").unwrap();
    writeln!(output, "pub const {const_name}_COUNT: usize = {count};").unwrap();
}
