//! Embedded quote corpus
//!
//! Quotes compiled into the binary at build time.

// Include generated quote list from build script
include!(concat!(env!("OUT_DIR"), "/quotes.rs"));
