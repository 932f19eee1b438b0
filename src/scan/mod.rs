// src/scan/mod.rs
// =============================================================================
// This module turns one URL into a word count.
//
// Submodules:
// - counter: Counts a word in a stream of bytes
// - fetch: Downloads a page and streams its body into the counter
//
// Rust concepts:
// - pub use: Re-export items so callers write `scan::fetch_and_count()`
// =============================================================================

mod counter;
mod fetch;

pub use fetch::{fetch_and_count, FetchError};
