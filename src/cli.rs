// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two steps:
// 1. clap turns argv into a `Cli` struct (flags and positional URLs)
// 2. `Config::from_args` checks the values and hands back a validated `Config`
//
// Nothing here touches global state or exits the process. main.rs decides
// what to print and which exit code to use.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - TryFrom: a conversion that can fail
// =============================================================================

use clap::{CommandFactory, Parser};
use thiserror::Error;

const USAGE: &str = "word-hunter [options] URL1 [URL2 [URL3 ...]]";

// Raw command-line arguments, straight from clap
#[derive(Parser, Debug)]
#[command(
    name = "word-hunter",
    version = "0.1.0",
    override_usage = USAGE,
    about = "Count how many times a word appears on one or more web pages",
    long_about = "This program accepts one or more URLs as positional arguments and \
                  outputs the number of times the specified target word was found \
                  on each page."
)]
pub struct Cli {
    /// The word to search for
    #[arg(short, long, default_value = "")]
    pub word: String,

    /// The number of workers to use
    #[arg(short = 'n', long, default_value_t = 1)]
    pub workers: usize,

    /// Print each result as a line of JSON
    #[arg(long)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Pages to scan
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}

// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub word: String,
    pub workers: usize,
    pub links: Vec<String>,
    pub json: bool,
    pub verbose: bool,
}

// Values clap accepted but that make no sense for a run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Need a word to process.")]
    MissingWord,

    #[error("Number of workers must be greater than 0.")]
    NoWorkers,

    #[error("Need links to process.")]
    NoLinks,
}

#[derive(Debug, Error)]
pub enum CliError {
    /// Parse failure, or a --help/--version request
    #[error(transparent)]
    Parse(#[from] clap::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.word.is_empty() {
            return Err(ConfigError::MissingWord);
        }
        if cli.workers < 1 {
            return Err(ConfigError::NoWorkers);
        }
        if cli.urls.is_empty() {
            return Err(ConfigError::NoLinks);
        }

        Ok(Config {
            word: cli.word,
            workers: cli.workers,
            links: cli.urls,
            json: cli.json,
            verbose: cli.verbose,
        })
    }
}

impl Config {
    // Parses an argv-like sequence (first item is the program name)
    pub fn from_args<I, T>(args: I) -> Result<Config, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Ok(Config::try_from(cli)?)
    }
}

// Full help text, printed after a validation error
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not make --word required in clap?
//    - We want our own message ("Need a word to process.") followed by usage
//    - An empty --word "" must fail the same way as a missing one
//
// 2. Why try_parse_from instead of parse?
//    - parse() prints and exits on error, which makes it untestable
//    - try_parse_from() returns a Result we can inspect in tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Config, CliError> {
        Config::from_args(std::iter::once("word-hunter").chain(args.iter().copied()))
    }

    #[test]
    fn test_valid_args() {
        let config = parse(&["--word", "fox", "--workers", "3", "http://a", "http://b"]).unwrap();
        assert_eq!(config.word, "fox");
        assert_eq!(config.workers, 3);
        assert_eq!(config.links, vec!["http://a", "http://b"]);
        assert!(!config.json);
    }

    #[test]
    fn test_short_flags_and_default_workers() {
        let config = parse(&["-w", "fox", "--json", "http://a"]).unwrap();
        assert_eq!(config.workers, 1);
        assert!(config.json);
    }

    #[test]
    fn test_missing_word() {
        let err = parse(&["http://a"]).unwrap_err();
        assert!(matches!(err, CliError::Invalid(ConfigError::MissingWord)));

        let err = parse(&["--word", "", "http://a"]).unwrap_err();
        assert!(matches!(err, CliError::Invalid(ConfigError::MissingWord)));
    }

    #[test]
    fn test_zero_workers() {
        let err = parse(&["--word", "fox", "--workers", "0", "http://a"]).unwrap_err();
        assert!(matches!(err, CliError::Invalid(ConfigError::NoWorkers)));
    }

    #[test]
    fn test_no_links() {
        let err = parse(&["--word", "fox"]).unwrap_err();
        assert!(matches!(err, CliError::Invalid(ConfigError::NoLinks)));
        assert_eq!(err.to_string(), "Need links to process.");
    }

    #[test]
    fn test_bad_worker_count_is_parse_error() {
        let err = parse(&["--word", "fox", "--workers", "-2", "http://a"]).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
    }

    #[test]
    fn test_help_is_parse_error_kind() {
        match parse(&["--help"]).unwrap_err() {
            CliError::Parse(e) => assert_eq!(e.kind(), ErrorKind::DisplayHelp),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_usage_mentions_urls() {
        assert!(usage().contains("URL1 [URL2 [URL3 ...]]"));
    }
}
