// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse and validate command-line arguments (cli.rs)
// 2. Set up logging to stderr
// 3. Run the worker pool over every URL (pool/)
// 4. Print each result the moment it arrives
// 5. Exit with proper code (0 = done, 1 = bad arguments, 2 = internal error)
//
// Per-URL failures (404s, refused connections, ...) are part of the output,
// not a reason to fail the run, so they still end in exit code 0.
// =============================================================================

mod cli;    // src/cli.rs - command-line parsing
mod pool;   // src/pool/ - worker pool and dispatcher
mod report; // src/report.rs - per-URL result and its formatting
mod scan;   // src/scan/ - fetching pages and counting words

use anyhow::{Context, Result};
use cli::{CliError, Config};
use reqwest::Client;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(CliError::Parse(e)) => {
            // --help and --version also land here; they go to stdout and exit 0
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
        Err(CliError::Invalid(e)) => {
            eprintln!("{}\n", e);
            eprint!("{}", cli::usage());
            std::process::exit(1);
        }
    };

    init_tracing(config.verbose);

    let exit_code = match run(config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Scans every link and prints results as they come in
async fn run(config: Config) -> Result<i32> {
    let client = Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let json = config.json;
    pool::dispatch(client, &config.word, config.workers, config.links, |result| {
        if json {
            match result.to_json() {
                Ok(line) => println!("{}", line),
                Err(e) => error!(link = %result.link, error = %e, "could not encode result"),
            }
        } else {
            println!("{}", result);
        }
    })
    .await
    .context("worker pool stopped early")?;

    Ok(0)
}

// Logs go to stderr so stdout only ever carries results
//
// RUST_LOG wins when set; otherwise warnings only, or our own debug
// output with --verbose.
fn init_tracing(verbose: bool) {
    let default = if verbose { "warn,word_hunter=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
