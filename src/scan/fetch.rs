// src/scan/fetch.rs
// =============================================================================
// This module downloads a page and feeds its body to the word counter.
//
// Key functionality:
// - Makes a plain HTTP GET (no retries, no timeout)
// - Sorts failures into: bad URL, transport error, wrong status, body error
// - Streams the body straight into the counter, never buffering the page
//
// Only a 200 status counts as success. Any other code, including other 2xx
// codes like 204, is reported as "did not receive 200 OK".
// =============================================================================

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use super::counter::count_occurrences;

// Everything that can go wrong while fetching and scanning one page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The link couldn't be parsed as a URL
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// DNS, connect, TLS, ... the request never got a response
    #[error(transparent)]
    Transport(reqwest::Error),

    /// Got a response, but not 200 OK
    #[error("did not receive 200 OK")]
    NotOk { status: StatusCode },

    /// The body stream broke off mid-scan
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl FetchError {
    /// True for failures where no response was received at all
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::InvalidUrl(_) | FetchError::Transport(_))
    }
}

// Fetches `link` and counts occurrences of `word` in its body
//
// Returns: (count, error)
//   Any failure before the body is read gives a count of 0.
//   A Body error comes with the count reached before the stream broke.
pub async fn fetch_and_count(client: &Client, link: &str, word: &str) -> (u64, Option<FetchError>) {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(e) => return (0, Some(e.into())),
    };

    // The response is owned here, so it's dropped (and the connection
    // released) on every return path below
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return (0, Some(FetchError::Transport(e))),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return (0, Some(FetchError::NotOk { status }));
    }

    let (count, err) = count_occurrences(word, response.bytes_stream()).await;
    (count, err.map(FetchError::Body))
}
