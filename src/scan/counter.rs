// src/scan/counter.rs
// =============================================================================
// This module counts how many times a word appears in a stream of bytes.
//
// How it works:
// - The body arrives as a stream of chunks (whatever size the network gives us)
// - We walk each chunk byte by byte, splitting on whitespace
// - Every finished token is compared to the target word (exact, case-sensitive)
// - A token can start in one chunk and end in the next, so we carry it over
//
// We never hold the whole body in memory. The only thing we keep between
// chunks is the current token, and only up to the length of the word.
//
// Rust concepts:
// - Generics: the counter works with any stream of byte chunks
// - Streams: the async version of an iterator
// =============================================================================

use futures::{Stream, StreamExt};

// Counts occurrences of `word` in a stream of byte chunks
//
// Parameters:
//   word: the token to look for
//   stream: any stream yielding Result<chunk, error>
//
// Returns: (count, first_error)
//   count is everything matched up to the point we stopped
//   first_error is None when the stream was read to the end cleanly
pub async fn count_occurrences<S, B, E>(word: &str, stream: S) -> (u64, Option<E>)
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    let mut counter = WordCounter::new(word);
    let mut stream = std::pin::pin!(stream);

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => counter.feed(bytes.as_ref()),
            Err(e) => return (counter.finish(), Some(e)),
        }
    }

    (counter.finish(), None)
}

// Incremental whitespace tokenizer that only remembers what it must
struct WordCounter<'w> {
    word: &'w [u8],
    // Prefix of the current token, capped at word.len() + 1 bytes
    token: Vec<u8>,
    // Full length of the current token
    token_len: usize,
    // Leading bytes of a UTF-8 character cut off at the end of a chunk
    pending: Vec<u8>,
    count: u64,
}

impl<'w> WordCounter<'w> {
    fn new(word: &'w str) -> Self {
        Self {
            word: word.as_bytes(),
            token: Vec::with_capacity(word.len() + 1),
            token_len: 0,
            pending: Vec::new(),
            count: 0,
        }
    }

    fn feed(&mut self, chunk: &[u8]) {
        if self.pending.is_empty() {
            self.scan(chunk);
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            self.scan(&joined);
        }
    }

    fn scan(&mut self, data: &[u8]) {
        let mut i = 0;
        while i < data.len() {
            match whitespace_width(&data[i..]) {
                // Character continues in the next chunk
                None => {
                    self.pending.extend_from_slice(&data[i..]);
                    return;
                }
                Some(0) => {
                    self.push_byte(data[i]);
                    i += 1;
                }
                Some(width) => {
                    self.end_token();
                    i += width;
                }
            }
        }
    }

    fn push_byte(&mut self, byte: u8) {
        if self.token.len() <= self.word.len() {
            self.token.push(byte);
        }
        self.token_len += 1;
    }

    fn end_token(&mut self) {
        if self.token_len > 0 && self.token_len == self.word.len() && self.token == self.word {
            self.count += 1;
        }
        self.token.clear();
        self.token_len = 0;
    }

    fn finish(mut self) -> u64 {
        // A truncated character at end of input is just part of the last token
        let pending = std::mem::take(&mut self.pending);
        for byte in pending {
            self.push_byte(byte);
        }
        self.end_token();
        self.count
    }
}

// Width in bytes of the whitespace character starting at bytes[0]
//
// Returns:
//   Some(0)  the byte is not the start of a whitespace character
//   Some(n)  a whitespace character n bytes long starts here
//   None     bytes[0] starts a multi-byte character we can't see all of yet
fn whitespace_width(bytes: &[u8]) -> Option<usize> {
    let first = bytes[0];
    if first.is_ascii() {
        return Some(if char::from(first).is_whitespace() { 1 } else { 0 });
    }

    let width = match first {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        // Continuation or invalid byte, never whitespace
        _ => return Some(0),
    };

    if bytes.len() < width {
        // Only wait for more input if what we have so far could still be
        // the start of one character; otherwise the lead byte stands alone
        let continues = bytes[1..].iter().all(|b| (0x80..=0xBF).contains(b));
        return if continues { None } else { Some(0) };
    }

    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) if s.chars().next().is_some_and(char::is_whitespace) => Some(width),
        _ => Some(0),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a generic Stream instead of reqwest::Response?
//    - The counter doesn't care where bytes come from
//    - Tests can feed it hand-made chunks with futures::stream::iter
//    - B: AsRef<[u8]> accepts Vec<u8>, &[u8], bytes::Bytes, ...
//
// 2. What does std::pin::pin! do?
//    - Polling a stream needs it pinned in memory
//    - pin! pins it on the stack, no heap allocation needed
//
// 3. Why check UTF-8 width?
//    - Some whitespace is more than one byte (e.g. U+00A0 is 0xC2 0xA0)
//    - A chunk can end in the middle of such a character
//    - We stash the partial bytes in `pending` and finish them next chunk
// -----------------------------------------------------------------------------
