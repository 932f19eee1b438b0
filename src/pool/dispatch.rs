// src/pool/dispatch.rs
// =============================================================================
// This module runs the whole fan-out / fan-in.
//
// How it works:
// 1. Create the work queue and results sink, both sized to the number of links
// 2. Spawn `workers` tasks that all share the queue and the sink
// 3. Push every link onto the queue (input order), then close it
// 4. Receive exactly one result per link, in the order they finish
// 5. Join the workers, which have all exited once the queue ran dry
//
// Because both channels hold the whole workload, neither side ever waits on
// capacity. The price is memory proportional to the number of links.
//
// Rust concepts:
// - tokio::spawn / JoinSet: running and collecting concurrent tasks
// - Channels: the only way workers talk to each other or to us
// - Closures: the caller decides what to do with each result
// =============================================================================

use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::worker::worker;
use crate::report::PageResult;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Every worker went away before all links were reported
    #[error("results sink closed after {received} of {expected} results")]
    SinkClosed { received: usize, expected: usize },
}

// Scans every link with a pool of `workers` tasks
//
// Parameters:
//   client: shared HTTP client (cheap to clone, pools connections)
//   word: the word to count on every page
//   workers: pool size, at least 1
//   links: pages to scan
//   on_result: called once per link, in completion order
//
// Returns: how many results were delivered (always links.len() on Ok)
pub async fn dispatch<F>(
    client: Client,
    word: &str,
    workers: usize,
    links: Vec<String>,
    mut on_result: F,
) -> Result<usize, DispatchError>
where
    F: FnMut(PageResult),
{
    let expected = links.len();
    if expected == 0 {
        return Ok(0);
    }

    let (queue_tx, queue_rx) = async_channel::bounded::<String>(expected);
    let (sink_tx, mut sink_rx) = mpsc::channel::<PageResult>(expected);
    let word: Arc<str> = Arc::from(word);

    info!(workers, links = expected, "starting worker pool");

    let mut pool = JoinSet::new();
    for id in 0..workers {
        pool.spawn(worker(
            id,
            client.clone(),
            Arc::clone(&word),
            queue_rx.clone(),
            sink_tx.clone(),
        ));
    }

    // Only workers hold these now; if they all exit, recv() below sees None
    drop(queue_rx);
    drop(sink_tx);

    for link in links {
        // Only fails if every worker is already gone
        queue_tx
            .send(link)
            .await
            .map_err(|_| DispatchError::SinkClosed { received: 0, expected })?;
    }
    queue_tx.close();
    debug!("all links queued, queue closed");

    let mut received = 0;
    while received < expected {
        match sink_rx.recv().await {
            Some(result) => {
                received += 1;
                debug!(received, expected, link = %result.link, ok = result.is_ok(), "result received");
                on_result(result);
            }
            None => return Err(DispatchError::SinkClosed { received, expected }),
        }
    }

    // The queue is closed and empty, so every worker is on its way out
    while let Some(joined) = pool.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "worker task failed");
        }
    }

    info!(received, "all results collected");
    Ok(received)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async_channel for the queue but tokio::mpsc for results?
//    - Many workers read the queue, so it needs many consumers (MPMC)
//    - Only we read the results, so tokio's mpsc (single consumer) is enough
//
// 2. Why drop(queue_rx) and drop(sink_tx)?
//    - A channel stays open while any handle to it is alive
//    - If we kept sink_tx, recv() would wait forever even after every worker
//      died, instead of returning None
//
// 3. Why is the result order random?
//    - Workers finish whenever their page finishes downloading
//    - A slow page early in the list is reported after fast ones behind it
// -----------------------------------------------------------------------------
