// src/pool/worker.rs
// =============================================================================
// One worker: pull a URL, fetch and count, push the result, repeat.
//
// Workers share exactly two things: the work queue they read from and the
// results sink they write to. The loop ends when the queue is closed and
// empty, so a finished pool leaves no tasks behind.
// =============================================================================

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::report::PageResult;
use crate::scan::fetch_and_count;

pub async fn worker(
    id: usize,
    client: Client,
    word: Arc<str>,
    queue: async_channel::Receiver<String>,
    sink: mpsc::Sender<PageResult>,
) {
    debug!(worker = id, "worker started");

    // recv() fails only once the queue is closed and drained
    while let Ok(link) = queue.recv().await {
        debug!(worker = id, %link, "fetching");
        let (count, error) = fetch_and_count(&client, &link, &word).await;

        match &error {
            Some(e) => debug!(
                worker = id,
                %link,
                count,
                transport = e.is_transport(),
                error = %e,
                "scan failed"
            ),
            None => debug!(worker = id, %link, count, "scan finished"),
        }

        if sink.send(PageResult::new(link, count, error)).await.is_err() {
            warn!(worker = id, "results sink closed, stopping");
            break;
        }
    }

    debug!(worker = id, "worker exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_worker_drains_queue_then_exits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("cat dog cat"))
            .mount(&server)
            .await;

        let (queue_tx, queue_rx) = async_channel::bounded(3);
        let (sink_tx, mut sink_rx) = mpsc::channel(3);
        for i in 0..3 {
            queue_tx.send(format!("{}/{}", server.uri(), i)).await.unwrap();
        }
        queue_tx.close();

        // Returns on its own once the queue is closed and empty
        worker(0, Client::new(), Arc::from("cat"), queue_rx, sink_tx).await;

        let mut results = Vec::new();
        while let Some(result) = sink_rx.recv().await {
            results.push(result);
        }
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.count == 2 && r.is_ok()));
    }

    #[tokio::test]
    async fn test_worker_stops_when_sink_closed() {
        let (queue_tx, queue_rx) = async_channel::bounded(2);
        let (sink_tx, sink_rx) = mpsc::channel(2);
        drop(sink_rx);
        queue_tx.send("not a url".to_string()).await.unwrap();
        queue_tx.send("also not a url".to_string()).await.unwrap();

        // Queue is still open, so only the closed sink can end the loop
        worker(0, Client::new(), Arc::from("cat"), queue_rx, sink_tx).await;
        assert_eq!(queue_tx.len(), 1);
    }
}
