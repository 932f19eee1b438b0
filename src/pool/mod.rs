// src/pool/mod.rs
// =============================================================================
// The bounded worker pool.
//
// - worker: the fetch-count-report loop each task runs
// - dispatch: sets up the channels, spawns workers, collects results
// =============================================================================

mod dispatch;
mod worker;

pub use dispatch::{dispatch, DispatchError};
