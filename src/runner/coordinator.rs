use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::http;

use super::config::RunConfig;
use super::result::{CallResult, RunResult};

/// Runs every configured call through a bounded worker pool and returns the
/// complete, index-ordered result set.
///
/// Individual call failures never abort the run or their siblings; the run
/// finishes only once every call index has produced a result.
///
/// # Errors
///
/// Returns an error only when the shared HTTP client cannot be built.
/// Configuration validation happens in [`RunConfig::from_args`] before a
/// run starts.
pub async fn run_all(config: &RunConfig) -> AppResult<RunResult> {
    let client = http::build_client(config)?;
    let call_count = config.call_count.get();
    let capacity = usize::try_from(call_count).unwrap_or(usize::MAX);
    let permits = usize::try_from(config.concurrency_limit.get()).unwrap_or(usize::MAX);

    let shared = Arc::new(config.clone());
    let semaphore = Arc::new(Semaphore::new(permits));
    // Capacity covers every possible result, so workers never block on send
    // and draining after join cannot deadlock.
    let (results_tx, mut results_rx) = mpsc::channel::<CallResult>(capacity);

    let mut handles = Vec::with_capacity(capacity);
    for index in 1..=call_count {
        let semaphore = Arc::clone(&semaphore);
        let results_tx = results_tx.clone();
        let client = client.clone();
        let shared = Arc::clone(&shared);

        handles.push(tokio::spawn(async move {
            // The permit is what bounds in-flight calls; it is held for the
            // full lifetime of the network operation.
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let result = http::execute_call(&client, index, &shared).await;
            if results_tx.send(result).await.is_err() {
                warn!(call = index, "result receiver dropped");
            }
        }));
    }
    drop(results_tx);

    for handle in handles {
        if handle.await.is_err() {
            warn!("call task aborted before reporting a result");
        }
    }

    let mut calls = Vec::with_capacity(capacity);
    while let Some(result) = results_rx.recv().await {
        calls.push(result);
    }

    reconcile_missing(&mut calls, call_count);
    calls.sort_unstable_by_key(|call| call.call_index);
    debug!(calls = calls.len(), "run complete");

    Ok(RunResult { calls })
}

/// Backfills a failure record for any index that never produced a result
/// (a worker died without reporting), so the returned set always covers
/// every logical call exactly once.
pub(crate) fn reconcile_missing(calls: &mut Vec<CallResult>, call_count: u32) {
    let expected = usize::try_from(call_count).unwrap_or(usize::MAX);
    if calls.len() == expected {
        return;
    }

    let mut seen = vec![false; expected.saturating_add(1)];
    for call in calls.iter() {
        if let Some(slot) = seen.get_mut(usize::try_from(call.call_index).unwrap_or(0)) {
            *slot = true;
        }
    }
    for index in 1..=call_count {
        let slot = seen.get(usize::try_from(index).unwrap_or(0));
        if slot == Some(&false) {
            calls.push(CallResult::failure(
                index,
                "call task aborted before completion".to_owned(),
            ));
        }
    }
}
