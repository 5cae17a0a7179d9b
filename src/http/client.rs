use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};
use crate::runner::RunConfig;

/// Builds the HTTP client shared by every call in one run.
///
/// The request timeout bounds each whole call (connect + send + receive).
/// The per-host pool cap matches the run's concurrency limit so reqwest's
/// own connection pooling never becomes a second, inconsistent bottleneck.
/// The client is dropped, releasing its connections, when the run ends.
///
/// # Errors
///
/// Returns an error when the underlying client cannot be constructed.
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    let pool_cap = usize::try_from(config.concurrency_limit.get()).unwrap_or(usize::MAX);
    Client::builder()
        .timeout(config.timeout.to_duration())
        .pool_max_idle_per_host(pool_cap)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
