use std::time::Duration;

use reqwest::Client;
use tokio::time::Instant;
use tracing::debug;

use crate::args::HttpMethod;
use crate::runner::{CallResult, RunConfig};

/// Maximum number of characters of the response body kept as a preview.
const PREVIEW_CHARS: usize = 100;

/// Executes one logical call and converts any outcome into a [`CallResult`].
///
/// Transport errors, timeout expiry, DNS and TLS failures are all captured
/// as `Failure` outcomes; this function never propagates an error to the
/// coordinator.
pub async fn execute_call(client: &Client, index: u32, config: &RunConfig) -> CallResult {
    let start = Instant::now();

    match send_request(client, config).await {
        Ok((status_code, body)) => {
            let elapsed = round_to_millis(start.elapsed());
            debug!(call = index, status = status_code, ?elapsed, "call completed");
            CallResult::success(index, status_code, preview(&body), elapsed)
        }
        Err(err) => {
            debug!(call = index, error = %err, "call failed");
            CallResult::failure(index, describe_error(&err))
        }
    }
}

async fn send_request(
    client: &Client,
    config: &RunConfig,
) -> Result<(u16, String), reqwest::Error> {
    let mut request = match config.method {
        HttpMethod::Get => client.get(&config.target_url),
        HttpMethod::Post => client.post(&config.target_url).body(config.body.clone()),
    };
    for (key, value) in &config.headers {
        request = request.header(key.as_str(), value.as_str());
    }

    let response = request.send().await?;
    let status_code = response.status().as_u16();
    // The full body is read (no streaming) so the preview can be sliced.
    let body = response.text().await?;
    Ok((status_code, body))
}

pub(crate) fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

/// Rounds half-up to whole milliseconds.
pub(crate) fn round_to_millis(elapsed: Duration) -> Duration {
    let millis = elapsed
        .as_micros()
        .saturating_add(500)
        .checked_div(1_000)
        .unwrap_or(0);
    Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
}

fn describe_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_owned()
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else if err.is_request() {
        format!("request failed: {}", err)
    } else {
        err.to_string()
    }
}
