use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::ReportError;
use crate::runner::RunResult;

use super::histogram::LatencyHistogram;

/// Aggregate statistics over one finished run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub total_calls: u64,
    pub successes: u64,
    pub failures: u64,
    /// Mean/min/max cover every call, so failed calls contribute their zero
    /// elapsed time, matching the per-call log.
    pub mean_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
    /// Percentiles cover successful calls only.
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
    /// `call count / sum(elapsed)` in requests per second; zero when no
    /// time was measured.
    pub throughput_rps: f64,
}

/// Computes summary statistics over the full result set.
///
/// # Errors
///
/// Returns an error when the latency histogram cannot be built.
pub fn compute_stats(result: &RunResult) -> Result<RunStats, ReportError> {
    let elapsed: Vec<f64> = result.calls.iter().map(|call| call.elapsed_secs()).collect();
    let sum: f64 = elapsed.iter().sum();
    let count = u32::try_from(elapsed.len()).unwrap_or(u32::MAX);

    let mean_secs = if elapsed.is_empty() {
        0.0
    } else {
        sum / f64::from(count)
    };
    let min_secs = elapsed.iter().copied().fold(f64::INFINITY, f64::min);
    let min_secs = if min_secs.is_finite() { min_secs } else { 0.0 };
    let max_secs = elapsed.iter().copied().fold(0.0, f64::max);

    let throughput_rps = if sum > 0.0 { f64::from(count) / sum } else { 0.0 };

    let mut histogram =
        LatencyHistogram::new().map_err(|message| ReportError::Histogram { message })?;
    let mut successes: u64 = 0;
    for call in result.calls.iter().filter(|call| call.is_success()) {
        successes = successes.saturating_add(1);
        let millis = u64::try_from(call.elapsed.as_millis()).unwrap_or(u64::MAX);
        histogram
            .record(millis)
            .map_err(|message| ReportError::Histogram { message })?;
    }
    let (p50_ms, p90_ms, p99_ms) = histogram.percentiles();

    let total_calls = u64::from(count);
    Ok(RunStats {
        total_calls,
        successes,
        failures: total_calls.saturating_sub(successes),
        mean_secs,
        min_secs,
        max_secs,
        p50_ms,
        p90_ms,
        p99_ms,
        throughput_rps,
    })
}

/// Frequency of each status label (numeric code or `ERROR`) across the run.
#[must_use]
pub fn status_distribution(result: &RunResult) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for call in &result.calls {
        let entry = counts.entry(call.status_label()).or_insert(0u64);
        *entry = entry.saturating_add(1);
    }
    counts
}

/// Renders the status-code distribution as one bar per distinct label.
///
/// # Errors
///
/// Returns an error when a line cannot be formatted.
pub fn render_distribution(result: &RunResult) -> Result<String, ReportError> {
    let counts = status_distribution(result);
    let mut out = String::new();
    writeln!(out, "Status Codes:").map_err(|err| ReportError::Render { source: err })?;
    for (label, count) in &counts {
        let bar_len = usize::try_from(*count).unwrap_or(usize::MAX).min(50);
        writeln!(out, "  {:>6}  {:>5}  {}", label, count, "#".repeat(bar_len))
            .map_err(|err| ReportError::Render { source: err })?;
    }
    Ok(out)
}

pub fn print_summary(stats: &RunStats) {
    println!("Summary:");
    println!("  Total Calls: {}", stats.total_calls);
    println!("  Successful: {}", stats.successes);
    println!("  Errors: {}", stats.failures);
    println!("  Avg Time: {:.3}s", stats.mean_secs);
    println!(
        "  Min/Max Time: {:.3}s / {:.3}s",
        stats.min_secs, stats.max_secs
    );
    println!(
        "  P50/P90/P99 Latency (ok): {}ms / {}ms / {}ms",
        stats.p50_ms, stats.p90_ms, stats.p99_ms
    );
    println!("  Throughput: {:.2} req/s", stats.throughput_rps);
}
