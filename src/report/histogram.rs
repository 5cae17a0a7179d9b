use std::fmt::Write as _;

use hdrhistogram::Histogram;

use crate::error::ReportError;
use crate::runner::RunResult;

const BUCKETS: u64 = 20;
const MAX_BAR: usize = 40;

#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, String> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| format!("Failed to create histogram: {}", err))?;
        Ok(Self { hist })
    }

    /// Record a latency value in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency_ms: u64) -> Result<(), String> {
        let value = latency_ms.max(1);
        self.hist
            .record(value)
            .map_err(|err| format!("Failed to record latency: {}", err))
    }

    #[must_use]
    pub fn percentiles(&self) -> (u64, u64, u64) {
        if self.count() == 0 {
            return (0, 0, 0);
        }

        (
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.9),
            self.hist.value_at_quantile(0.99),
        )
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}

/// Renders a fixed-width latency histogram over every call's elapsed time,
/// bucketed into 20 equal-width bins.
///
/// # Errors
///
/// Returns an error when a line cannot be formatted.
pub fn render_histogram(result: &RunResult) -> Result<String, ReportError> {
    let values: Vec<u64> = result
        .calls
        .iter()
        .map(|call| u64::try_from(call.elapsed.as_millis()).unwrap_or(u64::MAX))
        .collect();
    let top = values.iter().copied().max().unwrap_or(0);

    let mut out = String::new();
    writeln!(out, "Latency Distribution:").map_err(|err| ReportError::Render { source: err })?;
    if top == 0 {
        writeln!(out, "  (no latency samples)").map_err(|err| ReportError::Render { source: err })?;
        return Ok(out);
    }

    let width = top.div_ceil(BUCKETS).max(1);
    let mut counts = vec![0u64; usize::try_from(BUCKETS).unwrap_or(20)];
    for value in &values {
        let bucket = value
            .checked_div(width)
            .unwrap_or(0)
            .min(BUCKETS.saturating_sub(1));
        if let Some(slot) = counts.get_mut(usize::try_from(bucket).unwrap_or(0)) {
            *slot = slot.saturating_add(1);
        }
    }

    let tallest = counts.iter().copied().max().unwrap_or(1).max(1);
    for (bucket, count) in counts.iter().enumerate() {
        let bucket_index = u64::try_from(bucket).unwrap_or(0);
        let low = bucket_index.saturating_mul(width);
        let high = bucket_index.saturating_add(1).saturating_mul(width);
        let bar_len = usize::try_from(
            count
                .saturating_mul(u64::try_from(MAX_BAR).unwrap_or(40))
                .checked_div(tallest)
                .unwrap_or(0),
        )
        .unwrap_or(0);
        writeln!(
            out,
            "  {:>6}-{:<6} ms  {:>5}  {}",
            low,
            high,
            count,
            "#".repeat(bar_len)
        )
        .map_err(|err| ReportError::Render { source: err })?;
    }
    Ok(out)
}
