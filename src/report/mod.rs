//! Presentation layer over a finished run: the per-call log table, status
//! distribution, latency histogram, summary statistics, file exports, and
//! the cURL preview. Nothing here can fail a run; errors are logged and the
//! completed result set is left intact.
mod curl;
mod export;
mod histogram;
mod stats;
mod table;


pub use curl::curl_preview;
pub use export::{export_csv, export_json};
pub use histogram::{LatencyHistogram, render_histogram};
pub use stats::{RunStats, compute_stats, print_summary, render_distribution, status_distribution};
pub use table::render_table;

use tracing::{error, info};

use crate::args::VolleyArgs;
use crate::runner::RunResult;

/// Renders every configured view of the result set and writes any exports.
/// Reporting failures are logged and never discard the completed results.
pub async fn emit(args: &VolleyArgs, result: &RunResult) {
    if !args.quiet {
        match render_table(result) {
            Ok(text) => print!("{}", text),
            Err(err) => error!("Failed to render call log: {}", err),
        }
        match render_distribution(result) {
            Ok(text) => print!("{}", text),
            Err(err) => error!("Failed to render status distribution: {}", err),
        }
        match render_histogram(result) {
            Ok(text) => print!("{}", text),
            Err(err) => error!("Failed to render latency histogram: {}", err),
        }
    }

    match compute_stats(result) {
        Ok(stats) => print_summary(&stats),
        Err(err) => error!("Failed to compute summary statistics: {}", err),
    }

    if let Some(path) = args.export_csv.as_deref() {
        match export_csv(path, result).await {
            Ok(()) => info!("Wrote CSV report to {}", path),
            Err(err) => error!("CSV export failed: {}", err),
        }
    }

    if let Some(path) = args.export_json.as_deref() {
        match export_json(path, result).await {
            Ok(()) => info!("Wrote JSON report to {}", path),
            Err(err) => error!("JSON export failed: {}", err),
        }
    }
}
