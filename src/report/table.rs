use std::fmt::Write as _;

use chrono::SecondsFormat;

use crate::error::ReportError;
use crate::runner::RunResult;

/// Preview column width; longer previews are cut with an ellipsis.
const PREVIEW_COLUMN: usize = 48;

/// Renders the per-call log as a plain-text table: call index, status code
/// or `ERROR`, elapsed seconds, response preview, completion timestamp.
///
/// # Errors
///
/// Returns an error when a row cannot be formatted.
pub fn render_table(result: &RunResult) -> Result<String, ReportError> {
    let mut out = String::new();
    write_row(
        &mut out,
        &format!(
            "{:>5}  {:>6}  {:>8}  {:<width$}  {}",
            "Call",
            "Status",
            "Time (s)",
            "Response",
            "Timestamp",
            width = PREVIEW_COLUMN
        ),
    )?;
    for call in &result.calls {
        write_row(
            &mut out,
            &format!(
                "{:>5}  {:>6}  {:>8.3}  {:<width$}  {}",
                call.call_index,
                call.status_label(),
                call.elapsed_secs(),
                flatten_preview(call.response_preview()),
                call.completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                width = PREVIEW_COLUMN
            ),
        )?;
    }
    Ok(out)
}

fn write_row(out: &mut String, line: &str) -> Result<(), ReportError> {
    writeln!(out, "{}", line).map_err(|err| ReportError::Render { source: err })
}

/// Collapses whitespace control characters and trims the preview so one
/// call stays on one table row.
fn flatten_preview(preview: &str) -> String {
    let mut flat: String = preview
        .chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect();
    if flat.chars().count() > PREVIEW_COLUMN {
        flat = flat.chars().take(PREVIEW_COLUMN.saturating_sub(3)).collect();
        flat.push_str("...");
    }
    flat
}
