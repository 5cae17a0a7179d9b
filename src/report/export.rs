use chrono::SecondsFormat;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::ReportError;
use crate::runner::RunResult;

/// Writes the per-call log as CSV, one row per call.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub async fn export_csv(path: &str, result: &RunResult) -> Result<(), ReportError> {
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|err| csv_error(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(b"call,status,time_s,response,timestamp\n")
        .await
        .map_err(|err| csv_error(path, err))?;
    for call in &result.calls {
        let line = format!(
            "{},{},{:.3},{},{}\n",
            call.call_index,
            call.status_label(),
            call.elapsed_secs(),
            csv_escape(call.response_preview()),
            call.completed_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|err| csv_error(path, err))?;
    }
    writer.flush().await.map_err(|err| csv_error(path, err))?;
    Ok(())
}

/// Writes the per-call log as a JSON array of objects with the same fields
/// as the CSV columns.
///
/// # Errors
///
/// Returns an error when serialization fails or the file cannot be written.
pub async fn export_json(path: &str, result: &RunResult) -> Result<(), ReportError> {
    let rows: Vec<serde_json::Value> = result
        .calls
        .iter()
        .map(|call| {
            serde_json::json!({
                "call": call.call_index,
                "status": call.status_label(),
                "time_s": call.elapsed_secs(),
                "response": call.response_preview(),
                "timestamp": call.completed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            })
        })
        .collect();

    let json = serde_json::to_vec_pretty(&rows)
        .map_err(|err| ReportError::SerializeJson { source: err })?;
    let file = tokio::fs::File::create(path)
        .await
        .map_err(|err| json_error(path, err))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&json)
        .await
        .map_err(|err| json_error(path, err))?;
    writer.flush().await.map_err(|err| json_error(path, err))?;
    Ok(())
}

pub(crate) fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn csv_error(path: &str, source: std::io::Error) -> ReportError {
    ReportError::WriteCsv {
        path: path.to_owned(),
        source,
    }
}

fn json_error(path: &str, source: std::io::Error) -> ReportError {
    ReportError::WriteJson {
        path: path.to_owned(),
        source,
    }
}
