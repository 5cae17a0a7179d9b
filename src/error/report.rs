use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write CSV export '{path}': {source}")]
    WriteCsv {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write JSON export '{path}': {source}")]
    WriteJson {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize JSON export: {source}")]
    SerializeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to render report: {source}")]
    Render {
        #[source]
        source: std::fmt::Error,
    },
    #[error("Histogram error: {message}")]
    Histogram { message: String },
}
