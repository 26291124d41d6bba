use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported output format: {format}")]
    UnsupportedFormat { format: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML write error: {0}")]
    Xml(String),
}
