use thiserror::Error;

/// Everything that can go wrong while serving a gallery intent.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// A required field of a new painting was left empty
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// An uploaded CSV file could not be parsed
    #[error("CSV parse error: {0}")]
    Parse(String),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
