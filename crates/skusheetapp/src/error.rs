use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    /// The remote assistant answered with a non-success status or an
    /// unparseable body. `raw` keeps the response text for inspection.
    #[error("Api error: {message}")]
    Api { message: String, raw: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("No valid data rows found in the imported sheet")]
    NoValidData,

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Selector(String),
}

impl SheetError {
    pub fn api(message: impl Into<String>, raw: impl Into<String>) -> Self {
        SheetError::Api {
            message: message.into(),
            raw: raw.into(),
        }
    }

    /// Raw collaborator response attached to this error, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            SheetError::Api { raw, .. } if !raw.is_empty() => Some(raw),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
