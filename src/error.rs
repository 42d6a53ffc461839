use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Parse error in field '{field}': {reason}")]
    Parse { field: &'static str, reason: String },

    #[error("Publish error: {0}")]
    Publish(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("could not get data after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl AppError {
    /// Name of the station field that failed to parse, if any.
    pub fn parse_field(&self) -> Option<&'static str> {
        match self {
            AppError::Parse { field, .. } => Some(*field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
