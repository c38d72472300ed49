use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Response is missing field: {0}")]
    MissingField(&'static str),

    #[error("Framework has no '{0}' category")]
    MissingCategory(String),

    #[error("PrefError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for PrefError {
    fn from(error: std::io::Error) -> Self {
        PrefError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for PrefError {
    fn from(error: reqwest::Error) -> Self {
        PrefError::Reqwest(Box::new(error))
    }
}
