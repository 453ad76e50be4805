use thiserror::Error;

pub type Result<T> = std::result::Result<T, YelpError>;

#[derive(Debug, Error)]
pub enum YelpError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error (status {status}): {message}")]
    Parse { status: u16, message: String },
}

impl From<reqwest::Error> for YelpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            YelpError::Timeout(err.to_string())
        } else {
            YelpError::Network(err.to_string())
        }
    }
}
