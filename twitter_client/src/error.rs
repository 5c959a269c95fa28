use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate limit exceeded until {reset}")]
    RateLimit { reset: DateTime<Utc> },
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),
    #[error("Cannot encode/decode JSON: {0}")]
    JSONError(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Network Error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Cannot parse URL: {0}")]
    UrlError(#[from] url::ParseError),
    #[error("Parsing error: {0}")]
    ParsingError(#[from] prune_util::ParsingError),
}

impl Error {
    /// The time at which the rate-limit window resets, if this is a rate-limit error.
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        match self {
            Error::RateLimit { reset } => Some(*reset),
            _ => None,
        }
    }
}
