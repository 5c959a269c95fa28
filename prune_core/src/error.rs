use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Twitter client error: {0}")]
    Client(#[from] twitter_client::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Reset time of the rate-limit window, if the remote API refused us for that reason.
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        match self {
            Error::Client(err) => err.rate_limit_reset(),
            Error::Other(_) => None,
        }
    }
}
