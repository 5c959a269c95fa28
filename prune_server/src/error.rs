use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        let message = match self.rate_limit_reset() {
            Some(reset) => rate_limit_message(reset, Utc::now()),
            None => self.to_string(),
        };
        (status, message).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        let err = &self.0;
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<twitter_client::Error>() {
                match err {
                    twitter_client::Error::RateLimit { .. } => return StatusCode::TOO_MANY_REQUESTS,
                    twitter_client::Error::Api { status: 401 | 403, .. } => return StatusCode::FORBIDDEN,
                    twitter_client::Error::Api { .. } => return StatusCode::BAD_GATEWAY,
                    twitter_client::Error::InvalidCookie(_) => return StatusCode::BAD_REQUEST,
                    twitter_client::Error::ParsingError(_) => return StatusCode::BAD_REQUEST,
                    twitter_client::Error::NetworkError(_) => return StatusCode::BAD_GATEWAY,
                    twitter_client::Error::JSONError(_) => return StatusCode::BAD_GATEWAY,
                    _ => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
            if let Some(err) = cause.downcast_ref::<AuthError>() {
                match err {
                    AuthError::MissingSession => return StatusCode::UNAUTHORIZED,
                }
            }
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        self.0.chain().find_map(|cause| {
            cause
                .downcast_ref::<prune_core::Error>()
                .and_then(|e| e.rate_limit_reset())
                .or_else(|| cause.downcast_ref::<twitter_client::Error>().and_then(|e| e.rate_limit_reset()))
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No Twitter session: send the `ct0` and `auth_token` cookies of a logged-in twitter.com session")]
    MissingSession,
}

/// Whole minutes until the rate-limit window resets, rounded up and never negative.
pub fn wait_minutes(reset: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (reset - now).num_seconds().max(0);
    (seconds + 59) / 60
}

pub fn rate_limit_message(reset: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!(
        "Twitter API rate limit exceeded - try again in {} minutes.",
        wait_minutes(reset, now)
    )
}
