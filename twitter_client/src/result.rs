use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;

use crate::consts::RATE_LIMIT_WINDOW_SECS;
use crate::response::{IdListResponse, TweetResponse, UserListResponse, UserResponse};
use crate::util::parse_twitter_date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub screen_name: String,
    pub name: String,
    pub profile_image_url_https: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: u64,
    /// `None` when the API value could not be parsed.
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
    pub user: User,
    /// Id of the original tweet if this one is a retweet.
    pub retweeted_status_id: Option<u64>,
}

/// One page of a cursor-paginated endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursored<T> {
    pub items: Vec<T>,
    pub next_cursor: i64,
}

/// Rate-limit state reported in `x-rate-limit-*` response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset: Option<DateTime<Utc>>,
}

// MARK: Helpers

impl Tweet {
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status_id.is_some()
    }
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        fn header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        }
        RateLimit {
            limit: header(headers, "x-rate-limit-limit"),
            remaining: header(headers, "x-rate-limit-remaining"),
            reset: header::<i64>(headers, "x-rate-limit-reset").and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Reset time, or one full window from `now` when the API did not say.
    pub fn reset_or_window(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.reset
            .unwrap_or_else(|| now + chrono::Duration::seconds(RATE_LIMIT_WINDOW_SECS))
    }
}

// MARK: Conversions

impl From<UserResponse> for User {
    fn from(user: UserResponse) -> Self {
        User {
            id: user.id,
            screen_name: user.screen_name,
            name: user.name,
            profile_image_url_https: user.profile_image_url_https,
        }
    }
}

impl From<TweetResponse> for Tweet {
    fn from(tweet: TweetResponse) -> Self {
        Tweet {
            id: tweet.id,
            created_at: tweet.created_at.as_deref().and_then(parse_twitter_date),
            text: tweet.text,
            user: tweet.user.into(),
            retweeted_status_id: tweet.retweeted_status.map(|s| s.id),
        }
    }
}

impl From<UserListResponse> for Cursored<User> {
    fn from(response: UserListResponse) -> Self {
        Cursored {
            items: response.users.into_iter().map(User::from).collect(),
            next_cursor: response.next_cursor,
        }
    }
}

impl From<IdListResponse> for Cursored<u64> {
    fn from(response: IdListResponse) -> Self {
        Cursored {
            items: response.ids,
            next_cursor: response.next_cursor,
        }
    }
}
