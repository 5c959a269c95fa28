mod consts;
mod error;
mod response;
mod result;
mod util;

use reqwest::{header, Client, Response, StatusCode, Url};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use consts::*;
use response::{ErrorResponse, IdArrayResponse, IdListResponse, TweetResponse, UserListResponse};
pub use result::*;
pub use consts::REST_API;
pub use util::parse_twitter_date;

pub use crate::error::Error;
use crate::error::Result;

use prune_util::{build_params, parse_cookie_str, take_key};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub ct0: String,
    pub auth_token: String,
}

impl Display for SessionCookie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ct0={}; auth_token={}", self.ct0, self.auth_token)
    }
}

impl FromStr for SessionCookie {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cookie_map = parse_cookie_str(s)?;
        let ct0 = take_key(&mut cookie_map, "ct0")?;
        let auth_token = take_key(&mut cookie_map, "auth_token")?;
        Ok(SessionCookie { ct0, auth_token })
    }
}

/// Connection pool shared by every session. See [`http_client`].
pub use reqwest::Client as HttpClient;

/// Build the HTTP client carrying the session-independent headers.
/// Session credentials are attached per request, so one instance serves every [`TwitterClient`].
pub fn http_client() -> Result<HttpClient> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::AUTHORIZATION, header::HeaderValue::from_static(BEARER_TOKEN));
    headers.insert("x-twitter-active-user", header::HeaderValue::from_static("yes"));
    headers.insert("x-twitter-client-language", header::HeaderValue::from_static("en"));
    headers.insert("x-twitter-auth-type", header::HeaderValue::from_static("OAuth2Session"));

    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?)
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    pub session_cookie: SessionCookie,
    client: HttpClient,
    /// Cookie and csrf headers of this session
    session_headers: header::HeaderMap,
    base_url: String,
}

impl TwitterClient {
    pub fn new(session_cookie: SessionCookie) -> Result<TwitterClient> {
        Self::with_http_client(http_client()?, session_cookie, REST_API)
    }

    /// Create a client talking to another REST root, e.g. a mock server.
    pub fn with_base_url(session_cookie: SessionCookie, base_url: &str) -> Result<TwitterClient> {
        Self::with_http_client(http_client()?, session_cookie, base_url)
    }

    /// Create a client for one session on top of a shared [`HttpClient`] from [`http_client`].
    pub fn with_http_client(client: HttpClient, session_cookie: SessionCookie, base_url: &str) -> Result<TwitterClient> {
        let invalid_cookie = |_| Error::InvalidCookie(session_cookie.to_string());

        let mut session_headers = header::HeaderMap::new();
        session_headers.insert(
            header::COOKIE,
            header::HeaderValue::from_str(&session_cookie.to_string()).map_err(invalid_cookie)?,
        );
        session_headers.insert(
            "x-csrf-token",
            header::HeaderValue::from_str(&session_cookie.ct0).map_err(invalid_cookie)?,
        );

        Ok(TwitterClient {
            session_cookie,
            client,
            session_headers,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The credential token identifying this session.
    pub fn token(&self) -> &str {
        &self.session_cookie.auth_token
    }

    /// One page of the home timeline, newest first, with ids at most `max_id`.
    pub async fn home_timeline(&self, max_id: Option<u64>) -> Result<Vec<Tweet>> {
        let params = build_params! {
            required count => PAGE_MAX_COUNT,
            required include_entities => false,
            required exclude_replies => false,
            optional max_id,
        };
        let response: Vec<TweetResponse> = self.rest_get("/statuses/home_timeline.json", params).await?;
        Ok(response.into_iter().map(Tweet::from).collect())
    }

    /// One page of the accounts the user follows.
    pub async fn friends(&self, cursor: i64) -> Result<Cursored<User>> {
        let params = build_params! {
            required count => PAGE_MAX_COUNT,
            required cursor,
            required skip_status => true,
            required include_user_entities => false,
        };
        let response: UserListResponse = self.rest_get("/friends/list.json", params).await?;
        Ok(response.into())
    }

    /// One page of the ids the user has muted.
    pub async fn muted_ids(&self, cursor: i64) -> Result<Cursored<u64>> {
        let params = build_params! {
            required cursor,
            required stringify_ids => true,
        };
        let response: IdListResponse = self.rest_get("/mutes/users/ids.json", params).await?;
        Ok(response.into())
    }

    /// Ids of the accounts whose retweets the user has turned off. Not paginated.
    pub async fn no_retweet_ids(&self) -> Result<Vec<u64>> {
        let params = build_params! {
            required stringify_ids => true,
        };
        let response: IdArrayResponse = self.rest_get("/friendships/no_retweets/ids.json", params).await?;
        Ok(response.0)
    }
}

impl TwitterClient {
    async fn rest_get<R>(&self, path: &str, params: Vec<(String, String)>) -> Result<R>
    where
        R: serde::de::DeserializeOwned,
    {
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, path), &params)?;
        tracing::debug!("GET {}", url);
        let response: Response = self
            .client
            .get(url)
            .headers(self.session_headers.clone())
            .send()
            .await?;

        let status = response.status();
        let rate_limit = RateLimit::from_headers(response.headers());
        if rate_limit.is_exhausted() {
            tracing::debug!("Rate limit exhausted for {}, reset at {:?}", path, rate_limit.reset);
        }
        let content = response.text().await?;

        let name = path
            .strip_prefix('/')
            .unwrap_or(path)
            .trim_end_matches(".json")
            .replace('/', "_");
        log(&name, &content).await?;

        if !status.is_success() {
            return Err(api_error(status, &content, &rate_limit));
        }
        serde_json::from_str(&content).map_err(|e| e.into())
    }
}

/// Classify a non-success response. HTTP 429 and error code 88 both mean rate limited.
fn api_error(status: StatusCode, content: &str, rate_limit: &RateLimit) -> Error {
    let body = serde_json::from_str::<ErrorResponse>(content).ok();
    let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
        || body
            .as_ref()
            .is_some_and(|b| b.errors.iter().any(|e| e.code == RATE_LIMIT_ERROR_CODE));
    if rate_limited {
        return Error::RateLimit {
            reset: rate_limit.reset_or_window(chrono::Utc::now()),
        };
    }

    let message = body
        .and_then(|b| b.errors.into_iter().next())
        .map(|e| e.message)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

async fn log(name: &str, content: &str) -> Result<()> {
    use std::path::PathBuf;
    use tokio::{fs::File, io::AsyncWriteExt};

    if let Ok(dir) = std::env::var("CLIENT_LOG_DIR") {
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let filepath = PathBuf::from(dir).join(format!("twitter_{}_{}.json", name, time));
        let mut file = File::create(filepath).await?;
        file.write_all(content.as_bytes()).await?;
    }
    Ok(())
}
