use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Html,
    routing::get,
    Router,
};
use chrono::Utc;

use twitter_client::{SessionCookie, TwitterClient, REST_API};

use crate::{
    error::{AuthError, Result},
    state::AppState,
};

pub fn index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(app_state): State<AppState>, headers: HeaderMap) -> Result<Html<String>> {
    let cookie = session_cookie(&headers, app_state.default_cookie.as_ref())?;
    let client = TwitterClient::with_http_client(app_state.http.clone(), cookie, REST_API)?;

    let stats = app_state.cache.get(&client, Utc::now()).await?;
    let lag_minutes = app_state.cache.window().num_minutes();
    let html = app_state.renderer.render_index(&stats, lag_minutes)?;

    Ok(Html(html))
}

/// Session cookie from the request, else the configured default.
fn session_cookie(headers: &HeaderMap, fallback: Option<&SessionCookie>) -> Result<SessionCookie> {
    let cookie_str = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    let from_request = cookie_str.parse::<SessionCookie>().ok();
    match from_request.or_else(|| fallback.cloned()) {
        Some(cookie) => Ok(cookie),
        None => Err(AuthError::MissingSession.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn fallback() -> SessionCookie {
        "ct0=default; auth_token=default-token".parse().unwrap()
    }

    #[test]
    fn test_cookie_from_request() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("ct0=abc; auth_token=xyz"));
        let cookie = session_cookie(&headers, Some(&fallback())).unwrap();
        assert_eq!(cookie.auth_token, "xyz");
    }

    #[test]
    fn test_cookie_split_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("ct0=abc"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=xyz"));
        let cookie = session_cookie(&headers, None).unwrap();
        assert_eq!(cookie.ct0, "abc");
        assert_eq!(cookie.auth_token, "xyz");
    }

    #[test]
    fn test_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        let cookie = session_cookie(&headers, Some(&fallback())).unwrap();
        assert_eq!(cookie.auth_token, "default-token");
    }

    #[test]
    fn test_cookie_missing() {
        assert!(session_cookie(&HeaderMap::new(), None).is_err());
    }
}
