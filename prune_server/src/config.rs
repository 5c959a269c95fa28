use anyhow::{Context, Result};
use chrono::Duration;

use std::net::SocketAddr;
use std::path::PathBuf;

use twitter_client::SessionCookie;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    /// Used when a request carries no session cookie of its own.
    pub default_cookie: Option<SessionCookie>,
    /// Directory holding `prune.png`.
    pub static_dir: Option<PathBuf>,
    pub cache_window: Duration,
    pub track_oldest_seen: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let address = var("SERVER_ADDRESS")
            .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
            .parse()
            .context("SERVER_ADDRESS must be a socket address like 127.0.0.1:8080")?;
        let default_cookie = var("TWITTER_COOKIE")
            .map(|s| s.parse::<SessionCookie>())
            .transpose()
            .context("TWITTER_COOKIE must contain ct0 and auth_token")?;
        let static_dir = var("STATIC_DIR").map(PathBuf::from);
        let cache_window = match var("CACHE_WINDOW_SECS") {
            Some(s) => {
                let secs: u32 = s
                    .trim()
                    .parse()
                    .context("CACHE_WINDOW_SECS must be a non-negative number of seconds")?;
                Duration::seconds(i64::from(secs))
            }
            None => Duration::seconds(prune_core::RATE_LIMIT_WINDOW_SECS),
        };
        let track_oldest_seen = match var("TRACK_OLDEST_SEEN") {
            Some(s) => s.parse().context("TRACK_OLDEST_SEEN must be true or false")?,
            None => true,
        };

        Ok(ServerConfig {
            address,
            default_cookie,
            static_dir,
            cache_window,
            track_oldest_seen,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.address.to_string(), DEFAULT_SERVER_ADDRESS);
        assert_eq!(config.default_cookie, None);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.cache_window, Duration::minutes(15));
        assert!(config.track_oldest_seen);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SERVER_ADDRESS", "0.0.0.0:3000"),
            ("TWITTER_COOKIE", "ct0=a; auth_token=b"),
            ("STATIC_DIR", "static"),
            ("CACHE_WINDOW_SECS", "60"),
            ("TRACK_OLDEST_SEEN", "false"),
        ])
        .unwrap();
        assert_eq!(config.address.port(), 3000);
        assert_eq!(config.default_cookie.unwrap().auth_token, "b");
        assert_eq!(config.static_dir, Some(PathBuf::from("static")));
        assert_eq!(config.cache_window, Duration::seconds(60));
        assert!(!config.track_oldest_seen);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("SERVER_ADDRESS", "nowhere")]).is_err());
        assert!(config(&[("TWITTER_COOKIE", "ct0=a")]).is_err());
        assert!(config(&[("CACHE_WINDOW_SECS", "soon")]).is_err());
        assert!(config(&[("CACHE_WINDOW_SECS", "-5")]).is_err());
        assert!(config(&[("CACHE_WINDOW_SECS", "9223372036854775807")]).is_err());
        assert!(config(&[("TRACK_OLDEST_SEEN", "maybe")]).is_err());
    }
}
