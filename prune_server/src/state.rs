use std::sync::Arc;

use prune_core::StatisticsCache;
use twitter_client::{HttpClient, SessionCookie};

use crate::page::PageRenderer;

#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool reused by every per-request `TwitterClient`
    pub http: HttpClient,
    /// Timeline statistics per credential token, shared by all requests
    pub cache: Arc<StatisticsCache>,
    pub renderer: Arc<PageRenderer>,
    /// Credential used when the request has none
    pub default_cookie: Option<SessionCookie>,
}
