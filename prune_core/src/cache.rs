use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::merge::merge_attributes;
use crate::session::Session;
use crate::stats::Statistics;
use crate::timeline::{aggregate, AggregateOptions};

/// The remote API resets its request quotas every 15 minutes.
pub const RATE_LIMIT_WINDOW_SECS: i64 = 15 * 60;

#[derive(Debug, Clone)]
struct CacheEntry {
    stats: Arc<Statistics>,
    cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Younger than the window. A clock that went backwards still counts as fresh.
    fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.cached_at < window
    }
}

/// Statistics per credential token, reused while younger than the rate-limit window.
/// Shared between requests; at most one entry per token, replaced on refresh.
#[derive(Debug)]
pub struct StatisticsCache {
    window: Duration,
    options: AggregateOptions,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for StatisticsCache {
    fn default() -> Self {
        Self::new(Duration::seconds(RATE_LIMIT_WINDOW_SECS), AggregateOptions::default())
    }
}

impl StatisticsCache {
    pub fn new(window: Duration, options: AggregateOptions) -> Self {
        Self {
            window,
            options,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Cached statistics for the session, or a full aggregate-and-merge pass on a miss.
    /// Failures are returned as-is and leave the cache untouched.
    pub async fn get<S>(&self, session: &S, now: DateTime<Utc>) -> Result<Arc<Statistics>>
    where
        S: Session + ?Sized,
    {
        self.get_with(session, now, self.options).await
    }

    /// Like [`get`](Self::get), but a miss aggregates with the given options.
    /// A fresh entry is returned as cached, whatever options built it.
    pub async fn get_with<S>(
        &self,
        session: &S,
        now: DateTime<Utc>,
        options: AggregateOptions,
    ) -> Result<Arc<Statistics>>
    where
        S: Session + ?Sized,
    {
        let token = session.token();
        if let Some(entry) = self.entries.read().await.get(token) {
            if entry.is_fresh(now, self.window) {
                tracing::info!("Statistics cache hit, computed at {}", entry.cached_at);
                return Ok(entry.stats.clone());
            }
        }

        tracing::info!("Statistics cache miss, fetching timeline");
        let builder = aggregate(session, options).await?;
        let builder = merge_attributes(session, builder).await?;
        let stats = Arc::new(builder.build());

        self.entries.write().await.insert(
            token.to_string(),
            CacheEntry {
                stats: stats.clone(),
                cached_at: now,
            },
        );
        tracing::info!("Cached statistics for {} users", stats.len());
        Ok(stats)
    }

    /// Number of credential tokens with a stored entry, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
