// The authenticated view of the remote API that the aggregation pipeline reads from.

use async_trait::async_trait;

use twitter_client::{Tweet, TwitterClient, User};

use crate::error::Result;
use crate::paginate::{ListCursor, MaxId, Page};

/// An authenticated session. One session belongs to exactly one credential token.
#[async_trait]
pub trait Session: Send + Sync {
    /// The credential token, unique per authenticated user. Used as cache key.
    fn token(&self) -> &str;

    /// One page of the home timeline with ids at most `max_id`, replies included.
    async fn home_timeline(&self, max_id: MaxId) -> Result<Vec<Tweet>>;

    /// One page of followed accounts.
    async fn friends(&self, cursor: ListCursor) -> Result<Page<User, ListCursor>>;

    /// One page of muted account ids.
    async fn muted_ids(&self, cursor: ListCursor) -> Result<Page<u64, ListCursor>>;

    /// All account ids whose retweets are turned off.
    async fn no_retweet_ids(&self) -> Result<Vec<u64>>;
}

#[async_trait]
impl Session for TwitterClient {
    fn token(&self) -> &str {
        TwitterClient::token(self)
    }

    async fn home_timeline(&self, max_id: MaxId) -> Result<Vec<Tweet>> {
        Ok(TwitterClient::home_timeline(self, max_id.as_param()).await?)
    }

    async fn friends(&self, cursor: ListCursor) -> Result<Page<User, ListCursor>> {
        Ok(TwitterClient::friends(self, cursor.0).await?.into())
    }

    async fn muted_ids(&self, cursor: ListCursor) -> Result<Page<u64, ListCursor>> {
        Ok(TwitterClient::muted_ids(self, cursor.0).await?.into())
    }

    async fn no_retweet_ids(&self) -> Result<Vec<u64>> {
        Ok(TwitterClient::no_retweet_ids(self).await?)
    }
}
