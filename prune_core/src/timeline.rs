use crate::error::{Error, Result};
use crate::paginate::{for_each_page, MaxId, Page};
use crate::session::Session;
use crate::stats::StatisticsBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Track the earliest creation time per author.
    pub track_oldest_seen: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        AggregateOptions { track_oldest_seen: true }
    }
}

/// Walk the whole home timeline backwards and count tweets and retweets per author.
/// Any failed page aborts the pass; nothing partial is returned.
pub async fn aggregate<S>(session: &S, options: AggregateOptions) -> Result<StatisticsBuilder>
where
    S: Session + ?Sized,
{
    let mut builder = StatisticsBuilder::new(options.track_oldest_seen);
    let mut fetched = 0;

    let requests = for_each_page(
        |max_id: MaxId| async move {
            let tweets = session.home_timeline(max_id).await?;
            tracing::debug!("Fetched {} tweets with max_id {:?}", tweets.len(), max_id.as_param());
            Ok::<_, Error>(Page::by_max_id(tweets, |t| t.id))
        },
        |tweets| {
            fetched += tweets.len();
            for tweet in tweets {
                builder.record_tweet(tweet);
            }
        },
    )
    .await?;

    tracing::info!(
        "Aggregated {} tweets by {} users from {} timeline requests",
        fetched,
        builder.len(),
        requests
    );
    Ok(builder)
}
