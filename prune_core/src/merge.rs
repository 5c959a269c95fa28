use crate::error::Result;
use crate::paginate::{fetch_all, ListCursor};
use crate::session::Session;
use crate::stats::StatisticsBuilder;

/// Overlay friends, muted and no-retweet membership onto the aggregated timeline statistics.
/// Friends go first so that followed but silent accounts can carry the flags too.
pub async fn merge_attributes<S>(session: &S, mut builder: StatisticsBuilder) -> Result<StatisticsBuilder>
where
    S: Session + ?Sized,
{
    // 1. Friends
    let friends = fetch_all(|cursor: ListCursor| session.friends(cursor)).await?;
    let total_friends = friends.len();
    let mut silent = 0;
    for user in friends {
        if builder.add_friend(user) {
            silent += 1;
        }
    }
    tracing::info!("Merged {} friends, {} silent on the timeline", total_friends, silent);

    // 2. Muted
    let muted = fetch_all(|cursor: ListCursor| session.muted_ids(cursor)).await?;
    let total_muted = muted.len();
    let marked = builder.mark_muted(muted);
    tracing::info!("Marked {} of {} muted accounts", marked, total_muted);

    // 3. No retweets
    let no_retweets = session.no_retweet_ids().await?;
    let total_no_retweets = no_retweets.len();
    let marked = builder.mark_no_retweets(no_retweets);
    tracing::info!("Marked {} of {} accounts without retweets", marked, total_no_retweets);

    Ok(builder)
}
