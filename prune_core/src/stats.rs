use chrono::{DateTime, Utc};

use std::collections::HashMap;

use twitter_client::{Tweet, User};

/// Per-author counters collected from the home timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatistics {
    pub user: User,
    pub tweets: u32,
    pub retweets: u32,
    pub muted: bool,
    pub no_retweets: bool,
    /// Earliest creation time among this author's timeline entries.
    pub oldest_seen: Option<DateTime<Utc>>,
}

impl UserStatistics {
    pub fn new(user: User) -> Self {
        UserStatistics {
            user,
            tweets: 0,
            retweets: 0,
            muted: false,
            no_retweets: false,
            oldest_seen: None,
        }
    }

    /// Status label shown next to the counters. Muting wins over hidden retweets.
    pub fn status(&self) -> &'static str {
        if self.muted {
            "muted"
        } else if self.no_retweets {
            "no retweets"
        } else {
            ""
        }
    }
}

/// Owns the statistics mapping while the aggregation and merge stages fill it in.
#[derive(Debug, Clone, Default)]
pub struct StatisticsBuilder {
    stats: HashMap<u64, UserStatistics>,
    track_oldest_seen: bool,
}

impl StatisticsBuilder {
    pub fn new(track_oldest_seen: bool) -> Self {
        StatisticsBuilder {
            stats: HashMap::new(),
            track_oldest_seen,
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Count a timeline entry towards its author.
    /// The first snapshot of an author's profile is the one that is kept.
    pub fn record_tweet(&mut self, tweet: Tweet) {
        let is_retweet = tweet.is_retweet();
        let created_at = tweet.created_at.filter(|t| t.timestamp() != 0);
        let stat = self
            .stats
            .entry(tweet.user.id)
            .or_insert_with(|| UserStatistics::new(tweet.user));
        stat.tweets += 1;
        if is_retweet {
            stat.retweets += 1;
        }
        if self.track_oldest_seen {
            if let Some(created_at) = created_at {
                stat.oldest_seen = Some(stat.oldest_seen.map_or(created_at, |seen| seen.min(created_at)));
            }
        }
    }

    /// Insert a followed account with zero counts unless it is already present.
    /// Returns whether a record was added.
    pub fn add_friend(&mut self, user: User) -> bool {
        if self.stats.contains_key(&user.id) {
            return false;
        }
        self.stats.insert(user.id, UserStatistics::new(user));
        true
    }

    /// Flag known accounts as muted. Unknown ids are ignored. Returns how many were flagged.
    pub fn mark_muted(&mut self, ids: impl IntoIterator<Item = u64>) -> usize {
        self.mark(ids, |stat| stat.muted = true)
    }

    /// Flag known accounts whose retweets are turned off. Unknown ids are ignored.
    pub fn mark_no_retweets(&mut self, ids: impl IntoIterator<Item = u64>) -> usize {
        self.mark(ids, |stat| stat.no_retweets = true)
    }

    pub fn build(self) -> Statistics {
        Statistics { stats: self.stats }
    }

    fn mark(&mut self, ids: impl IntoIterator<Item = u64>, mut f: impl FnMut(&mut UserStatistics)) -> usize {
        let mut count = 0;
        for id in ids {
            if let Some(stat) = self.stats.get_mut(&id) {
                f(stat);
                count += 1;
            }
        }
        count
    }
}

/// Finished, read-only statistics keyed by author id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    stats: HashMap<u64, UserStatistics>,
}

impl Statistics {
    pub fn get(&self, user_id: u64) -> Option<&UserStatistics> {
        self.stats.get(&user_id)
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserStatistics> {
        self.stats.values()
    }

    /// Loudest first: most tweets, then most retweets, then by screen name.
    pub fn ranked(&self) -> Vec<&UserStatistics> {
        use itertools::Itertools;

        self.stats
            .values()
            .sorted_by(|a, b| {
                b.tweets
                    .cmp(&a.tweets)
                    .then(b.retweets.cmp(&a.retweets))
                    .then_with(|| a.user.screen_name.cmp(&b.user.screen_name))
            })
            .collect()
    }

    /// Earliest timeline entry across all authors, if any timestamp was known.
    pub fn oldest_seen(&self) -> Option<DateTime<Utc>> {
        self.stats.values().filter_map(|s| s.oldest_seen).min()
    }
}
