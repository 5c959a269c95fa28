use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

use prune_core::{Statistics, UserStatistics};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");

#[derive(Debug, Serialize)]
struct Row<'a> {
    screen_name: &'a str,
    tweets: u32,
    retweets: u32,
    status: &'static str,
}

impl<'a> From<&'a UserStatistics> for Row<'a> {
    fn from(stat: &'a UserStatistics) -> Self {
        Row {
            screen_name: &stat.user.screen_name,
            tweets: stat.tweets,
            retweets: stat.retweets,
            status: stat.status(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    rows: Vec<Row<'a>>,
    oldest_seen: Option<String>,
    lag_minutes: i64,
}

/// Renders the statistics table. Values are HTML-escaped by the template engine.
#[derive(Debug)]
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("index", INDEX_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Render the loudest-first table. `lag_minutes` is how stale a cached result may be.
    pub fn render_index(&self, stats: &Statistics, lag_minutes: i64) -> Result<String> {
        let page = IndexPage {
            rows: stats.ranked().into_iter().map(Row::from).collect(),
            oldest_seen: stats.oldest_seen().map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()),
            lag_minutes,
        };
        Ok(self.handlebars.render("index", &page)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use prune_core::StatisticsBuilder;
    use twitter_client::{Tweet, User};

    fn user(id: u64, screen_name: &str) -> User {
        User {
            id,
            screen_name: screen_name.to_string(),
            name: screen_name.to_string(),
            profile_image_url_https: None,
        }
    }

    fn tweet(id: u64, author: &User, retweet: bool) -> Tweet {
        Tweet {
            id,
            created_at: Some(Utc.with_ymd_and_hms(2017, 6, 1, 12, 0, 0).unwrap()),
            text: String::new(),
            user: author.clone(),
            retweeted_status_id: retweet.then_some(1),
        }
    }

    #[test]
    fn test_render_rows() {
        let (loud, quiet) = (user(1, "loud"), user(2, "quiet"));
        let mut builder = StatisticsBuilder::new(true);
        builder.record_tweet(tweet(10, &loud, false));
        builder.record_tweet(tweet(11, &loud, true));
        builder.record_tweet(tweet(12, &quiet, false));
        builder.add_friend(user(3, "silent"));
        builder.mark_muted([2]);
        builder.mark_no_retweets([3]);

        let html = PageRenderer::new().unwrap().render_index(&builder.build(), 15).unwrap();
        assert!(html.contains(r#"<a href="https://twitter.com/loud">@loud</a>"#));
        assert!(html.contains("<td>muted</td>"));
        assert!(html.contains("<td>no retweets</td>"));
        assert!(html.contains("Timeline covers tweets since 2017-06-01 12:00 UTC."));
        assert!(html.contains("Results may lag 15 minutes"));
        let loud_at = html.find("@loud").unwrap();
        let quiet_at = html.find("@quiet").unwrap();
        let silent_at = html.find("@silent").unwrap();
        assert!(loud_at < quiet_at && quiet_at < silent_at);
    }

    #[test]
    fn test_render_escapes() {
        let mut builder = StatisticsBuilder::new(false);
        builder.add_friend(user(1, "<script>"));
        let html = PageRenderer::new().unwrap().render_index(&builder.build(), 15).unwrap();
        assert!(!html.contains("@<script>"));
        assert!(html.contains("@&lt;script&gt;"));
        assert!(!html.contains("Timeline covers tweets since"));
    }
}
