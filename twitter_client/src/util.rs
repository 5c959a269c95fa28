use chrono::{DateTime, Utc};

const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Parse a REST v1.1 timestamp like `Wed Oct 10 20:19:24 +0000 2018`.
pub fn parse_twitter_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s, FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
