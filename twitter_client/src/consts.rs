pub const REST_API: &str = "https://api.twitter.com/1.1";
pub const BEARER_TOKEN: &str =
    "Bearer AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs=1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36";

/// Maximum page size accepted by the timeline and friends endpoints.
pub const PAGE_MAX_COUNT: u32 = 200;

/// Length of the REST rate-limit window, used when a 429 carries no reset header.
pub const RATE_LIMIT_WINDOW_SECS: i64 = 15 * 60;

/// Twitter error code for "Rate limit exceeded".
pub const RATE_LIMIT_ERROR_CODE: i64 = 88;
