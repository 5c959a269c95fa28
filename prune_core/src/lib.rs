pub mod cache;
pub mod error;
pub mod merge;
pub mod paginate;
pub mod session;
pub mod stats;
pub mod timeline;

pub use cache::{StatisticsCache, RATE_LIMIT_WINDOW_SECS};
pub use error::*;
pub use session::Session;
pub use stats::{Statistics, StatisticsBuilder, UserStatistics};
pub use timeline::AggregateOptions;
