pub mod client;
pub mod query;
pub mod rate_limit;

pub use client::{ApiClient, RawResponse};
pub use query::QueryParams;
pub use rate_limit::{FixedDelay, MinInterval, NoDelay, RateLimiter};
