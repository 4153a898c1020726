pub mod client;
pub mod rate_limiter;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Release;

pub use client::GitHubClient;
pub use rate_limiter::RateLimiter;

/// Fetches the most recent releases of the watched project, newest first.
///
/// An empty upstream feed is `Ok(vec![])`, not an error. Any `Err` is
/// recoverable from the caller's point of view: the current polling cycle
/// is skipped and fetching is retried on the next one.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn fetch_latest(&self, limit: u32) -> Result<Vec<Release>>;
}
