use std::sync::Mutex;
use std::time::Instant;

use reqwest::Response;
use tokio::time::{sleep, Duration};

/// Tracks GitHub's primary rate limit from response headers and waits out
/// an exhausted quota before the next request is sent.
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
}

struct RateLimitState {
    remaining: u32,
    reset_at: Option<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: 5000,
                reset_at: None,
            }),
        }
    }

    pub async fn wait(&self) {
        let wait_duration = {
            let state = self.state.lock().expect("rate limit state poisoned");
            match (state.remaining, state.reset_at) {
                (0, Some(reset_at)) => reset_at.checked_duration_since(Instant::now()),
                _ => None,
            }
        };

        if let Some(duration) = wait_duration {
            tracing::info!("Rate limited, waiting {:?}", duration);
            sleep(duration).await;
        }
    }

    pub fn update_from_response(&self, response: &Response) {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u32>().ok());

        let Some(remaining) = remaining else {
            return;
        };

        let reset_at = response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .and_then(|reset_timestamp| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .ok()?
                    .as_secs();
                let wait_secs = reset_timestamp.checked_sub(now)?;
                Some(Instant::now() + Duration::from_secs(wait_secs))
            });

        let mut state = self.state.lock().expect("rate limit state poisoned");
        state.remaining = remaining;
        state.reset_at = reset_at;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
