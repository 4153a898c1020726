use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::github::ReleaseSource;
use crate::models::{GitHubRelease, Release};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    repo: String,
}

impl GitHubClient {
    pub fn new(token: &str, repo: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("relwatch/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    fn reset_after_secs(response: &reqwest::Response) -> u64 {
        response
            .headers()
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .and_then(|reset| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .ok()?
                    .as_secs();
                reset.checked_sub(now)
            })
            .unwrap_or(60)
    }
}

#[async_trait]
impl ReleaseSource for GitHubClient {
    async fn fetch_latest(&self, limit: u32) -> Result<Vec<Release>> {
        self.rate_limiter.wait().await;
        let url = format!(
            "{}/repos/{}/releases?per_page={}",
            self.base_url, self.repo, limit
        );
        tracing::debug!("Fetching releases: {}", url);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_response(&response);

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::RepoNotFound(self.repo.clone()));
        }

        if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
            let exhausted = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .map(|v| v == "0")
                .unwrap_or(false);
            if exhausted {
                return Err(Error::RateLimited(Self::reset_after_secs(&response)));
            }
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch releases for {}: {} - {}",
                self.repo, status, body
            )));
        }

        let raw: Vec<GitHubRelease> = response.json().await?;
        Ok(raw
            .into_iter()
            .filter(|r| !r.draft)
            .map(Release::from)
            .collect())
    }
}
