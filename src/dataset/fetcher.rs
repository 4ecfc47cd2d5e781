use crate::dataset::{redact_url, DataSource};
use crate::error::{Error, Result};
use reqwest::{header, Client};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

/// One try plus two retries
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Fixed pause between two attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Dataset fetcher with a fixed-delay retry policy
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    pub fn new(user_agent: String, timeout: Duration, policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch the raw document, retrying every failed attempt
    pub async fn fetch(&self, source: &DataSource) -> Result<String> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.fetch_once(source).await {
                Ok(content) => return Ok(content),
                Err(Error::Fetch(msg)) if attempt < max_attempts => {
                    warn!(
                        "Fetch failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempt, max_attempts, msg, self.policy.delay
                    );
                    attempt += 1;
                    sleep(self.policy.delay).await;
                }
                Err(Error::Fetch(msg)) => {
                    return Err(Error::Fetch(format!(
                        "{msg} (gave up after {attempt} attempts)"
                    )))
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self, source: &DataSource) -> Result<String> {
        match source {
            DataSource::Http(url) => self.fetch_http(url).await,
            DataSource::File(path) => Self::read_file(path).await,
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<String> {
        let shown = redact_url(url);
        debug!("Fetching: {}", shown);

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("Request to {shown} failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("HTTP {status} from {shown}")));
        }

        if let Some(ct) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !ct.to_lowercase().contains("json") && !ct.starts_with("text/plain") {
                // Static hosts often mislabel .json files
                warn!("Unexpected content type: {} for {}", ct, shown);
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Fetch(format!("Reading body from {shown} failed: {}", e.without_url())))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::Parse(format!("Invalid UTF-8 in response: {e}")))
    }

    async fn read_file(path: &Path) -> Result<String> {
        debug!("Reading: {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Fetch(format!("Reading {} failed: {e}", path.display())))?;

        String::from_utf8(bytes)
            .map_err(|e| Error::Parse(format!("Invalid UTF-8 in {}: {e}", path.display())))
    }
}
