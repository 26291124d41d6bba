use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;
use crate::scrape::PageFetch;

/// HTTP client for an Ad Library-style search endpoint.
///
/// Pages are requested as `GET {base_url}?search_term=..&page=..&region=..`.
/// Rate limiting (429), not-found (404), and other non-2xx responses map to
/// typed errors; transient errors (429, network failures) are automatically
/// retried with exponential backoff up to `max_retries` additional attempts.
pub struct AdLibraryClient {
    client: Client,
    base_url: String,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl AdLibraryClient {
    /// Creates an `AdLibraryClient` with configured timeout, `User-Agent`,
    /// and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` does not parse
    /// as an absolute URL, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let trimmed = base_url.trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|e| ScraperError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: trimmed.to_owned(),
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one page of ads, with automatic retry on transient errors.
    ///
    /// Returns the parsed JSON payload without imposing any shape on it;
    /// locating the ad list inside is [`crate::payload::extract_ads`]'s job.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`] — HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status (not retried).
    /// - [`ScraperError::Http`] — network or TLS failure after all retries exhausted.
    /// - [`ScraperError::Deserialize`] — response body is not valid JSON (not retried).
    pub async fn fetch_ads_page(
        &self,
        query: &str,
        region: &str,
        page: u32,
    ) -> Result<Value, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            tracing::debug!(page, query, region, url = %self.base_url, "requesting ads page");
            let page_str = page.to_string();
            let response = self
                .client
                .get(&self.base_url)
                .query(&[
                    ("search_term", query),
                    ("page", page_str.as_str()),
                    ("region", region),
                ])
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);

                return Err(ScraperError::RateLimited {
                    domain: extract_domain(&self.base_url),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: self.base_url.clone(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: self.base_url.clone(),
                });
            }

            let body = response.text().await?;
            serde_json::from_str::<Value>(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("ads page {page} from {}", extract_domain(&self.base_url)),
                source: e,
            })
        })
        .await
    }
}

impl PageFetch for AdLibraryClient {
    async fn fetch_page(
        &self,
        query: &str,
        region: &str,
        page: u32,
    ) -> Result<Value, ScraperError> {
        self.fetch_ads_page(query, region, page).await
    }
}

/// Extracts the hostname from the endpoint URL for use in error messages.
///
/// Falls back to the full URL string if it has no recognizable host part.
fn extract_domain(base_url: &str) -> String {
    let without_scheme = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(base_url)
        .to_owned()
}
