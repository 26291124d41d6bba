//! Page-by-page scrape orchestration.
//!
//! The loop is deliberately dumb: fetch, locate, normalize, pace, repeat.
//! All retry logic lives below the [`PageFetch`] seam (see
//! [`crate::client`]), so any error surfacing here is final and ends the
//! run with whatever was gathered so far.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use adlib_core::AdRecord;

use crate::error::ScraperError;
use crate::normalize::normalize_ad;
use crate::payload::extract_ads;

/// The page-fetch seam between orchestration and transport.
///
/// Implemented by [`crate::AdLibraryClient`] for real HTTP traffic and by
/// scripted fetchers in tests.
pub trait PageFetch {
    /// Fetches one page of results as a parsed JSON payload.
    ///
    /// Implementations must resolve ordinary HTTP-level failures into a
    /// [`ScraperError`] rather than panicking.
    fn fetch_page(
        &self,
        query: &str,
        region: &str,
        page: u32,
    ) -> impl Future<Output = Result<Value, ScraperError>> + Send;
}

/// Scrapes up to `max_pages` pages of ads and returns the normalized records.
///
/// Pages are fetched strictly in order, one at a time. Pagination stops
/// early when a fetch fails (the records gathered so far are returned) or
/// when a page yields no ads (the natural end of results). Non-object
/// entries in an ad list are skipped. When more pages remain after a page
/// is processed, the loop pauses for `inter_request_delay_ms` before the
/// next request.
pub async fn scrape<F: PageFetch>(
    fetcher: &F,
    query: &str,
    region: &str,
    max_pages: u32,
    inter_request_delay_ms: u64,
) -> Vec<AdRecord> {
    let mut all_ads: Vec<AdRecord> = Vec::new();
    tracing::info!(query, region, max_pages, "scraping ad library");

    for page in 1..=max_pages {
        let payload = match fetcher.fetch_page(query, region, page).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(page, error = %e, "stopping pagination after fetch failure");
                break;
            }
        };

        let raw_ads = extract_ads(&payload);
        tracing::info!(page, count = raw_ads.len(), "page returned raw ads");

        if raw_ads.is_empty() {
            tracing::info!(page, "no ads on page; stopping pagination");
            break;
        }

        for raw in raw_ads {
            if let Value::Object(map) = raw {
                all_ads.push(normalize_ad(map));
            } else {
                tracing::debug!(page, "skipping non-object ad entry");
            }
        }

        if page < max_pages && inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
        }
    }

    tracing::info!(total = all_ads.len(), "scrape complete");
    all_ads
}
