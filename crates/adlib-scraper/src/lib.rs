pub mod client;
pub mod coerce;
pub mod error;
pub mod normalize;
pub mod payload;
pub mod scrape;
pub mod timestamp;

mod retry;

pub use client::AdLibraryClient;
pub use error::ScraperError;
pub use normalize::normalize_ad;
pub use payload::extract_ads;
pub use scrape::{scrape, PageFetch};
pub use timestamp::parse_timestamp_ms;
