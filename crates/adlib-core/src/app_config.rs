use std::path::PathBuf;

/// Application configuration, loaded from `ADLIB_*` environment variables.
///
/// See [`crate::config::load_app_config`] for the loader and the defaults
/// applied to optional variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ad Library endpoint the scraper pages through. Required.
    pub base_url: String,
    pub log_level: String,
    /// Directory for auto-generated export files.
    pub output_dir: PathBuf,
    /// Region code used when the CLI is invoked without `--region`.
    pub default_region: String,
    pub default_pages: u32,
    /// Export format used when the CLI is invoked without `--format`.
    pub default_output_format: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between page requests, applied after every page except the last.
    pub inter_request_delay_ms: u64,
    /// Additional attempts after the first failure for transient HTTP errors.
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff: `base * 2^attempt`.
    pub retry_backoff_base_secs: u64,
}
