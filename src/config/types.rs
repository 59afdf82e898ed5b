use serde::Deserialize;

/// Default site the harvester targets
pub const DEFAULT_BASE_URL: &str = "https://mantech.co.za";

/// Browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Catalog Harvest
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the values the harvester was originally tuned with.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub listing: ListingConfig,
    pub throttle: ThrottleConfig,
    pub output: OutputConfig,
}

/// Target site layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host of the site, without a trailing path
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the page listing every catalog section
    #[serde(rename = "categories-path")]
    pub categories_path: String,

    /// Path of the paginated product listing endpoint
    #[serde(rename = "listing-path")]
    pub listing_path: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl SiteConfig {
    /// URL of the categories page
    pub fn categories_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.categories_path)
    }

    /// Base listing endpoint that category queries are appended to
    pub fn listing_endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.listing_path)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            categories_path: "/Categories.aspx".to_string(),
            listing_path: "/Stock.aspx".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total time allowed for one request, in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Listing pagination behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Maximum number of listing pages to walk per category
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { max_pages: 3 }
    }
}

/// An inclusive range of milliseconds a pause is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// A range that never pauses
    pub const fn none() -> Self {
        Self { min: 0, max: 0 }
    }
}

/// Request pacing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum time between two consecutive requests (milliseconds)
    #[serde(rename = "min-request-interval-ms")]
    pub min_request_interval_ms: u64,

    /// Pause after every listing page
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: DelayRange,

    /// Pause between two categories
    #[serde(rename = "category-delay-ms")]
    pub category_delay_ms: DelayRange,

    /// Optional pause after every extracted row
    #[serde(rename = "row-delay-ms")]
    pub row_delay_ms: Option<DelayRange>,
}

impl ThrottleConfig {
    /// A configuration that never waits, mostly useful for tests
    pub fn disabled() -> Self {
        Self {
            min_request_interval_ms: 0,
            page_delay_ms: DelayRange::none(),
            category_delay_ms: DelayRange::none(),
            row_delay_ms: None,
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_request_interval_ms: 0,
            page_delay_ms: DelayRange::new(1000, 2000),
            category_delay_ms: DelayRange::new(2000, 3000),
            row_delay_ms: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory all JSON files are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
        }
    }
}
