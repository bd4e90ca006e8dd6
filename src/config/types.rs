use serde::Deserialize;

/// Main configuration structure for folio-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

/// The catalog site being scraped
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Landing page that lists the categories
    #[serde(rename = "landing-url")]
    pub landing_url: String,

    /// Value stored as the author of every book (authors are not listed)
    #[serde(rename = "author-placeholder", default)]
    pub author_placeholder: Option<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Additional attempts after a transient failure
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlConfig {
    /// Only crawl the first N categories
    #[serde(rename = "max-categories", default)]
    pub max_categories: Option<usize>,

    /// Stop a category after N listing pages
    #[serde(rename = "max-pages-per-category", default)]
    pub max_pages_per_category: Option<usize>,

    /// Pause between page requests (milliseconds)
    #[serde(rename = "page-delay-ms", default)]
    pub page_delay_ms: u64,

    /// What to do with a category's books when its pagination fails
    #[serde(rename = "on-category-error", default)]
    pub on_category_error: CategoryErrorPolicy,
}

/// Policy for books already scraped from a category whose pagination failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryErrorPolicy {
    /// Keep the pages fetched before the failure
    #[default]
    KeepPartial,

    /// Drop every book from the failed category
    DiscardCategory,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the exported spreadsheet
    #[serde(rename = "report-path")]
    pub report_path: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    1000
}
