use serde::Deserialize;

/// Main configuration structure for Sitewalk
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
}

/// Where seed and ignore lists are read from
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InputConfig {
    /// Newline-delimited seed URLs
    #[serde(default = "default_seeds_path")]
    pub seeds_path: String,

    /// Newline-delimited URLs that must never be crawled
    #[serde(default = "default_ignore_path")]
    pub ignore_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            seeds_path: default_seeds_path(),
            ignore_path: default_ignore_path(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the discovered-links file, rewritten after every page
    #[serde(default = "default_links_path")]
    pub links_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            links_path: default_links_path(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Per-request timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent header; the client default is used when absent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Only enqueue links with an http or https scheme
    #[serde(default)]
    pub http_only: bool,

    /// Stop after this many crawled pages (0 = no limit)
    #[serde(default)]
    pub max_pages: usize,
}

fn default_seeds_path() -> String {
    "input.txt".to_string()
}

fn default_ignore_path() -> String {
    "ignore.txt".to_string()
}

fn default_links_path() -> String {
    "output.txt".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
