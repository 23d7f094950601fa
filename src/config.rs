use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the listing harvester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// URL of the listing page to harvest
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// Regex the resolved link target must match to count as a record anchor
    #[serde(default = "default_record_pattern")]
    pub record_pattern: String,

    /// User-Agent header sent with the static fetch; servers may reject or
    /// degrade content for unidentified clients
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Minimum static yield below which the dynamic extractor runs.
    /// Empirical constant carried from field use; tune per target page.
    #[serde(default = "default_min_static_results")]
    pub min_static_results: usize,

    /// Safety cap on scroll rounds for pages with unbounded content
    #[serde(default = "default_max_scroll_rounds")]
    pub max_scroll_rounds: u32,

    /// Consecutive no-growth rounds before the scroll loop stops.
    /// Must be > 1 to absorb rounds where lazy content was merely slow.
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: u32,

    /// Pause between scroll rounds, in milliseconds
    #[serde(default = "default_scroll_pause_ms")]
    pub scroll_pause_ms: u64,

    /// Settle time after navigation before the first scroll round
    #[serde(default = "default_initial_wait_ms")]
    pub initial_wait_ms: u64,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Path of the CSV file to write
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            record_pattern: default_record_pattern(),
            user_agent: default_user_agent(),
            min_static_results: default_min_static_results(),
            max_scroll_rounds: default_max_scroll_rounds(),
            stagnation_limit: default_stagnation_limit(),
            scroll_pause_ms: default_scroll_pause_ms(),
            initial_wait_ms: default_initial_wait_ms(),
            webdriver_url: default_webdriver_url(),
            output_path: default_output_path(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply environment overrides (currently just WEBDRIVER_URL)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }
}

fn default_start_url() -> String {
    "https://bigfuture.collegeboard.org/scholarships".to_string()
}

fn default_record_pattern() -> String {
    r"/scholarships/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_min_static_results() -> usize {
    100
}

fn default_max_scroll_rounds() -> u32 {
    200
}

fn default_stagnation_limit() -> u32 {
    3
}

fn default_scroll_pause_ms() -> u64 {
    2000
}

fn default_initial_wait_ms() -> u64 {
    3000
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_output_path() -> String {
    "scholarships.csv".to_string()
}
