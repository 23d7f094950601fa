#![allow(async_fn_in_trait)]

// Re-export modules
pub mod config;
pub mod error;
pub mod extractors;
pub mod output;
pub mod pacing;
pub mod pipeline;
pub mod records;
pub mod selector;

// Re-export commonly used types for convenience
pub use error::ScrapeError;
pub use records::{Record, ResultSet};

use config::ScraperConfig;
use extractors::{DynamicExtractor, StaticExtractor};

/// Main builder for harvesting a listing page.
///
/// Wires the static and dynamic extractors together behind the decision
/// gate in [`pipeline::run_with`].
pub struct Pipeline {
    config: ScraperConfig,
    dynamic_forced: bool,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            dynamic_forced: false,
        }
    }

    /// Load the pipeline configuration from a JSON file
    pub fn with_config_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = ScraperConfig::from_file(path)?;
        Ok(Self::new(config))
    }

    /// Force the dynamic extractor to run even when the static pass yields
    /// enough results on its own
    pub fn with_forced_dynamic(mut self, forced: bool) -> Self {
        self.dynamic_forced = forced;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the extraction pipeline and return the frozen result set
    pub async fn run(&self) -> Result<ResultSet, ScrapeError> {
        let static_extractor = StaticExtractor::new(&self.config)?;
        let dynamic_extractor = DynamicExtractor::new(&self.config)?;

        pipeline::run_with(
            &static_extractor,
            &dynamic_extractor,
            &self.config.start_url,
            self.dynamic_forced,
            self.config.min_static_results,
        )
        .await
    }
}
