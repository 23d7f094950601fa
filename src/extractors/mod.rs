pub mod dynamic_page;
pub mod static_page;

#[cfg(test)]
mod tests;

pub use dynamic_page::DynamicExtractor;
pub use static_page::StaticExtractor;

use crate::error::ScrapeError;
use crate::records::ResultSet;

/// Common seam for the two extraction strategies, so the orchestrator's
/// decision gate can be exercised against test doubles.
pub trait Extractor {
    /// Harvest records from the page at `url`
    async fn extract(&self, url: &str) -> Result<ResultSet, ScrapeError>;
}
