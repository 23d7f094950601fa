use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractors::Extractor;
use crate::records::ResultSet;
use crate::selector::{self, RecordPattern};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

/// Harvests records from the document as initially delivered by the server,
/// without executing page scripts. Cheap: one HTTP GET, no browser session.
pub struct StaticExtractor {
    http: reqwest::Client,
    pattern: RecordPattern,
}

impl StaticExtractor {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let pattern = RecordPattern::new(&config.start_url, &config.record_pattern)?;

        let http = reqwest::Client::builder()
            .default_headers(browser_headers(&config.user_agent))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ScrapeError::Fetch {
                url: config.start_url.clone(),
                source,
            })?;

        Ok(Self { http, pattern })
    }

    async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::FetchStatus {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

impl Extractor for StaticExtractor {
    async fn extract(&self, url: &str) -> Result<ResultSet, ScrapeError> {
        ::log::info!("attempting static extraction of {}", url);

        let html = self.fetch(url).await?;
        let results = selector::extract_records(&html, &self.pattern);

        ::log::info!("static extraction yielded {} records", results.len());
        Ok(results)
    }
}

/// Header set of a standard desktop browser. Servers may reject or serve
/// degraded content to unidentified clients.
fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    match HeaderValue::from_str(user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(e) => {
            ::log::warn!("configured user agent is not a valid header value: {}", e);
        }
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

    headers
}
