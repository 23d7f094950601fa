use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractors::Extractor;
use crate::pacing::{FixedPacer, Pacer};
use crate::records::ResultSet;
use crate::selector::{self, RecordPattern};
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;

/// Limits governing the scroll loop
#[derive(Debug, Clone, Copy)]
pub struct ScrollLimits {
    /// Safety cap against pages with unbounded synthetic content
    pub max_rounds: u32,

    /// Consecutive stagnant rounds that signal the content has stabilized
    pub stagnation_limit: u32,
}

/// Transient bookkeeping owned by the scroll loop
struct ScrollState {
    last_height: u64,
    stagnant_rounds: u32,
}

/// Anything that can report a scrollable-content height and be scrolled to
/// the bottom. The WebDriver client implements this; tests use a scripted
/// fake so the loop runs without a browser.
pub trait ScrollSurface {
    async fn content_height(&mut self) -> Result<u64, ScrapeError>;
    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError>;
}

impl ScrollSurface for Client {
    async fn content_height(&mut self) -> Result<u64, ScrapeError> {
        let value = self
            .execute("return document.body.scrollHeight;", vec![])
            .await?;
        value
            .as_u64()
            .or_else(|| value.as_f64().map(|h| h as u64))
            .ok_or(ScrapeError::Script(value))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), ScrapeError> {
        self.execute("window.scrollTo(0, document.body.scrollHeight);", vec![])
            .await?;
        Ok(())
    }
}

/// Repeatedly scrolls the surface to the bottom until the content height
/// stops growing for `stagnation_limit` consecutive rounds, or the round cap
/// is hit. Returns the number of rounds executed.
pub async fn scroll_until_stable<S, P>(
    surface: &mut S,
    pacer: &P,
    limits: &ScrollLimits,
) -> Result<u32, ScrapeError>
where
    S: ScrollSurface,
    P: Pacer,
{
    let mut state = ScrollState {
        last_height: surface.content_height().await?,
        stagnant_rounds: 0,
    };
    let mut rounds = 0;

    while rounds < limits.max_rounds {
        surface.scroll_to_bottom().await?;
        tokio::time::sleep(pacer.wait_between_rounds(rounds)).await;

        let height = surface.content_height().await?;
        rounds += 1;

        if height == state.last_height {
            state.stagnant_rounds += 1;
            ::log::debug!(
                "scroll round {}: height stable at {} ({}/{} stagnant)",
                rounds,
                height,
                state.stagnant_rounds,
                limits.stagnation_limit
            );
            if state.stagnant_rounds >= limits.stagnation_limit {
                ::log::info!(
                    "content height stable for {} rounds, no more lazy content",
                    state.stagnant_rounds
                );
                return Ok(rounds);
            }
        } else {
            ::log::debug!(
                "scroll round {}: height grew {} -> {}",
                rounds,
                state.last_height,
                height
            );
            state.stagnant_rounds = 0;
            state.last_height = height;
        }
    }

    ::log::warn!(
        "scroll cap of {} rounds reached before content stabilized",
        limits.max_rounds
    );
    Ok(rounds)
}

/// Drives a scriptable rendering session to surface lazily-loaded content,
/// then applies the same structural extraction as the static pass over the
/// fully-expanded document.
pub struct DynamicExtractor {
    webdriver_url: String,
    pattern: RecordPattern,
    pacer: FixedPacer,
    limits: ScrollLimits,
    initial_wait: Duration,
}

impl DynamicExtractor {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let pattern = RecordPattern::new(&config.start_url, &config.record_pattern)?;

        Ok(Self {
            webdriver_url: config.webdriver_url.clone(),
            pattern,
            pacer: FixedPacer::from_millis(config.scroll_pause_ms),
            limits: ScrollLimits {
                max_rounds: config.max_scroll_rounds,
                stagnation_limit: config.stagnation_limit,
            },
            initial_wait: Duration::from_millis(config.initial_wait_ms),
        })
    }

    /// Connect to the configured WebDriver endpoint, then common fallbacks
    async fn connect(&self) -> Result<Client, ScrapeError> {
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => {
                ::log::warn!(
                    "failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://127.0.0.1:4444", // try with IP instead of localhost
        ];

        for url in fallback_urls {
            if url == self.webdriver_url {
                continue;
            }
            ::log::info!("trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                return Ok(client);
            }
        }

        Err(ScrapeError::RenderSession(format!(
            "no WebDriver server reachable at {} or fallbacks; \
             is chromedriver or geckodriver running?",
            self.webdriver_url
        )))
    }

    async fn drive(&self, client: &Client, url: &str) -> Result<ResultSet, ScrapeError> {
        client.goto(url).await?;

        // Let the initial script-rendered content settle before scrolling
        tokio::time::sleep(self.initial_wait).await;

        let mut surface = client.clone();
        let rounds = scroll_until_stable(&mut surface, &self.pacer, &self.limits).await?;
        ::log::info!("scroll loop finished after {} rounds", rounds);

        let html = client.source().await?;
        Ok(selector::extract_records(&html, &self.pattern))
    }
}

impl Extractor for DynamicExtractor {
    async fn extract(&self, url: &str) -> Result<ResultSet, ScrapeError> {
        ::log::info!("starting rendering session for {}", url);
        let client = self.connect().await?;

        // The session is released on every exit path, including a failure
        // mid-scroll, so no browser process leaks.
        let result = self.drive(&client, url).await;

        if let Err(e) = client.close().await {
            ::log::warn!("failed to close rendering session: {}", e);
        }

        match &result {
            Ok(set) => ::log::info!("dynamic extraction yielded {} records", set.len()),
            Err(e) => ::log::error!("dynamic extraction failed: {}", e),
        }
        result
    }
}
