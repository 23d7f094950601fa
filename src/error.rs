use thiserror::Error;

/// Errors that can occur while harvesting a listing page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The static fetch failed at the transport level (DNS, TLS, timeout...)
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered the static fetch with a non-success status
    #[error("server returned {status} for {url}")]
    FetchStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// No WebDriver session could be established at any candidate endpoint
    #[error("could not establish a rendering session: {0}")]
    RenderSession(String),

    /// A WebDriver command failed after the session was established
    #[error("webdriver command failed: {0}")]
    RenderCommand(#[from] fantoccini::error::CmdError),

    /// Injected script returned something other than a numeric height
    #[error("unexpected script result: {0}")]
    Script(serde_json::Value),

    /// A record-anchor pattern did not compile
    #[error("invalid record pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Writing the output file failed
    #[error("failed to write {path}: {source}")]
    OutputIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
