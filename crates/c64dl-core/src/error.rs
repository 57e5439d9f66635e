//! Error taxonomy for the scrape pipeline.
//!
//! Network failures are kept apart from page-structure failures so the
//! orchestrators can decide which unit of work (button, title, run) to abandon.

use thiserror::Error;

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// libcurl reported a transport failure (DNS, connect, timeout, ...).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Response arrived with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}")]
    HttpStatus {
        method: &'static str,
        url: String,
        status: u32,
    },

    /// A relative reference could not be resolved into a request URL.
    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The listing page has no catalog container; nothing can be scraped.
    #[error("could not find games container on {url}")]
    CatalogStructure { url: String },

    #[error("no <{tag}> element on {url}")]
    MissingElement { tag: &'static str, url: String },

    #[error("<{tag}> element is missing its `{attr}` attribute")]
    MissingAttribute {
        tag: &'static str,
        attr: &'static str,
    },

    /// Form input at `index` has no `name`, so it cannot be submitted.
    #[error("form input #{index} has no name")]
    MissingFieldName { index: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// True for failures of a request itself rather than of the page contents.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ScrapeError::Transport { .. }
                | ScrapeError::HttpStatus { .. }
                | ScrapeError::InvalidUrl { .. }
        )
    }
}
