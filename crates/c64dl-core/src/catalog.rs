//! Top-level driver: fetch the catalog listing and download every title on it.

use std::path::PathBuf;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::game::process_game;
use crate::http::{resolve, SiteClient};
use crate::links::{extract_links, CatalogEntry};
use crate::page::Page;

/// Exact `class` attribute of the `<div>` holding the title links.
pub const CATALOG_CONTAINER_CLASS: &str = "container c64border";

pub struct Catalog {
    client: SiteClient,
    listing_path: String,
    output_dir: PathBuf,
}

impl Catalog {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self {
            client: SiteClient::new(config)?,
            listing_path: config.listing_path.clone(),
            output_dir: config.output_dir.clone(),
        })
    }

    fn fetch_listing(&self) -> Result<Page> {
        let url = resolve(self.client.base_url(), &self.listing_path)?;
        tracing::info!("fetching catalog {}", url);
        self.client.get_page(&url)
    }

    /// Titles on the listing page, in document order, without downloading anything.
    pub fn list(&self) -> Result<Vec<CatalogEntry>> {
        let listing = self.fetch_listing()?;
        let container = find_container(&listing)?;
        extract_links(container).collect()
    }

    /// Download every title on the listing page.
    ///
    /// A failing title is logged and the next one is processed. Only listing
    /// failures (fetch, missing container, malformed anchor) end the run early.
    pub fn run(&self) -> Result<()> {
        let listing = self.fetch_listing()?;
        let container = find_container(&listing)?;

        for entry in extract_links(container) {
            let entry = entry?;
            tracing::info!("processing {}", entry.title);
            match process_game(&self.client, &self.output_dir, &entry) {
                Ok(report) => tracing::debug!(
                    "{}: saved={} kept={} failed={}",
                    entry.title,
                    report.saved,
                    report.kept,
                    report.failed
                ),
                Err(e) => tracing::error!("error processing game {}: {}", entry.title, e),
            }
        }
        Ok(())
    }
}

fn find_container(listing: &Page) -> Result<scraper::ElementRef<'_>> {
    listing
        .find_first("div", Some(CATALOG_CONTAINER_CLASS))
        .ok_or_else(|| ScrapeError::CatalogStructure {
            url: listing.url().to_string(),
        })
}
