//! `c64dl list` – print the catalog without downloading.

use c64dl_core::config::ScrapeConfig;
use c64dl_core::{Catalog, Result};

pub fn run_list(cfg: &ScrapeConfig) -> Result<()> {
    let catalog = Catalog::new(cfg)?;
    let entries = catalog.list()?;
    if entries.is_empty() {
        println!("No titles found.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}\t{}", entry.title, entry.listing_url);
    }
    Ok(())
}
