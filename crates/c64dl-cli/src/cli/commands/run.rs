//! `c64dl [run]` – download the whole catalog.

use c64dl_core::config::ScrapeConfig;
use c64dl_core::{Catalog, Result};

pub fn run_catalog(cfg: &ScrapeConfig) -> Result<()> {
    let catalog = Catalog::new(cfg)?;
    catalog.run()?;
    tracing::info!("catalog run finished; files under {}", cfg.output_dir.display());
    Ok(())
}
