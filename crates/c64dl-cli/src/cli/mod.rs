//! CLI for the c64dl catalog downloader.

mod commands;

use anyhow::Result;
use c64dl_core::config::{self, ConfigOrigin, ScrapeConfig};
use c64dl_core::ScrapeError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_catalog, run_list};

/// Top-level CLI. With no arguments the whole catalog is downloaded.
#[derive(Debug, Parser)]
#[command(name = "c64dl")]
#[command(about = "c64dl: download every game file listed on c64g.com", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Read configuration from this file instead of ~/.config/c64dl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Site root to scrape (overrides the config file).
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory that receives one sub-directory per title (overrides the config file).
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Download every title in the catalog (the default).
    Run,

    /// Print catalog titles and their page URLs without downloading.
    List,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Config file (explicit or XDG default) with command-line overrides applied.
    ///
    /// An explicit `--config` must load. The XDG default falls back to built-in
    /// defaults when its location is unusable; overrides still apply.
    pub fn resolve_config(&self) -> Result<(ScrapeConfig, ConfigOrigin)> {
        let (cfg, origin) = match &self.config {
            Some(path) => (config::load_from(path)?, ConfigOrigin::Loaded(path.clone())),
            None => config::load_or_init()?,
        };
        Ok((self.apply_overrides(cfg)?, origin))
    }

    fn apply_overrides(&self, mut cfg: ScrapeConfig) -> Result<ScrapeConfig> {
        if let Some(url) = &self.base_url {
            cfg = cfg.with_base_url(url)?;
        }
        if let Some(dir) = &self.output_dir {
            cfg = cfg.with_output_dir(dir);
        }
        Ok(cfg)
    }

    /// Run the selected command and log, rather than return, any failure.
    pub fn dispatch(&self, cfg: &ScrapeConfig) {
        tracing::debug!("resolved config: {:?}", cfg);
        let result = match self.command.unwrap_or(CliCommand::Run) {
            CliCommand::Run => run_catalog(cfg),
            CliCommand::List => run_list(cfg),
        };
        if let Err(err) = result {
            report(&err);
        }
    }
}

fn report(err: &ScrapeError) {
    if err.is_network() {
        tracing::error!("network error occurred: {}", err);
    } else {
        tracing::error!("an error occurred: {}", err);
    }
}
