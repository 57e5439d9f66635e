use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Site root every relative link is resolved against.
pub const BASE_URL: &str = "https://c64g.com/";
/// Catalog listing path, relative to `BASE_URL`.
pub const LISTING_PATH: &str = "games";
/// Output root; each title gets a directory below it.
pub const OUTPUT_DIR: &str = "games";
/// Timeout for the confirmation-form POST. Page GETs have none.
pub const SUBMIT_TIMEOUT_SECS: u64 = 5;

const DEFAULT_SUBMIT_HEADERS: &[(&str, &str)] = &[
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9",
    ),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Accept-Language", "en-US,en;q=0.8"),
    ("Origin", "https://c64g.com"),
    ("Connection", "keep-alive"),
    ("Content-Type", "application/x-www-form-urlencoded"),
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36",
    ),
];

pub fn default_submit_headers() -> BTreeMap<String, String> {
    DEFAULT_SUBMIT_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Scraper configuration, optionally loaded from `~/.config/c64dl/config.toml`.
/// Every field may be omitted from the file; missing ones take the site defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Site root for the listing, title pages and confirmation pages.
    pub base_url: String,
    /// Listing page path joined onto `base_url`.
    pub listing_path: String,
    /// Directory that receives `<title>/<label>` files.
    pub output_dir: PathBuf,
    /// Timeout in seconds for each form submission.
    pub submit_timeout_secs: u64,
    /// Header set sent with each form submission.
    pub submit_headers: BTreeMap<String, String>,
    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            listing_path: LISTING_PATH.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            submit_timeout_secs: SUBMIT_TIMEOUT_SECS,
            submit_headers: default_submit_headers(),
            log_file: None,
        }
    }
}

impl ScrapeConfig {
    /// Point the scraper at another site root. The `Origin` submit header
    /// follows the new root.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .with_context(|| format!("invalid base URL: {base_url}"))?;
        self.base_url = base_url.to_string();
        self.submit_headers
            .insert("Origin".to_string(), parsed.origin().ascii_serialization());
        Ok(self)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }
}

/// `~/.config/c64dl/config.toml`. Creates the parent directory.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("c64dl")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("failed to create config directory")
}

/// Where the effective configuration came from, for the caller to log.
#[derive(Debug)]
pub enum ConfigOrigin {
    /// Read from an existing file.
    Loaded(PathBuf),
    /// No file existed; defaults were written here.
    Created(PathBuf),
    /// The config location was unusable; built-in defaults are in effect.
    Builtin(anyhow::Error),
}

/// Load configuration from `~/.config/c64dl/config.toml`, creating a default
/// file if none exists.
///
/// If the config directory can't be located or written, the built-in defaults
/// are returned with `ConfigOrigin::Builtin`. An existing file that fails to
/// read or parse is still an error.
pub fn load_or_init() -> Result<(ScrapeConfig, ConfigOrigin)> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => Ok((ScrapeConfig::default(), ConfigOrigin::Builtin(e))),
    }
}

/// `load_or_init` against an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<(ScrapeConfig, ConfigOrigin)> {
    if path.exists() {
        let cfg = load_from(path)?;
        return Ok((cfg, ConfigOrigin::Loaded(path.to_path_buf())));
    }

    let default_cfg = ScrapeConfig::default();
    match write_default(path, &default_cfg) {
        Ok(()) => Ok((default_cfg, ConfigOrigin::Created(path.to_path_buf()))),
        Err(e) => Ok((default_cfg, ConfigOrigin::Builtin(e))),
    }
}

fn write_default(path: &Path, cfg: &ScrapeConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, toml)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    Ok(())
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ScrapeConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: ScrapeConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}
