//! Per-title download: find the download buttons on a title page and drive each
//! one through its confirmation form.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScrapeError};
use crate::form::inspect_form;
use crate::http::{resolve, SiteClient};
use crate::links::CatalogEntry;
use crate::naming::sanitize_component;
use crate::page::{element_text, Page};
use crate::storage::{save_file, SaveOutcome};

/// Exact `class` attribute of a download button on a title page.
pub const DOWNLOAD_BUTTON_CLASS: &str = "btn btn-primary btn-block";

/// A download button: its label names the saved file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub label: String,
    /// Raw `href` of the confirmation page, resolved when the button is processed.
    pub href: String,
}

/// Per-title tally, for logging only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub saved: usize,
    pub kept: usize,
    pub failed: usize,
}

/// `<output_dir>/<title>`, with the title reduced to one path component.
pub fn game_dir(output_dir: &Path, title: &str) -> PathBuf {
    output_dir.join(sanitize_component(title))
}

/// All download buttons on `page`, in document order. A button without `href`
/// fails the whole page.
pub fn download_targets(page: &Page) -> Result<Vec<DownloadTarget>> {
    page.find_all("a", Some(DOWNLOAD_BUTTON_CLASS))
        .into_iter()
        .map(|button| -> Result<DownloadTarget> {
            let href = button
                .value()
                .attr("href")
                .ok_or(ScrapeError::MissingAttribute {
                    tag: "a",
                    attr: "href",
                })?;
            Ok(DownloadTarget {
                label: element_text(&button),
                href: href.to_string(),
            })
        })
        .collect()
}

/// Confirmation round trip: resolve the button's `href` against the site root,
/// fetch the page, submit its first form, return the response body.
pub fn fetch_payload(client: &SiteClient, target: &DownloadTarget) -> Result<Vec<u8>> {
    let confirmation_url = resolve(client.base_url(), &target.href)?;
    let page = client.get_page(&confirmation_url)?;
    let form = page
        .find_first("form", None)
        .ok_or_else(|| ScrapeError::MissingElement {
            tag: "form",
            url: page.url().to_string(),
        })?;
    let form = inspect_form(form);
    let payload = form.submission_payload()?;
    if form.method != "post" {
        tracing::debug!(
            "form on {} declares method {:?}; submitting as post",
            page.url(),
            form.method
        );
    }

    let action_url = resolve(page.url(), &form.action)?;
    client.post_form(&action_url, &payload)
}

/// Download every file offered on one title's page into `<output_dir>/<title>/`.
///
/// Network failures on a single button are logged and skipped. Anything else
/// (title page fetch, malformed button or form, directory creation) is returned
/// and abandons the title.
pub fn process_game(
    client: &SiteClient,
    output_dir: &Path,
    entry: &CatalogEntry,
) -> Result<GameReport> {
    let dir = game_dir(output_dir, &entry.title);
    fs::create_dir_all(&dir).map_err(|source| ScrapeError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let page_url = resolve(client.base_url(), &entry.listing_url)?;
    let page = client.get_page(&page_url)?;
    let targets = download_targets(&page)?;
    tracing::debug!("{}: {} download button(s)", entry.title, targets.len());

    let mut report = GameReport::default();
    for target in &targets {
        let body = match fetch_payload(client, target) {
            Ok(body) => body,
            Err(e) if e.is_network() => {
                tracing::warn!("error downloading {}: {}", target.label, e);
                report.failed += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let path = dir.join(sanitize_component(&target.label));
        match save_file(&path, &body) {
            Ok(SaveOutcome::Written { bytes }) => {
                tracing::info!("saved {} ({} bytes)", path.display(), bytes);
                report.saved += 1;
            }
            Ok(SaveOutcome::Kept) => {
                tracing::info!("file already exists: {}", path.display());
                report.kept += 1;
            }
            Err(e) => {
                tracing::error!("error saving {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
