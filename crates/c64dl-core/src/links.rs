//! Anchor extraction from a catalog container.

use scraper::ElementRef;

use crate::error::{Result, ScrapeError};
use crate::page::element_text;

/// One title on the catalog listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Anchor text, used as the title's directory name.
    pub title: String,
    /// Raw `href`, relative or absolute.
    pub listing_url: String,
}

/// Lazily yields one entry per `<a>` nested anywhere in `container`, in document order.
/// An anchor without `href` yields `MissingAttribute` in its place.
pub fn extract_links<'a>(
    container: ElementRef<'a>,
) -> impl Iterator<Item = Result<CatalogEntry>> + 'a {
    container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .map(|a| -> Result<CatalogEntry> {
            let href = a.value().attr("href").ok_or(ScrapeError::MissingAttribute {
                tag: "a",
                attr: "href",
            })?;
            Ok(CatalogEntry {
                title: element_text(&a),
                listing_url: href.to_string(),
            })
        })
}
