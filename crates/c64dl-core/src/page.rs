//! Parsed HTML page with the two queries the scraper needs.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// An HTML document together with the URL it was fetched from.
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    /// Parse `body` as HTML. Invalid UTF-8 is replaced, never rejected.
    pub fn parse(url: Url, body: &[u8]) -> Self {
        let html = Html::parse_document(&String::from_utf8_lossy(body));
        Self { url, html }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First `tag` element in document order whose `class` attribute equals `class`.
    pub fn find_first(&self, tag: &str, class: Option<&str>) -> Option<ElementRef<'_>> {
        let selector = selector_for(tag, class)?;
        let first = self.html.select(&selector).next();
        first
    }

    /// All `tag` elements in document order whose `class` attribute equals `class`.
    pub fn find_all(&self, tag: &str, class: Option<&str>) -> Vec<ElementRef<'_>> {
        let Some(selector) = selector_for(tag, class) else {
            return Vec::new();
        };
        let all = self.html.select(&selector).collect();
        all
    }
}

/// `tag[class="a b"]`: exact attribute match, so `a b c` or `b a` do not qualify.
fn selector_for(tag: &str, class: Option<&str>) -> Option<Selector> {
    let css = match class {
        Some(class) => format!("{tag}[class=\"{}\"]", class.replace('"', "\\\"")),
        None => tag.to_string(),
    };
    let selector = match Selector::parse(&css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("invalid selector {css}: {e}");
            None
        }
    };
    selector
}

/// Concatenated text of an element and all its descendants.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}
