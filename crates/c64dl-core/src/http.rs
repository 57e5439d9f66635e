//! Blocking HTTP over libcurl: page GETs and url-encoded form POSTs.
//!
//! One `Easy` handle per request. GETs carry libcurl's default headers and no
//! timeout; POSTs carry the configured header set and submit timeout.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::page::Page;

/// Resolve `reference` against `base` the way a browser resolves an href.
pub fn resolve(base: &Url, reference: &str) -> Result<Url> {
    base.join(reference).map_err(|source| ScrapeError::InvalidUrl {
        input: reference.to_string(),
        source,
    })
}

pub fn parse_url(input: &str) -> Result<Url> {
    Url::parse(input).map_err(|source| ScrapeError::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

/// Encode `(name, value)` pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form(fields: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields)
        .finish()
}

#[derive(Debug, Clone)]
pub struct SiteClient {
    base_url: Url,
    submit_headers: BTreeMap<String, String>,
    submit_timeout: Duration,
}

impl SiteClient {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        Ok(Self {
            base_url: parse_url(&config.base_url)?,
            submit_headers: config.submit_headers.clone(),
            submit_timeout: config.submit_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET `url` and parse the body as HTML.
    pub fn get_page(&self, url: &Url) -> Result<Page> {
        let body = self.get(url)?;
        Ok(Page::parse(url.clone(), &body))
    }

    /// GET `url` and return the raw body.
    pub fn get(&self, url: &Url) -> Result<Vec<u8>> {
        let transport = |source| ScrapeError::Transport {
            method: "GET",
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;

        let body = perform(&mut easy).map_err(transport)?;
        check_status(&mut easy, "GET", url)?;
        tracing::trace!("GET {} -> {} bytes", url, body.len());
        Ok(body)
    }

    /// POST `fields` url-encoded to `url` with the submit headers and timeout.
    /// Returns the response body.
    pub fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Result<Vec<u8>> {
        let transport = |source| ScrapeError::Transport {
            method: "POST",
            url: url.to_string(),
            source,
        };

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.timeout(self.submit_timeout).map_err(transport)?;
        easy.post(true).map_err(transport)?;
        easy.post_fields_copy(encode_form(fields).as_bytes())
            .map_err(transport)?;

        // Accept-Encoding goes through libcurl so the body is decoded for us.
        let mut list = curl::easy::List::new();
        for (k, v) in &self.submit_headers {
            if k.eq_ignore_ascii_case("accept-encoding") {
                easy.accept_encoding(v).map_err(transport)?;
            } else {
                list.append(&format!("{}: {}", k.trim(), v.trim()))
                    .map_err(transport)?;
            }
        }
        easy.http_headers(list).map_err(transport)?;

        let body = perform(&mut easy).map_err(transport)?;
        check_status(&mut easy, "POST", url)?;
        tracing::trace!("POST {} -> {} bytes", url, body.len());
        Ok(body)
    }
}

fn perform(easy: &mut curl::easy::Easy) -> std::result::Result<Vec<u8>, curl::Error> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    Ok(body)
}

fn check_status(easy: &mut curl::easy::Easy, method: &'static str, url: &Url) -> Result<()> {
    let code = easy.response_code().map_err(|source| ScrapeError::Transport {
        method,
        url: url.to_string(),
        source,
    })?;
    if !(200..300).contains(&code) {
        return Err(ScrapeError::HttpStatus {
            method,
            url: url.to_string(),
            status: code,
        });
    }
    Ok(())
}
