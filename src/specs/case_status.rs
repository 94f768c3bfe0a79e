// src/specs/case_status.rs
//! Scraping *spec* for the case status page.
//!
//! Purpose:
//! - POST one receipt number to the status endpoint.
//! - Read the **first `<h1>`** of the result page; that heading carries the
//!   case status line ("Case Was Received", "Card Was Mailed To Me", …).
//! - Map it onto [`Status`] via [`Status::from_page_text`].
//!
//! Failure handling: no content, an unusable response, or a page with no
//! heading all classify as `Unknown`. Nothing here returns an error; a bad
//! page costs one id, never the run.

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::{
    config::consts::STATUS_URL,
    core::{net, sanitize},
    poll::StatusSource,
    status::Status,
};

/// Live [`StatusSource`] backed by the USCIS status endpoint.
pub struct CaseStatusClient {
    client: Client,
    url: String,
}

impl CaseStatusClient {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_url(STATUS_URL)
    }

    pub fn with_url(url: impl Into<String>) -> reqwest::Result<Self> {
        Ok(Self { client: net::build_client()?, url: url.into() })
    }
}

impl StatusSource for CaseStatusClient {
    fn fetch(&mut self, receipt: &str) -> Status {
        let form = [
            ("changeLocale", ""),
            ("appReceiptNum", receipt),
            ("initCaseSearch", "CHECK+STATUS"),
        ];
        let page = net::post_form(&self.client, &self.url, &form);
        let status = status_from_page(page.as_deref());
        logd!("{receipt}: {status}");
        status
    }
}

/// Classify a fetched page; `None` means nothing usable came back.
pub fn status_from_page(page: Option<&str>) -> Status {
    match page.and_then(first_heading) {
        Some(heading) => Status::from_page_text(&heading),
        None => Status::Unknown,
    }
}

/// Whitespace-normalized text of the first `<h1>`, if any.
pub fn first_heading(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let h1 = Selector::parse("h1").ok()?;
    let node = doc.select(&h1).next()?;
    let text: String = node.text().collect();
    Some(sanitize::normalize_ws(&sanitize::fold_nbsp(&text)))
}
