// src/core/net.rs

// Blocking HTTPS form POST. Every failure is logged and collapses to `None`;
// callers treat missing content as an unclassifiable page.

use std::time::Duration;

use reqwest::{
    blocking::{Client, Response},
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};

use crate::config::consts::{ACCEPT, ACCEPT_LANGUAGE, REFERER, REQUEST_TIMEOUT_SECS, USER_AGENT};

/// Client preloaded with the browser-like header set the status site expects.
pub fn build_client() -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::REFERER, HeaderValue::from_static(REFERER));
    headers.insert(header::DNT, HeaderValue::from_static("1"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
}

/// POST `form` to `url`. Returns the body only for a 200 response that looks like HTML.
pub fn post_form(client: &Client, url: &str, form: &[(&str, &str)]) -> Option<String> {
    let resp = match client.post(url).form(form).send() {
        Ok(r) => r,
        Err(e) => {
            loge!("Error during requests to {url} : {e}");
            return None;
        }
    };

    if !is_good_response(&resp) {
        loge!("Unusable response from {url}: {}", resp.status());
        return None;
    }

    match resp.text() {
        Ok(body) => Some(body),
        Err(e) => {
            loge!("Error reading body from {url} : {e}");
            None
        }
    }
}

fn is_good_response(resp: &Response) -> bool {
    let html = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_html_content_type);
    resp.status() == StatusCode::OK && html
}

pub fn is_html_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
