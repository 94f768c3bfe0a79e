// src/core/sanitize.rs

/// Collapse runs of whitespace into a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() { out.push(' '); }
        out.push_str(word);
    }
    out
}

/// `&nbsp;` survives HTML parsing as U+00A0; fold it to a plain space.
pub fn fold_nbsp(s: &str) -> String {
    s.replace('\u{a0}', " ")
}
