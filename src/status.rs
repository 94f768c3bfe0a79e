// src/status.rs
//! Case status taxonomy and the two substring classifiers.
//!
//! Both classifiers are ordered first-match-wins scans. The order is part of
//! the contract: a token or page heading that happens to contain more than
//! one known phrase resolves to the earliest entry in the table.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Unknown,
    Received,
    Approved,
    NewCard,
    Mailed,
    UspsPicked,
    Delivered,
}

/// Snapshot tokens, in match priority.
const CSV_TOKENS: [(&str, Status); 7] = [
    ("RECEIVED", Status::Received),
    ("APPROVED", Status::Approved),
    ("NEW_CARD", Status::NewCard),
    ("MAILED", Status::Mailed),
    ("USPS_PICKED", Status::UspsPicked),
    ("DELIVERED", Status::Delivered),
    ("UNKNOWN", Status::Unknown),
];

/// Page heading phrases, in match priority.
const PAGE_PHRASES: [(&str, Status); 6] = [
    ("Case Was Received", Status::Received),
    ("Approved", Status::Approved),
    ("New Card Is Being Produced", Status::NewCard),
    ("Card Was Mailed To Me", Status::Mailed),
    ("Card Was Picked Up", Status::UspsPicked),
    ("Card Was Delivered", Status::Delivered),
];

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Unknown,
        Status::Received,
        Status::Approved,
        Status::NewCard,
        Status::Mailed,
        Status::UspsPicked,
        Status::Delivered,
    ];

    /// The token written to snapshot files.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Unknown => "UNKNOWN",
            Status::Received => "RECEIVED",
            Status::Approved => "APPROVED",
            Status::NewCard => "NEW_CARD",
            Status::Mailed => "MAILED",
            Status::UspsPicked => "USPS_PICKED",
            Status::Delivered => "DELIVERED",
        }
    }

    /// Classify a serialized status cell. Anything unrecognised is `Unknown`.
    pub fn from_csv_token(token: &str) -> Status {
        first_match(&CSV_TOKENS, token)
    }

    /// Classify the heading text scraped from a status page.
    pub fn from_page_text(text: &str) -> Status {
        first_match(&PAGE_PHRASES, text)
    }
}

fn first_match(table: &[(&str, Status)], input: &str) -> Status {
    table
        .iter()
        .find(|(needle, _)| input.contains(needle))
        .map(|&(_, status)| status)
        .unwrap_or(Status::Unknown)
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so callers can use width/alignment specs
        f.pad(self.as_str())
    }
}
