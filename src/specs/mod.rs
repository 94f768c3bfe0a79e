//! # Scraping “specs” module
//!
//! Page-specific reading rules: where the ground truth lives in the HTML and
//! how to turn it into domain values. Networking goes through `core::net`;
//! scheduling, persistence and reporting live elsewhere (`poll`, `store`,
//! `stats`).
//!
//! ## Current specs
//! - `case_status` – the USCIS “my case status” result page, classified from
//!   its first heading.
//!
//! Specs should be testable **offline** against captured markup.
pub mod case_status;

pub use case_status::CaseStatusClient;
