// src/lib.rs

#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod specs;

pub mod compare;
pub mod csv;
pub mod error;
pub mod poll;
pub mod progress;
pub mod stats;
pub mod status;
pub mod store;

pub use error::SnapshotError;
pub use status::Status;
pub use store::Snapshot;
