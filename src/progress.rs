// src/progress.rs
/// Lightweight progress reporting for the poll loop.
/// The CLI implements this with a progress bar; tests pass `NullProgress`.
pub trait Progress {
    /// Called at the start with the total number of ids.
    fn begin(&mut self, _total: usize) {}

    /// Called after each id has been fetched and recorded.
    fn item_done(&mut self, _id: u32, _receipt: &str) {}

    /// Called at the end, completed or interrupted.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
