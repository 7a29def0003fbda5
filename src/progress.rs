// src/progress.rs
/// Lightweight progress reporting used by long-running operations (batch scrape).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of pages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page produced a record.
    fn item_done(&mut self, _id: u32, _name: &str) {}

    /// One page failed; the batch carries on.
    fn item_failed(&mut self, _id: u32, _name: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
