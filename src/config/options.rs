// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageSelector {
    /// Every monster linked from the listing page.
    All,
    Ids(Vec<u32>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub pages: PageSelector,
    pub workers: usize,
    pub pause_ms: u64,
    pub jitter_ms: u64,
    /// `None` → stdout
    pub out: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            pages: PageSelector::All,
            workers: WORKERS,
            pause_ms: REQUEST_PAUSE_MS,
            jitter_ms: JITTER_MS,
            out: None,
            pretty: false,
        }
    }
}

impl ScrapeOptions {
    /// Worker count clamped to `1..=jobs`.
    pub fn worker_count(&self, jobs: usize) -> usize {
        self.workers.min(jobs).max(1)
    }

    pub fn pause_for(&self, id: u32) -> u64 {
        let jitter = if self.jitter_ms == 0 { 0 } else { (id as u64) % self.jitter_ms };
        self.pause_ms + jitter
    }
}
