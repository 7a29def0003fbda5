// src/specs/monster.rs
//! Reader for a single monster page.
//!
//! The engine does the extraction; this file only binds it to the page URL and
//! tags the failure with the stage it came from.

use reqwest::blocking::Client;
use scraper::Html;
use tracing::debug;

use super::PageRef;
use crate::core::net::{self, FetchError};
use crate::engine::{self, ExtractError};
use crate::model::MonsterRecord;

/// Why one page produced no record.
#[derive(Debug, thiserror::Error)]
pub enum FailureKind {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl FailureKind {
    /// Stable kind name for reports.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Fetch(_) => "fetch",
            FailureKind::Extract(e) => e.label(),
        }
    }
}

/// Run the engine on already-downloaded markup.
pub fn extract(page: &PageRef, markup: &str) -> Result<MonsterRecord, ExtractError> {
    let doc = Html::parse_document(markup);
    let record = engine::extract_monster(&doc)?;
    debug!(id = page.id, name = %record.info.name, "page extracted");
    Ok(record)
}

/// Download the page's markup. Extraction runs separately, on the worker.
pub fn fetch(client: &Client, page: &PageRef) -> Result<String, FetchError> {
    net::http_get(client, &net::page_url(page.id))
}
