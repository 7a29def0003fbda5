// src/specs/monster_list.rs
//! Reader for the monster listing page.
//!
//! Purpose:
//! - Discover `(page_id, monster_name)` pairs from the anchors in the listing
//!   tables (`<a href=".../archives/<id>">Name</a>`).
//!
//! Rules:
//! - Only anchors inside a `<table>` count; navigation menus and sidebars link
//!   to the same archive ids under other names.
//! - First occurrence of an id wins; document order is kept.
//! - Anchors with no visible text (icon-only links) are skipped.

use std::collections::HashSet;
use std::sync::LazyLock;

use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::debug;

use super::PageRef;
use crate::config::consts::LIST_PAGE_ID;
use crate::core::html::normalize;
use crate::core::net::{self, FetchError};

static TABLE_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("table a[href]").expect("BUG: hardcoded selector 'table a[href]' is statically valid")
});

pub fn fetch(client: &Client) -> Result<Vec<PageRef>, FetchError> {
    let markup = net::http_get(client, &net::page_url(LIST_PAGE_ID))?;
    let doc = Html::parse_document(&markup);
    let pages = parse_list(&doc);
    debug!(count = pages.len(), "monster list parsed");
    Ok(pages)
}

pub fn parse_list(doc: &Html) -> Vec<PageRef> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for a in doc.select(&TABLE_LINKS) {
        let Some(id) = a.value().attr("href").and_then(archive_id) else { continue };
        let name = normalize(a).replace('\n', " ");
        if name.is_empty() || id == LIST_PAGE_ID {
            continue;
        }
        if seen.insert(id) {
            out.push(PageRef::new(id, name));
        }
    }
    out
}

/// `.../archives/123456` (optionally followed by `/`, `?` or `#`) → `123456`
fn archive_id(href: &str) -> Option<u32> {
    let (_, tail) = href.rsplit_once("/archives/")?;
    let digits: &str = tail
        .find(|c: char| !c.is_ascii_digit())
        .map_or(tail, |end| &tail[..end]);
    digits.parse().ok()
}
