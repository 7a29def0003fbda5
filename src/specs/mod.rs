// src/specs/mod.rs
//! # Page readers
//!
//! Each reader owns one kind of remote page and knows *where the data lives in
//! its HTML*. The heavy lifting for monster pages is in `engine`; the readers
//! here bind it to URLs and to the fetch collaborator.
//!
//! ## What lives here
//! - `monster_list` – page-id discovery from the monster listing page.
//! - `monster` – fetch one monster page and run the extraction engine on it.
//!
//! ## What does **not** live here
//! - Worker pools, pacing, progress reporting (`scrape`).
//! - Output formatting (`file`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_monsters → specs::monster_list::fetch()
//!                                ↘ scrape::collect_with(pages, …, specs::monster::fetch)
//!                                      ↘ specs::monster::extract → engine::extract_monster
//! ```
//!
//! ## Testing notes
//! Readers are testable offline: every `fetch*` has a `parse*`/`extract*`
//! counterpart that takes already-downloaded markup.
pub mod monster;
pub mod monster_list;

/// One monster page, as discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRef {
    pub id: u32,
    pub name: String,
}

impl PageRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// Placeholder name for ids given on the command line.
    pub fn bare(id: u32) -> Self {
        Self { id, name: format!("#{id}") }
    }
}
