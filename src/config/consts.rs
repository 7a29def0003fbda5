// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://game8.co/games/Monster-Hunter-Rise/archives/";
pub const LIST_PAGE_ID: u32 = 336_509;
pub const USER_AGENT: &str = "mhr_scrape/0.1";
pub const TIMEOUT_SECS: u64 = 15;

// Markup conventions
pub const TAB_GROUP_CLASS: &str = "a-tabContainer";
pub const TAB_INDEX_ATTR: &str = "data-tab-index";
pub const TAB_PANEL_ATTR: &str = "data-tab-panel";

/// Glyphs the site puts in cells that have no applicable value.
pub const PLACEHOLDERS: &[&str] = &["-", "–", "—", "ー", "―", "N/A", "n/a", "None"];

/// Icon-style effectiveness ratings in the status table.
pub const RATING_FILLED: char = '★';
pub const RATING_EMPTY: char = '☆';
pub const RATING_NONE: &[char] = &['✕', '×', '✖'];

// Defaults
pub const DEFAULT_THREAT_LEVEL: i32 = 0;

// Concurrency
pub const WORKERS: usize = 3;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 100; // extra 0..100 ms
