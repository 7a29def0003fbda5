// src/engine/mod.rs
//! Extraction engine: one parsed monster page in, one validated record out.
//!
//! ```text
//! Html → locate::find_sections → table::NormalizedTable / extract_tabs
//!      → fields::parse (registry) → validate → assemble::extract_monster
//! ```
//!
//! Nothing in here touches the network or the filesystem.
pub mod assemble;
pub mod error;
pub mod fields;
pub mod locate;
pub mod matcher;
pub mod table;
pub mod validate;

pub use assemble::{extract_from_str, extract_monster};
pub use error::{ExtractError, TableError, ValidationError};
