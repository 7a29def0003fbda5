// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod engine;
pub mod model;
pub mod specs;

pub mod file;
pub mod progress;
pub mod scrape;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod log;

pub use engine::{extract_from_str, extract_monster, ExtractError};
pub use model::MonsterRecord;
