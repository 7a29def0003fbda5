// src/config/mod.rs
pub mod consts;
pub mod lookup;
pub mod options;
pub mod vocab;
