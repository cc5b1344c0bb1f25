//! Embedded scripting layer: the rhai host (global execution lock, hook
//! binding, error reporting) and the script-backed controller adapter.

pub mod controller;
pub mod host;
