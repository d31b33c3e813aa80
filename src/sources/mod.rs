//! Rust module containing the included configuration sources.
//!
//! - [`memory`] keeps sections in memory. Useful for defaults and tests.
//! - [`tomlfile`] loads a configuration document written in TOML.
//! - [`chain`] asks several sources in order.
pub mod memory;
pub mod tomlfile;
pub mod chain;
