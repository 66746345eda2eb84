//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration file from the
//! platform config directory (or an explicit path), falls back to defaults
//! on first run, and writes the effective configuration back on request.

pub mod config;
