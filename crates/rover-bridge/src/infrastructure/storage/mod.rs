//! Storage infrastructure: configuration file persistence.
//!
//! A thin adapter between the bridge and the file system.  The `config`
//! sub-module handles:
//!
//! - Reading the TOML configuration file from the platform-appropriate
//!   directory (or an explicitly supplied path).
//! - Writing a default file for `--write-default-config`.
//! - Providing shipped defaults when no file exists yet (first run).

pub mod config;
