//! Tests for `FileConfigLoader`.
//!
//! - `discovery_tests`: search order across repository, user dir and defaults
//! - `parsing_tests`: TOML parsing, normalisation and validation

mod mock_fs;

mod discovery_tests;
