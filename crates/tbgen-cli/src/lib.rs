//! tbgen: command-line front end for nearest-point test bench generation.
//!
//! The binary is a thin wrapper; parsing, configuration and the run drivers
//! live here so they can be exercised from tests.

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Command-line flags and parse-error handling.
pub mod cli;
/// Defaults, TOML profile and flag merging.
pub mod config;
/// Generation and manifest verification.
pub mod run;
