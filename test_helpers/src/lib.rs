//! Test helpers shared across crates.
//!
//! This crate provides the canonical six-flag test table, `argv` builders
//! and helpers for picking apart rendered help text.

pub mod fixtures;
pub mod text;

pub use fixtures::{TestFlags, argv, program_info};
