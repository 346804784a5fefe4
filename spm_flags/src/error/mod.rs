//! Error types produced while declaring flags and parsing command lines.

mod types;

pub use types::FlagError;
