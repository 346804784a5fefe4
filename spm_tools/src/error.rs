//! Error types for the SentencePiece front ends.
//!
//! `ToolError` wraps flag-layer failures alongside the settings checks each
//! program performs after parsing, so `main` can hand a single error type to
//! `color-eyre`.

use std::io;
use std::path::PathBuf;

use spm_flags::FlagError;
use thiserror::Error;

/// Errors raised while resolving or reporting a tool's settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// A flag declaration or assignment failed.
    #[error(transparent)]
    Flags(#[from] FlagError),
    /// `spm_normalize` was given no way to build a normalizer.
    #[error("Sets --model, normalization_rule_tsv, or normalization_rule_name flag.")]
    MissingNormalizerSource,
    /// A flag that must be non-empty was left unset.
    #[error("--{flag} must be set")]
    MissingRequired {
        /// Name of the flag, without dashes.
        flag: &'static str,
    },
    /// `--model_type` named an unsupported algorithm.
    #[error("unknown model type '{value}': expected unigram, bpe, word or char")]
    UnknownModelType {
        /// The rejected value.
        value: String,
    },
    /// A file named by a `*_file` flag could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing a report to standard output or standard error failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Settings could not be rendered as JSON.
    #[error("failed to render settings: {0}")]
    Render(#[from] serde_json::Error),
    /// The logging subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Convenience alias for results returned by the tools.
pub type Result<T, E = ToolError> = std::result::Result<T, E>;
