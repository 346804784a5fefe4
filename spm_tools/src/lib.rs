//! Command-line front ends for SentencePiece built on [`spm_flags`].
//!
//! Each tool declares a typed flag table, parses `argv` through the shared
//! [`runner`], and reports the settings it resolved as JSON on standard
//! output. The tokenizer and normalizer engines that consume these settings
//! live outside this crate.
//!
//! ```rust
//! use spm_tools::normalize::{NormalizeFlags, NormalizerSource};
//! use spm_tools::runner::{Invocation, invoke};
//!
//! let outcome = invoke::<NormalizeFlags, _, _>(["spm_normalize", "--normalization_rule_name=nfkc"])?;
//! let Invocation::Resolved(settings) = outcome else { panic!("unexpected termination") };
//! assert_eq!(settings.source, NormalizerSource::RuleName("nfkc".into()));
//! # Ok::<(), spm_tools::ToolError>(())
//! ```

pub mod csv;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod runner;
pub mod train;

pub use error::{Result, ToolError};
