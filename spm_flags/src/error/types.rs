//! Primary error enum for flag declaration and command-line parsing.

use thiserror::Error;

use crate::value::ValueType;

/// Errors that can occur while declaring flags or parsing `argv`.
///
/// Every variant is fatal for a host program: a malformed command line is
/// never something the program keeps running after. The parser returns these
/// values instead of terminating the process so callers decide how to exit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// A flag was declared twice under the same name.
    #[error("flag '{name}' is declared more than once")]
    DuplicateFlagName {
        /// Name shared by both declarations.
        name: String,
    },

    /// A flag token named a flag that is not registered.
    #[error("unknown/invalid flag '{name}'")]
    UnknownFlag {
        /// Name as it appeared on the command line, without dashes.
        name: String,
    },

    /// A value-consuming flag was the last token on the command line.
    #[error("flag '{name}' requires a value")]
    MissingValue {
        /// Name of the flag missing its value.
        name: String,
    },

    /// A string could not be converted to the flag's declared type.
    #[error("invalid value '{value}' for {expected} flag '{name}'")]
    InvalidValueFormat {
        /// Name of the flag being assigned.
        name: String,
        /// Raw value that failed to parse.
        value: String,
        /// Type the flag was declared with.
        expected: ValueType,
    },
}

impl FlagError {
    /// Returns the flag name the error refers to.
    ///
    /// # Examples
    ///
    /// ```
    /// use spm_flags::FlagError;
    /// let err = FlagError::MissingValue { name: "vocab_size".into() };
    /// assert_eq!(err.flag_name(), "vocab_size");
    /// ```
    #[must_use]
    pub fn flag_name(&self) -> &str {
        match self {
            Self::DuplicateFlagName { name }
            | Self::UnknownFlag { name }
            | Self::MissingValue { name }
            | Self::InvalidValueFormat { name, .. } => name,
        }
    }
}
