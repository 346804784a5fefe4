//! Per-flag metadata and value storage.

use crate::error::FlagError;
use crate::value::{FlagValue, ValueType};

/// Registry entry for one declared flag.
///
/// The name, help text, type and default are fixed at declaration; only the
/// current value changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagDescriptor {
    name: String,
    help: String,
    default_value: FlagValue,
    current_value: FlagValue,
}

impl FlagDescriptor {
    /// Creates a descriptor whose current value starts at `default_value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spm_flags::{FlagDescriptor, FlagValue, ValueType};
    /// let descriptor = FlagDescriptor::new("vocab_size", "vocabulary size", FlagValue::Int32(8000));
    /// assert_eq!(descriptor.value_type(), ValueType::Int32);
    /// assert_eq!(descriptor.current_value(), descriptor.default_value());
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, help: impl Into<String>, default_value: FlagValue) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            current_value: default_value.clone(),
            default_value,
        }
    }

    /// Flag name, without dashes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description shown by `--help`.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Type the flag was declared with.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        self.default_value.value_type()
    }

    /// Value captured at declaration.
    #[must_use]
    pub const fn default_value(&self) -> &FlagValue {
        &self.default_value
    }

    /// Value after any assignments.
    #[must_use]
    pub const fn current_value(&self) -> &FlagValue {
        &self.current_value
    }

    /// Parses `raw` according to the flag's type and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidValueFormat`] when `raw` is not a valid
    /// value of the flag's type; the current value is left untouched.
    pub fn set_value_as_str(&mut self, raw: &str) -> Result<(), FlagError> {
        let expected = self.value_type();
        let parsed =
            FlagValue::parse(expected, raw).ok_or_else(|| FlagError::InvalidValueFormat {
                name: self.name.clone(),
                value: raw.to_owned(),
                expected,
            })?;
        self.assign(parsed);
        Ok(())
    }

    /// Stores an already-typed value. Callers guarantee the type matches.
    pub(crate) fn assign(&mut self, value: FlagValue) {
        tracing::trace!(flag = %self.name, value = %value, "assigned flag value");
        self.current_value = value;
    }

    pub(crate) fn reset(&mut self) {
        self.current_value.clone_from(&self.default_value);
    }
}
