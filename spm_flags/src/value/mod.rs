//! Primitive flag types and their string conversion rules.
//!
//! A registry holds flags of different Rust types side by side, so each
//! value is stored as a [`FlagValue`] tagged with its [`ValueType`]. The
//! parsing rules here are the only place command-line text becomes a typed
//! value.

use std::fmt;

use serde::Serialize;

/// Type tag fixed when a flag is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// `true`/`false`, also spelled `1`/`0`.
    Bool,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 64-bit floating point number.
    Double,
    /// Arbitrary text, including the empty string.
    String,
}

impl ValueType {
    /// Name used in help output and diagnostics.
    ///
    /// # Examples
    ///
    /// ```
    /// use spm_flags::ValueType;
    /// assert_eq!(ValueType::UInt64.name(), "uint64");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Double => "double",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A type-erased flag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// Boolean value.
    Bool(bool),
    /// Signed 32-bit value.
    Int32(i32),
    /// Signed 64-bit value.
    Int64(i64),
    /// Unsigned 32-bit value.
    UInt32(u32),
    /// Unsigned 64-bit value.
    UInt64(u64),
    /// Floating point value.
    Double(f64),
    /// Text value.
    String(String),
}

impl FlagValue {
    /// Returns the type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Int32(_) => ValueType::Int32,
            Self::Int64(_) => ValueType::Int64,
            Self::UInt32(_) => ValueType::UInt32,
            Self::UInt64(_) => ValueType::UInt64,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
        }
    }

    /// Parses `raw` as a value of `value_type`.
    ///
    /// Booleans accept `true`/`false` in any case as well as `1`/`0`.
    /// Integers are base-10, must consume the whole string and must fit the
    /// target width. Doubles use the standard decimal or scientific syntax.
    /// Strings are taken verbatim. Returns `None` when `raw` is malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use spm_flags::{FlagValue, ValueType};
    /// assert_eq!(FlagValue::parse(ValueType::Bool, "FALSE"), Some(FlagValue::Bool(false)));
    /// assert_eq!(FlagValue::parse(ValueType::UInt32, "-1"), None);
    /// ```
    #[must_use]
    pub fn parse(value_type: ValueType, raw: &str) -> Option<Self> {
        match value_type {
            ValueType::Bool => parse_bool(raw).map(Self::Bool),
            ValueType::Int32 => raw.parse().ok().map(Self::Int32),
            ValueType::Int64 => raw.parse().ok().map(Self::Int64),
            ValueType::UInt32 => raw.parse().ok().map(Self::UInt32),
            ValueType::UInt64 => raw.parse().ok().map(Self::UInt64),
            ValueType::Double => raw.parse().ok().map(Self::Double),
            ValueType::String => Some(Self::String(raw.to_owned())),
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int32(value) => write!(f, "{value}"),
            Self::Int64(value) => write!(f, "{value}"),
            Self::UInt32(value) => write!(f, "{value}"),
            Self::UInt64(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
