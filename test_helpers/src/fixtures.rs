//! Flag tables and command lines used by integration tests.
//!
//! # Examples
//!
//! ```
//! use test_helpers::{TestFlags, argv, program_info};
//!
//! let mut flags = TestFlags::declare()?;
//! flags.registry.parse_command_line(&program_info(), argv(&["program", "--int32_f=3"]))?;
//! assert_eq!(*flags.int32_f.value(&flags.registry), 3);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use spm_flags::{Flag, FlagRegistry, ProgramInfo};

/// Registry with one flag of each commonly used type.
///
/// Defaults match the values the flag runtime has always been tested with:
/// `int32_f = 10`, `bool_f = false`, `int64_f = i64::MAX`,
/// `uint64_f = u64::MAX`, `double_f = 40.0` and `string_f = "str"`.
#[derive(Debug)]
pub struct TestFlags {
    /// Registry the flags below were declared on.
    pub registry: FlagRegistry,
    /// `int32` flag.
    pub int32_f: Flag<i32>,
    /// `bool` flag.
    pub bool_f: Flag<bool>,
    /// `int64` flag.
    pub int64_f: Flag<i64>,
    /// `uint64` flag.
    pub uint64_f: Flag<u64>,
    /// `double` flag.
    pub double_f: Flag<f64>,
    /// `string` flag.
    pub string_f: Flag<String>,
}

impl TestFlags {
    /// Declares the test table on a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns an error if any declaration collides with an existing flag.
    pub fn declare() -> Result<Self> {
        let mut registry = FlagRegistry::new();
        let int32_f = Flag::new(&mut registry, "int32_f", 10_i32, "int32_flags")
            .context("declare int32_f")?;
        let bool_f =
            Flag::new(&mut registry, "bool_f", false, "bool_flags").context("declare bool_f")?;
        let int64_f = Flag::new(&mut registry, "int64_f", i64::MAX, "int64_flags")
            .context("declare int64_f")?;
        let uint64_f = Flag::new(&mut registry, "uint64_f", u64::MAX, "uint64_flags")
            .context("declare uint64_f")?;
        let double_f = Flag::new(&mut registry, "double_f", 40.0_f64, "double_flags")
            .context("declare double_f")?;
        let string_f = Flag::new(&mut registry, "string_f", String::from("str"), "string_flags")
            .context("declare string_f")?;
        Ok(Self {
            registry,
            int32_f,
            bool_f,
            int64_f,
            uint64_f,
            double_f,
            string_f,
        })
    }
}

/// Builds an owned `argv` from string literals.
#[must_use]
pub fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|&token| token.to_owned()).collect()
}

/// Program metadata used by tests that inspect help or version output.
#[must_use]
pub fn program_info() -> ProgramInfo {
    ProgramInfo::new("sentencepiece", "0.2.0")
}
