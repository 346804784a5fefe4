//! Shared driver for the command-line front ends.
//!
//! Every tool follows the same life cycle: declare a flag table, parse
//! `argv` once inside a [`ScopedFlags`](spm_flags::ScopedFlags) guard,
//! resolve the parsed flags into a settings value and report it.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;

use serde::Serialize;
use spm_flags::{FlagError, FlagRegistry, ParseOutcome, Positionals, ProgramInfo, Termination};
use tracing::{debug, info, warn};

use crate::error::Result;

/// Package name printed by `--version` and the `--help` banner.
pub const PACKAGE: &str = "sentencepiece";

/// Identity shared by every tool in this crate.
#[must_use]
pub fn program_info() -> ProgramInfo {
    ProgramInfo::new(PACKAGE, env!("CARGO_PKG_VERSION"))
}

/// A typed flag table plus the rules that turn it into settings.
pub trait FlagTable: Sized {
    /// Resolved configuration produced after a successful parse.
    type Settings: Serialize;

    /// Declares the table's flags on `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlagName`] if a name is already taken.
    fn declare(registry: &mut FlagRegistry) -> Result<Self, FlagError>;

    /// Reads the parsed flags and positionals into settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`](crate::ToolError) describing the first
    /// setting that cannot be resolved.
    fn resolve(&self, registry: &FlagRegistry, positionals: &Positionals)
    -> Result<Self::Settings>;
}

/// What a tool invocation produced.
#[derive(Debug)]
pub enum Invocation<S> {
    /// The command line was accepted and resolved.
    Resolved(S),
    /// Parsing stopped early with text to print.
    Terminated(Termination),
}

/// Declares `T`, parses `argv` and resolves the settings.
///
/// The registry is reset before this returns, whatever the outcome.
///
/// # Errors
///
/// Returns an error when the table cannot be declared or the parsed flags
/// fail [`FlagTable::resolve`]. Rejected command lines are not errors; they
/// come back as [`Invocation::Terminated`].
pub fn invoke<T, I, S>(argv: I) -> Result<Invocation<T::Settings>>
where
    T: FlagTable,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut registry = FlagRegistry::new();
    let table = T::declare(&mut registry)?;
    let mut flags = registry.scoped();
    match flags.parse_or_terminate(&program_info(), argv) {
        ParseOutcome::Terminate(termination) => {
            debug!(reason = ?termination.reason(), "parse terminated");
            Ok(Invocation::Terminated(termination))
        }
        ParseOutcome::Continue(positionals) => {
            let overridden = flags
                .snapshot()
                .iter()
                .filter(|flag| flag.is_overridden())
                .count();
            info!(
                program = positionals.program(),
                overridden,
                positionals = positionals.args().len(),
                "resolving settings"
            );
            table.resolve(&flags, &positionals).map(Invocation::Resolved)
        }
    }
}

/// Writes `settings` to `out` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_settings<W: Write, S: Serialize>(out: &mut W, settings: &S) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, settings)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Runs tool `T` against `argv` and reports the result on the standard
/// streams.
///
/// # Errors
///
/// Propagates errors from [`invoke`] and from writing the report.
pub fn run<T, I, S>(argv: I) -> Result<ExitCode>
where
    T: FlagTable,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match invoke::<T, _, _>(argv)? {
        Invocation::Terminated(termination) => Ok(termination.report()?),
        Invocation::Resolved(settings) => {
            write_settings(&mut io::stdout().lock(), &settings)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Converts raw arguments to strings, stopping at the first one that is
/// not valid UTF-8.
///
/// # Errors
///
/// Returns a failure [`Termination`] naming the offending argument.
pub fn utf8_args<I>(argv: I) -> Result<Vec<String>, Termination>
where
    I: IntoIterator<Item = OsString>,
{
    argv.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| {
                warn!(argument = %raw.to_string_lossy(), "rejected non UTF-8 argument");
                Termination::invalid_encoding(&raw)
            })
        })
        .collect()
}

/// Runs tool `T` against raw process arguments.
///
/// An argument that is not valid UTF-8 is rejected like any other bad
/// command line: a diagnostic on standard error and exit status 1.
///
/// # Errors
///
/// Propagates errors from [`run`] and from writing the diagnostic.
pub fn run_os<T, I>(argv: I) -> Result<ExitCode>
where
    T: FlagTable,
    I: IntoIterator<Item = OsString>,
{
    match utf8_args(argv) {
        Ok(args) => run::<T, _, _>(args),
        Err(termination) => Ok(termination.report()?),
    }
}
