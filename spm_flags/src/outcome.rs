//! What a parse asks the host program to do next.
//!
//! The parser never exits the process itself. It either hands back the
//! positional arguments or a [`Termination`] carrying the text to print and
//! the status to exit with, and the host decides how to perform the exit.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::error::FlagError;

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Keep running with the compacted arguments.
    Continue(Positionals),
    /// Print a message and exit.
    Terminate(Termination),
}

impl ParseOutcome {
    /// Returns `true` when the outcome is a `--help` or `--version` request.
    ///
    /// Hosts that log every termination can use this to keep display
    /// requests out of their error reporting.
    #[must_use]
    pub const fn is_display_request(&self) -> bool {
        matches!(
            self,
            Self::Terminate(Termination {
                reason: TerminationReason::Help | TerminationReason::Version,
                ..
            })
        )
    }
}

/// Program name plus the non-flag arguments, in their original order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Positionals {
    program: String,
    args: Vec<String>,
}

impl Positionals {
    pub(crate) const fn new(program: String, args: Vec<String>) -> Self {
        Self { program, args }
    }

    /// The original `argv[0]`.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Positional arguments, without the program name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Length of the compacted `argv`, program name included.
    #[must_use]
    pub const fn argc(&self) -> usize {
        self.args.len() + 1
    }

    /// The compacted `argv`: program name followed by the positionals.
    #[must_use]
    pub fn into_argv(self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.argc());
        argv.push(self.program);
        argv.extend(self.args);
        argv
    }
}

/// Why the parser asked the host to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// `--help` was given.
    Help,
    /// `--version` was given.
    Version,
    /// The command line was rejected.
    Failure,
}

/// Stream a termination message belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// A request to print `message` and exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Termination {
    reason: TerminationReason,
    message: String,
}

impl Termination {
    pub(crate) const fn new(reason: TerminationReason, message: String) -> Self {
        Self { reason, message }
    }

    /// Builds the failure termination for a rejected command line.
    ///
    /// `usage` is appended after a blank line for unknown flags, so the user
    /// sees which flags exist.
    #[must_use]
    pub fn failure(err: &FlagError, usage: &str) -> Self {
        let message = match err {
            FlagError::UnknownFlag { .. } => format!("ERROR: {err}\n\n{usage}"),
            _ => format!("ERROR: {err}\n"),
        };
        Self::new(TerminationReason::Failure, message)
    }

    /// Builds the failure termination for an argument that is not valid
    /// UTF-8. Flags only hold text, so such an argument cannot be taken
    /// verbatim.
    #[must_use]
    pub fn invalid_encoding(argument: &OsStr) -> Self {
        let message = format!(
            "ERROR: argument '{}' is not valid UTF-8\n",
            argument.to_string_lossy()
        );
        Self::new(TerminationReason::Failure, message)
    }

    /// Why the parser stopped.
    #[must_use]
    pub const fn reason(&self) -> TerminationReason {
        self.reason
    }

    /// Text to print before exiting.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Exit status: `0` for help and version, `1` for failures.
    #[must_use]
    pub const fn status(&self) -> u8 {
        match self.reason {
            TerminationReason::Help | TerminationReason::Version => 0,
            TerminationReason::Failure => 1,
        }
    }

    /// Stream the message is written to by [`Termination::report`].
    #[must_use]
    pub const fn stream(&self) -> OutputStream {
        match self.reason {
            TerminationReason::Help | TerminationReason::Version => OutputStream::Stdout,
            TerminationReason::Failure => OutputStream::Stderr,
        }
    }

    /// Exit code for returning from `main`.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }

    /// Writes the message to `out`.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when writing or flushing fails.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.message.as_bytes())?;
        out.flush()
    }

    /// Prints the message on its stream and returns the exit code.
    ///
    /// Returning the code from `main`, rather than exiting in place, lets
    /// scoped guards such as [`ScopedFlags`](crate::ScopedFlags) run.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the stream cannot be written.
    pub fn report(&self) -> io::Result<ExitCode> {
        match self.stream() {
            OutputStream::Stdout => self.write_to(&mut io::stdout().lock())?,
            OutputStream::Stderr => self.write_to(&mut io::stderr().lock())?,
        }
        Ok(self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::{OutputStream, Termination, TerminationReason};

    #[test]
    fn invalid_encoding_is_a_failure_on_stderr() {
        let termination = Termination::invalid_encoding(&OsString::from("a.txt"));
        assert_eq!(termination.reason(), TerminationReason::Failure);
        assert_eq!(termination.status(), 1);
        assert_eq!(termination.stream(), OutputStream::Stderr);
        assert_eq!(
            termination.message(),
            "ERROR: argument 'a.txt' is not valid UTF-8\n"
        );
    }
}
