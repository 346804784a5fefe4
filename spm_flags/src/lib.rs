//! Typed command-line flags backed by an explicit registry.
//!
//! Each program builds a [`FlagRegistry`], declares its flags with
//! [`Flag::new`], parses `argv` once and reads the final values through the
//! typed [`Flag`] handles. Flags hold one of seven primitive types (see
//! [`ValueType`]); the registry always carries the built-in `help` and
//! `version` flags, which end parsing with a [`Termination`] instead of
//! assigning a value.
//!
//! The parser never exits the process. Host programs turn a
//! [`ParseOutcome::Terminate`] into an exit code and keep a
//! [`ScopedFlags`] guard alive for the duration of `main`, so flag state is
//! reset on every exit path.
//!
//! ```rust
//! use std::process::ExitCode;
//! use spm_flags::{Flag, FlagRegistry, ParseOutcome, ProgramInfo};
//!
//! fn run(argv: &[&str]) -> Result<ExitCode, spm_flags::FlagError> {
//!     let mut registry = FlagRegistry::new();
//!     let output = Flag::new(&mut registry, "output", String::new(), "Output filename")?;
//!     let info = ProgramInfo::new("sentencepiece", "0.2.0");
//!
//!     let mut flags = registry.scoped();
//!     match flags.parse_or_terminate(&info, argv.iter().copied()) {
//!         ParseOutcome::Terminate(termination) => Ok(termination.exit_code()),
//!         ParseOutcome::Continue(positionals) => {
//!             assert_eq!(output.value(&flags), "out.txt");
//!             assert_eq!(positionals.args(), ["in.txt"]);
//!             Ok(ExitCode::SUCCESS)
//!         }
//!     }
//! }
//!
//! run(&["spm_normalize", "--output=out.txt", "in.txt"])?;
//! # Ok::<(), spm_flags::FlagError>(())
//! ```

mod builtins;
mod cleanup;
mod error;
mod flag;
mod outcome;
mod parser;
mod registry;
mod snapshot;
mod value;

pub use builtins::{HELP, ProgramInfo, VERSION, usage_text, version_text};
pub use cleanup::ScopedFlags;
pub use error::FlagError;
pub use flag::{Flag, FlagKind};
pub use outcome::{OutputStream, ParseOutcome, Positionals, Termination, TerminationReason};
pub use registry::{FlagDescriptor, FlagId, FlagRegistry};
pub use snapshot::FlagInfo;
pub use value::{FlagValue, ValueType};
