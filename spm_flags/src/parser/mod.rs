//! Single-pass `argv` parser.
//!
//! Tokens are read left to right with one token of lookahead. Flag tokens
//! update the registry, positional tokens are collected in order, and the
//! built-in flags stop the pass with a [`Termination`].

mod token;

use tracing::{debug, warn};

use crate::builtins::{Builtin, ProgramInfo, usage_text};
use crate::error::FlagError;
use crate::outcome::{ParseOutcome, Positionals, Termination};
use crate::registry::FlagRegistry;
use crate::value::{FlagValue, ValueType};
use token::{Token, classify};

impl FlagRegistry {
    /// Parses `argv` (program name first) against the registered flags.
    ///
    /// - `--name=value` and `-name=value` assign `value`.
    /// - `--name value` consumes the next token as the value, even if it
    ///   looks like a flag. Bare boolean flags are set to `true` instead and
    ///   consume nothing.
    /// - Later occurrences of a flag overwrite earlier ones.
    /// - `--help` and `--version` stop parsing and return
    ///   [`ParseOutcome::Terminate`] with the text to print.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnknownFlag`], [`FlagError::MissingValue`] or
    /// [`FlagError::InvalidValueFormat`]. Values assigned before the failing
    /// token stay assigned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spm_flags::{Flag, FlagRegistry, ParseOutcome, ProgramInfo};
    ///
    /// let mut registry = FlagRegistry::new();
    /// let size = Flag::new(&mut registry, "vocab_size", 8000_i32, "vocabulary size")?;
    /// let info = ProgramInfo::new("sentencepiece", "0.2.0");
    ///
    /// let outcome = registry.parse_command_line(&info, ["spm_train", "--vocab_size", "1000", "corpus.txt"])?;
    /// let ParseOutcome::Continue(positionals) = outcome else { panic!("unexpected termination") };
    /// assert_eq!(*size.value(&registry), 1000);
    /// assert_eq!(positionals.into_argv(), ["spm_train", "corpus.txt"]);
    /// # Ok::<(), spm_flags::FlagError>(())
    /// ```
    pub fn parse_command_line<I, S>(
        &mut self,
        info: &ProgramInfo,
        argv: I,
    ) -> Result<ParseOutcome, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = argv.into_iter().map(Into::<String>::into);
        let program = tokens.next().unwrap_or_default();
        let mut args = Vec::new();

        while let Some(raw) = tokens.next() {
            let (name, inline_value) = match classify(&raw) {
                Token::Positional => {
                    args.push(raw);
                    continue;
                }
                Token::Flag { name, inline_value } => (name, inline_value),
            };

            if let Some(builtin) = Builtin::from_name(&name) {
                debug!(flag = %name, "built-in flag requested termination");
                return Ok(ParseOutcome::Terminate(
                    builtin.terminate(self, &program, info),
                ));
            }
            let Some(descriptor) = self.lookup_mut(&name) else {
                return Err(FlagError::UnknownFlag { name });
            };

            let value = match inline_value {
                Some(value) => value,
                None if descriptor.value_type() == ValueType::Bool => {
                    descriptor.assign(FlagValue::Bool(true));
                    continue;
                }
                None => tokens
                    .next()
                    .ok_or(FlagError::MissingValue { name })?,
            };
            descriptor.set_value_as_str(&value)?;
        }

        debug!(program = %program, positionals = args.len(), "parsed command line");
        Ok(ParseOutcome::Continue(Positionals::new(program, args)))
    }

    /// Parses `argv` and folds any error into a failure
    /// [`Termination`].
    ///
    /// This is the entry point host programs use: every outcome is either
    /// "continue" or "print and exit", and rejected command lines exit with
    /// a non-zero status and a diagnostic on standard error.
    pub fn parse_or_terminate<I, S>(&mut self, info: &ProgramInfo, argv: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = argv.into_iter().map(Into::into).collect();
        let program = tokens.first().cloned().unwrap_or_default();
        match self.parse_command_line(info, tokens) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "rejected command line");
                let usage = usage_text(self, &program, info);
                ParseOutcome::Terminate(Termination::failure(&err, &usage))
            }
        }
    }
}
