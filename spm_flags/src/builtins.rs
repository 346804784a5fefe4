//! The built-in `--help` and `--version` flags and the text they print.

use crate::outcome::{Termination, TerminationReason};
use crate::registry::{FlagDescriptor, FlagRegistry};
use crate::value::FlagValue;

/// Name of the built-in help flag.
pub const HELP: &str = "help";

/// Name of the built-in version flag.
pub const VERSION: &str = "version";

/// Package identity printed by `--version` and the `--help` banner.
///
/// # Examples
///
/// ```rust
/// use spm_flags::{ProgramInfo, version_text};
/// let info = ProgramInfo::new("sentencepiece", "0.2.0");
/// assert_eq!(version_text(&info), "sentencepiece 0.2.0\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    package: String,
    version: String,
}

impl ProgramInfo {
    /// Creates program metadata from a package name and version string.
    #[must_use]
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
        }
    }

    /// Package name.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Help,
    Version,
}

impl Builtin {
    pub(crate) const ALL: [Self; 2] = [Self::Help, Self::Version];

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            HELP => Some(Self::Help),
            VERSION => Some(Self::Version),
            _ => None,
        }
    }

    pub(crate) fn descriptor(self) -> FlagDescriptor {
        match self {
            Self::Help => FlagDescriptor::new(HELP, "show help", FlagValue::Bool(false)),
            Self::Version => FlagDescriptor::new(VERSION, "show version", FlagValue::Bool(false)),
        }
    }

    pub(crate) fn terminate(
        self,
        registry: &FlagRegistry,
        program: &str,
        info: &ProgramInfo,
    ) -> Termination {
        match self {
            Self::Help => Termination::new(
                TerminationReason::Help,
                usage_text(registry, program, info),
            ),
            Self::Version => Termination::new(TerminationReason::Version, version_text(info)),
        }
    }
}

/// Renders the `--help` text: a banner, the usage line and one line per
/// registered flag in registration order.
///
/// # Examples
///
/// ```rust
/// use spm_flags::{Flag, FlagRegistry, ProgramInfo, usage_text};
///
/// let mut registry = FlagRegistry::new();
/// Flag::new(&mut registry, "vocab_size", 8000_i32, "vocabulary size")?;
/// let text = usage_text(&registry, "spm_train", &ProgramInfo::new("sentencepiece", "0.2.0"));
/// assert!(text.starts_with("sentencepiece\n\nUsage: spm_train [options] files\n\n"));
/// assert!(text.contains("   --vocab_size (vocabulary size)  type: int32 default: 8000\n"));
/// # Ok::<(), spm_flags::FlagError>(())
/// ```
#[must_use]
pub fn usage_text(registry: &FlagRegistry, program: &str, info: &ProgramInfo) -> String {
    let mut text = format!(
        "{}\n\nUsage: {program} [options] files\n\n",
        info.package()
    );
    for descriptor in registry {
        text.push_str(&format!(
            "   --{} ({})  type: {} default: {}\n",
            descriptor.name(),
            descriptor.help(),
            descriptor.value_type(),
            descriptor.default_value()
        ));
    }
    text.push('\n');
    text
}

/// Renders the `--version` text.
#[must_use]
pub fn version_text(info: &ProgramInfo) -> String {
    format!("{} {}\n", info.package(), info.version())
}
