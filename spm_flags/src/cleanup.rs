//! Scoped teardown of command-line state.

use std::ops::{Deref, DerefMut};

use crate::registry::FlagRegistry;

/// Exclusive access to a registry that resets every flag when dropped.
///
/// Acquire it once at the top of `main` (or of a test case), parse and read
/// flags through it, and let it fall out of scope. Overrides from one parse
/// never leak into the next, while the declarations stay in place.
///
/// # Examples
///
/// ```rust
/// use spm_flags::{Flag, FlagRegistry, ParseOutcome, ProgramInfo};
///
/// let mut registry = FlagRegistry::new();
/// let decompile = Flag::new(&mut registry, "decompile", false, "Decompile compiled charsmap")?;
/// let info = ProgramInfo::new("sentencepiece", "0.2.0");
/// {
///     let mut flags = registry.scoped();
///     flags.parse_command_line(&info, ["spm_normalize", "--decompile"])?;
///     assert!(*decompile.value(&flags));
/// }
/// assert!(!*decompile.value(&registry));
/// # Ok::<(), spm_flags::FlagError>(())
/// ```
#[derive(Debug)]
#[must_use = "flags are reset as soon as the guard is dropped"]
pub struct ScopedFlags<'r> {
    registry: &'r mut FlagRegistry,
}

impl FlagRegistry {
    /// Borrows the registry behind a guard that calls
    /// [`FlagRegistry::reset_all`] on drop.
    pub fn scoped(&mut self) -> ScopedFlags<'_> {
        ScopedFlags { registry: self }
    }
}

impl Deref for ScopedFlags<'_> {
    type Target = FlagRegistry;

    fn deref(&self) -> &Self::Target {
        self.registry
    }
}

impl DerefMut for ScopedFlags<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.registry
    }
}

impl Drop for ScopedFlags<'_> {
    fn drop(&mut self) {
        self.registry.reset_all();
    }
}
