//! The flag registry: every declared flag, keyed by name.
//!
//! A program builds one [`FlagRegistry`] at start-up, declares its flags
//! against it, parses `argv` once and then reads the final values. The
//! registry owns every [`FlagDescriptor`]; typed [`Flag`](crate::Flag)
//! handles only refer to them.

mod descriptor;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub use descriptor::FlagDescriptor;

use crate::builtins::Builtin;
use crate::error::FlagError;

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque reference to a descriptor inside a particular registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagId {
    registry: u64,
    index: usize,
}

/// Mapping from flag name to descriptor, in registration order.
///
/// The built-in `help` and `version` flags are registered by
/// [`FlagRegistry::new`], so user declarations of either name fail with
/// [`FlagError::DuplicateFlagName`].
///
/// # Examples
///
/// ```rust
/// use spm_flags::{FlagDescriptor, FlagRegistry, FlagValue};
///
/// let mut registry = FlagRegistry::new();
/// registry.register(FlagDescriptor::new("model", "Model file name", FlagValue::String(String::new())))?;
/// assert!(registry.lookup("model").is_some());
/// assert!(registry.lookup("help").is_some());
/// # Ok::<(), spm_flags::FlagError>(())
/// ```
#[derive(Debug)]
pub struct FlagRegistry {
    id: u64,
    descriptors: Vec<FlagDescriptor>,
    by_name: HashMap<String, usize>,
}

impl FlagRegistry {
    /// Creates a registry holding only the built-in flags.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            descriptors: Vec::new(),
            by_name: HashMap::new(),
        };
        for builtin in Builtin::ALL {
            registry.insert(builtin.descriptor());
        }
        registry
    }

    /// Adds `descriptor` to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlagName`] when a flag with the same
    /// name is already registered. The existing flag is kept.
    pub fn register(&mut self, descriptor: FlagDescriptor) -> Result<FlagId, FlagError> {
        if self.by_name.contains_key(descriptor.name()) {
            return Err(FlagError::DuplicateFlagName {
                name: descriptor.name().to_owned(),
            });
        }
        Ok(self.insert(descriptor))
    }

    fn insert(&mut self, descriptor: FlagDescriptor) -> FlagId {
        let index = self.descriptors.len();
        tracing::debug!(
            flag = descriptor.name(),
            value_type = %descriptor.value_type(),
            default = %descriptor.default_value(),
            "registered flag"
        );
        self.by_name.insert(descriptor.name().to_owned(), index);
        self.descriptors.push(descriptor);
        FlagId {
            registry: self.id,
            index,
        }
    }

    /// Finds the descriptor registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FlagDescriptor> {
        self.by_name
            .get(name)
            .and_then(|&index| self.descriptors.get(index))
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut FlagDescriptor> {
        let index = *self.by_name.get(name)?;
        self.descriptors.get_mut(index)
    }

    /// Iterates over every descriptor in registration order.
    ///
    /// The iterator borrows the registry, so calling `iter` again restarts
    /// from the first declaration.
    pub fn iter(&self) -> std::slice::Iter<'_, FlagDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered flags, built-ins included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when no flags are registered.
    ///
    /// A registry from [`FlagRegistry::new`] always holds the built-ins.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Restores every flag's current value to its default.
    ///
    /// Declarations are kept so the same registry can parse again.
    pub fn reset_all(&mut self) {
        for descriptor in &mut self.descriptors {
            descriptor.reset();
        }
        tracing::debug!(flags = self.descriptors.len(), "reset flags to defaults");
    }

    /// Resolves `id` to its descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different registry.
    #[must_use]
    #[track_caller]
    pub fn descriptor(&self, id: FlagId) -> &FlagDescriptor {
        match self.position(id).and_then(|index| self.descriptors.get(index)) {
            Some(descriptor) => descriptor,
            None => foreign_flag(id),
        }
    }

    #[track_caller]
    pub(crate) fn descriptor_mut(&mut self, id: FlagId) -> &mut FlagDescriptor {
        let position = self.position(id);
        match position.and_then(|index| self.descriptors.get_mut(index)) {
            Some(descriptor) => descriptor,
            None => foreign_flag(id),
        }
    }

    fn position(&self, id: FlagId) -> Option<usize> {
        (id.registry == self.id).then_some(id.index)
    }
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a FlagRegistry {
    type Item = &'a FlagDescriptor;
    type IntoIter = std::slice::Iter<'a, FlagDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cold]
#[track_caller]
fn foreign_flag(id: FlagId) -> ! {
    panic!("flag handle {id:?} was not issued by this registry")
}

#[cfg(test)]
mod tests;
