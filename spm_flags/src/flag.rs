//! Typed handles over registry entries.

use std::fmt;
use std::marker::PhantomData;

use crate::error::FlagError;
use crate::registry::{FlagDescriptor, FlagId, FlagRegistry};
use crate::value::{FlagValue, ValueType};

mod sealed {
    pub trait Sealed {}
}

/// Rust types a flag can hold.
///
/// Implemented for `bool`, `i32`, `i64`, `u32`, `u64`, `f64` and `String`.
pub trait FlagKind: sealed::Sealed + Sized {
    /// Type tag recorded in the registry.
    const VALUE_TYPE: ValueType;

    /// Wraps the value in its type-erased form.
    fn into_value(self) -> FlagValue;

    /// Borrows the typed value back out of its type-erased form.
    fn from_value(value: &FlagValue) -> Option<&Self>;
}

macro_rules! impl_flag_kind {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FlagKind for $ty {
                const VALUE_TYPE: ValueType = ValueType::$variant;

                fn into_value(self) -> FlagValue {
                    FlagValue::$variant(self)
                }

                fn from_value(value: &FlagValue) -> Option<&Self> {
                    match value {
                        FlagValue::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_flag_kind! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u32 => UInt32,
    u64 => UInt64,
    f64 => Double,
    String => String,
}

/// A declared flag of type `T`.
///
/// The handle is a cheap copyable key; values live in the
/// [`FlagRegistry`] the flag was declared on and every accessor takes that
/// registry.
///
/// # Examples
///
/// ```rust
/// use spm_flags::{Flag, FlagRegistry};
///
/// let mut registry = FlagRegistry::new();
/// let vocab_size = Flag::new(&mut registry, "vocab_size", 8000_i32, "vocabulary size")?;
/// assert_eq!(*vocab_size.value(&registry), 8000);
///
/// vocab_size.set_value_as_str(&mut registry, "32000")?;
/// assert_eq!(*vocab_size.value(&registry), 32000);
/// # Ok::<(), spm_flags::FlagError>(())
/// ```
pub struct Flag<T> {
    id: FlagId,
    kind: PhantomData<fn() -> T>,
}

impl<T: FlagKind> Flag<T> {
    /// Declares a flag named `name` on `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::DuplicateFlagName`] if `name` is already taken,
    /// including by the built-in `help` and `version` flags.
    pub fn new(
        registry: &mut FlagRegistry,
        name: impl Into<String>,
        default_value: T,
        help: impl Into<String>,
    ) -> Result<Self, FlagError> {
        let descriptor = FlagDescriptor::new(name, help, default_value.into_value());
        let id = registry.register(descriptor)?;
        Ok(Self {
            id,
            kind: PhantomData,
        })
    }

    /// Current value of the flag.
    ///
    /// # Panics
    ///
    /// Panics if `registry` is not the registry the flag was declared on.
    #[must_use]
    #[track_caller]
    pub fn value<'r>(&self, registry: &'r FlagRegistry) -> &'r T {
        let descriptor = registry.descriptor(self.id);
        match T::from_value(descriptor.current_value()) {
            Some(value) => value,
            None => mismatched_kind::<T>(descriptor),
        }
    }

    /// Assigns `value` directly, bypassing string parsing.
    ///
    /// # Panics
    ///
    /// Panics if `registry` is not the registry the flag was declared on.
    #[track_caller]
    pub fn set_value(&self, registry: &mut FlagRegistry, value: T) {
        registry.descriptor_mut(self.id).assign(value.into_value());
    }

    /// Parses `raw` according to the flag's type and assigns it.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::InvalidValueFormat`] when `raw` is malformed.
    ///
    /// # Panics
    ///
    /// Panics if `registry` is not the registry the flag was declared on.
    #[track_caller]
    pub fn set_value_as_str(&self, registry: &mut FlagRegistry, raw: &str) -> Result<(), FlagError> {
        registry.descriptor_mut(self.id).set_value_as_str(raw)
    }

    /// Name the flag was declared with.
    ///
    /// # Panics
    ///
    /// Panics if `registry` is not the registry the flag was declared on.
    #[must_use]
    #[track_caller]
    pub fn name<'r>(&self, registry: &'r FlagRegistry) -> &'r str {
        registry.descriptor(self.id).name()
    }

    /// Registry key behind this handle.
    #[must_use]
    pub const fn id(&self) -> FlagId {
        self.id
    }
}

impl FlagRegistry {
    /// Current value of `flag`; the registry-side spelling of
    /// [`Flag::value`].
    ///
    /// # Panics
    ///
    /// Panics if `flag` was declared on a different registry.
    #[must_use]
    #[track_caller]
    pub fn get<T: FlagKind>(&self, flag: &Flag<T>) -> &T {
        flag.value(self)
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Flag<T> {}

impl<T> fmt::Debug for Flag<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag").field("id", &self.id).finish()
    }
}

#[cold]
#[track_caller]
fn mismatched_kind<T: FlagKind>(descriptor: &FlagDescriptor) -> ! {
    panic!(
        "flag '{}' holds a {} value, not {}",
        descriptor.name(),
        descriptor.value_type(),
        T::VALUE_TYPE
    )
}
