//! Serializable views of registered flags.
//!
//! Host programs use these records to report the configuration they
//! resolved, and tooling can render them as JSON.

use serde::Serialize;

use crate::registry::{FlagDescriptor, FlagRegistry};
use crate::value::{FlagValue, ValueType};

/// Point-in-time description of one flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagInfo {
    /// Flag name, without dashes.
    pub name: String,
    /// Declared type.
    pub value_type: ValueType,
    /// Help text.
    pub help: String,
    /// Declared default.
    pub default: FlagValue,
    /// Value at the time of the snapshot.
    pub current: FlagValue,
}

impl FlagInfo {
    /// Returns `true` when the current value differs from the default.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.current != self.default
    }
}

impl From<&FlagDescriptor> for FlagInfo {
    fn from(descriptor: &FlagDescriptor) -> Self {
        Self {
            name: descriptor.name().to_owned(),
            value_type: descriptor.value_type(),
            help: descriptor.help().to_owned(),
            default: descriptor.default_value().clone(),
            current: descriptor.current_value().clone(),
        }
    }
}

impl FlagRegistry {
    /// Captures every flag in registration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spm_flags::{Flag, FlagRegistry, FlagValue};
    ///
    /// let mut registry = FlagRegistry::new();
    /// let model = Flag::new(&mut registry, "model", String::new(), "Model file name")?;
    /// model.set_value(&mut registry, "m.model".to_owned());
    ///
    /// let snapshot = registry.snapshot();
    /// let info = snapshot.iter().find(|info| info.name == "model").expect("declared above");
    /// assert!(info.is_overridden());
    /// assert_eq!(info.current, FlagValue::String("m.model".into()));
    /// # Ok::<(), spm_flags::FlagError>(())
    /// ```
    #[must_use]
    pub fn snapshot(&self) -> Vec<FlagInfo> {
        self.iter().map(FlagInfo::from).collect()
    }
}
