//! Unit tests for registration, lookup, enumeration and reset.

use super::{FlagDescriptor, FlagRegistry};
use crate::error::FlagError;
use crate::value::{FlagValue, ValueType};

fn string_flag(name: &str, default: &str) -> FlagDescriptor {
    FlagDescriptor::new(name, format!("{name} help"), FlagValue::String(default.to_owned()))
}

#[test]
fn new_registry_holds_only_builtins() {
    let registry = FlagRegistry::new();
    let names: Vec<_> = registry.iter().map(FlagDescriptor::name).collect();
    assert_eq!(names, ["help", "version"]);
    for descriptor in &registry {
        assert_eq!(descriptor.value_type(), ValueType::Bool);
        assert_eq!(descriptor.current_value(), &FlagValue::Bool(false));
    }
}

#[test]
fn enumeration_follows_registration_order_and_restarts() -> Result<(), FlagError> {
    let mut registry = FlagRegistry::new();
    for name in ["output", "input", "model"] {
        registry.register(string_flag(name, ""))?;
    }
    let first: Vec<_> = registry.iter().map(FlagDescriptor::name).collect();
    let second: Vec<_> = registry.iter().map(FlagDescriptor::name).collect();
    assert_eq!(first, ["help", "version", "output", "input", "model"]);
    assert_eq!(first, second);
    assert_eq!(registry.len(), 5);
    assert!(!registry.is_empty());
    Ok(())
}

#[test]
fn duplicate_registration_keeps_the_first_descriptor() -> Result<(), FlagError> {
    let mut registry = FlagRegistry::new();
    registry.register(string_flag("input", "first"))?;
    let err = registry
        .register(string_flag("input", "second"))
        .expect_err("duplicate names must be rejected");
    assert_eq!(err, FlagError::DuplicateFlagName { name: "input".into() });
    let kept = registry.lookup("input").map(FlagDescriptor::default_value);
    assert_eq!(kept, Some(&FlagValue::String("first".into())));
    assert_eq!(registry.len(), 3);
    Ok(())
}

#[test]
fn lookup_misses_unknown_names() {
    let registry = FlagRegistry::new();
    assert!(registry.lookup("foo").is_none());
    assert!(registry.lookup("").is_none());
    assert!(registry.lookup("--help").is_none());
}

#[test]
fn reset_all_restores_defaults_without_dropping_declarations() -> Result<(), FlagError> {
    let mut registry = FlagRegistry::new();
    let id = registry.register(FlagDescriptor::new(
        "vocab_size",
        "vocabulary size",
        FlagValue::Int32(8000),
    ))?;
    registry.descriptor_mut(id).set_value_as_str("16000")?;
    assert_eq!(registry.descriptor(id).current_value(), &FlagValue::Int32(16000));

    registry.reset_all();
    assert_eq!(registry.descriptor(id).current_value(), &FlagValue::Int32(8000));
    assert!(registry.lookup("vocab_size").is_some());
    Ok(())
}

#[test]
fn separate_registries_do_not_share_declarations() -> Result<(), FlagError> {
    let mut first = FlagRegistry::new();
    let mut second = FlagRegistry::new();
    first.register(string_flag("model", ""))?;
    second.register(string_flag("model", ""))?;
    assert_eq!(first.len(), second.len());
    Ok(())
}
