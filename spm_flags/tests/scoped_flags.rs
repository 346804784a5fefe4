//! Flag state across repeated parses, scoped resets and snapshots.

use anyhow::{Result, ensure};
use rstest::{fixture, rstest};
use spm_flags::{FlagError, FlagValue, ParseOutcome};
use test_helpers::{TestFlags, argv, program_info};

#[fixture]
fn flags() -> TestFlags {
    TestFlags::declare().expect("test flags declare cleanly")
}

#[rstest]
fn scoped_guard_resets_on_drop(mut flags: TestFlags) -> Result<()> {
    {
        let mut scoped = flags.registry.scoped();
        scoped.parse_command_line(
            &program_info(),
            argv(&["program", "--int32_f=1", "--string_f", "scoped"]),
        )?;
        ensure!(*flags.int32_f.value(&scoped) == 1);
        ensure!(flags.string_f.value(&scoped) == "scoped");
    }
    ensure!(*flags.int32_f.value(&flags.registry) == 10);
    ensure!(flags.string_f.value(&flags.registry) == "str");
    Ok(())
}

#[rstest]
fn scoped_guard_resets_after_failed_parse(mut flags: TestFlags) -> Result<()> {
    {
        let mut scoped = flags.registry.scoped();
        let outcome =
            scoped.parse_command_line(&program_info(), argv(&["program", "--int64_f=7", "--nope"]));
        ensure!(matches!(outcome, Err(FlagError::UnknownFlag { .. })));
        ensure!(*flags.int64_f.value(&scoped) == 7);
    }
    ensure!(*flags.int64_f.value(&flags.registry) == i64::MAX);
    Ok(())
}

#[rstest]
fn scoped_guard_resets_after_termination(mut flags: TestFlags) -> Result<()> {
    {
        let mut scoped = flags.registry.scoped();
        let outcome = scoped.parse_or_terminate(
            &program_info(),
            argv(&["program", "--bool_f", "--version"]),
        );
        ensure!(outcome.is_display_request());
        ensure!(*flags.bool_f.value(&scoped));
    }
    ensure!(!*flags.bool_f.value(&flags.registry));
    Ok(())
}

#[rstest]
fn parses_can_be_repeated_after_reset(mut flags: TestFlags) -> Result<()> {
    for round in 0..3_i32 {
        let mut scoped = flags.registry.scoped();
        ensure!(*flags.int32_f.value(&scoped) == 10, "round {round} saw stale state");
        let token = format!("--int32_f={round}");
        let outcome = scoped.parse_command_line(&program_info(), argv(&["program", token.as_str()]))?;
        ensure!(matches!(outcome, ParseOutcome::Continue(_)));
        ensure!(*flags.int32_f.value(&scoped) == round);
    }
    Ok(())
}

#[rstest]
fn typed_setters_round_trip(mut flags: TestFlags) -> Result<()> {
    flags.uint64_f.set_value(&mut flags.registry, 42);
    ensure!(flags.registry.get(&flags.uint64_f) == &42);
    flags.string_f.set_value_as_str(&mut flags.registry, "set")?;
    ensure!(flags.string_f.value(&flags.registry) == "set");
    let err = flags
        .double_f
        .set_value_as_str(&mut flags.registry, "four")
        .expect_err("non-numeric double must fail");
    ensure!(err.flag_name() == "double_f");
    ensure!(flags.double_f.value(&flags.registry).total_cmp(&40.0).is_eq());
    Ok(())
}

#[rstest]
fn snapshot_reports_overrides_as_json(mut flags: TestFlags) -> Result<()> {
    flags.registry.parse_command_line(
        &program_info(),
        argv(&["program", "--string_f=json", "--bool_f"]),
    )?;
    let snapshot = flags.registry.snapshot();
    let overridden: Vec<_> = snapshot
        .iter()
        .filter(|info| info.is_overridden())
        .map(|info| info.name.as_str())
        .collect();
    ensure!(overridden == ["bool_f", "string_f"]);

    let string_f = snapshot
        .iter()
        .find(|info| info.name == "string_f")
        .expect("string_f is declared");
    ensure!(string_f.current == FlagValue::String("json".into()));
    let json = serde_json::to_value(string_f)?;
    ensure!(
        json == serde_json::json!({
            "name": "string_f",
            "value_type": "string",
            "help": "string_flags",
            "default": "str",
            "current": "json",
        })
    );
    Ok(())
}
