//! End-to-end parsing scenarios against the shared test flag table.

use anyhow::{Result, bail, ensure};
use rstest::{fixture, rstest};
use spm_flags::{FlagError, ParseOutcome, Positionals, TerminationReason, ValueType};
use test_helpers::text::listed_flag_names;
use test_helpers::{TestFlags, argv, program_info};

#[fixture]
fn flags() -> TestFlags {
    TestFlags::declare().expect("test flags declare cleanly")
}

fn continue_with(flags: &mut TestFlags, tokens: &[&str]) -> Result<Positionals> {
    match flags.registry.parse_command_line(&program_info(), argv(tokens))? {
        ParseOutcome::Continue(positionals) => Ok(positionals),
        ParseOutcome::Terminate(termination) => {
            bail!("unexpected termination: {}", termination.message())
        }
    }
}

#[rstest]
fn flags_keep_their_defaults(flags: TestFlags) {
    let registry = &flags.registry;
    assert_eq!(*flags.int32_f.value(registry), 10);
    assert!(!*flags.bool_f.value(registry));
    assert_eq!(*flags.int64_f.value(registry), i64::MAX);
    assert_eq!(*flags.uint64_f.value(registry), u64::MAX);
    assert_eq!(flags.string_f.value(registry), "str");
    assert!(flags.double_f.value(registry).total_cmp(&40.0).is_eq());
}

#[rstest]
fn double_dash_with_inline_values(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(
        &mut flags,
        &[
            "program",
            "--int32_f=100",
            "other1",
            "--bool_f=true",
            "--int64_f=200",
            "--uint64_f=300",
            "--double_f=400",
            "--string_f=foo",
            "other2",
            "other3",
        ],
    )?;
    let registry = &flags.registry;
    ensure!(*flags.int32_f.value(registry) == 100);
    ensure!(*flags.bool_f.value(registry));
    ensure!(*flags.int64_f.value(registry) == 200);
    ensure!(*flags.uint64_f.value(registry) == 300);
    ensure!(flags.double_f.value(registry).total_cmp(&400.0).is_eq());
    ensure!(flags.string_f.value(registry) == "foo");
    ensure!(positionals.argc() == 4);
    ensure!(positionals.into_argv() == ["program", "other1", "other2", "other3"]);
    Ok(())
}

#[rstest]
fn single_dash_with_separate_values(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(
        &mut flags,
        &[
            "program",
            "-int32_f",
            "500",
            "-int64_f",
            "600",
            "-bool_f",
            "other1",
            "-string_f",
            "bar",
        ],
    )?;
    let registry = &flags.registry;
    ensure!(*flags.int32_f.value(registry) == 500);
    ensure!(*flags.int64_f.value(registry) == 600);
    ensure!(*flags.bool_f.value(registry));
    ensure!(flags.string_f.value(registry) == "bar");
    ensure!(positionals.argc() == 2);
    ensure!(positionals.args() == ["other1"]);
    Ok(())
}

#[rstest]
fn bare_boolean_then_positionals(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(&mut flags, &["program", "--bool_f", "other2"])?;
    ensure!(*flags.bool_f.value(&flags.registry));
    ensure!(positionals.argc() == 2);
    Ok(())
}

#[rstest]
fn boolean_literals_are_case_insensitive(mut flags: TestFlags) -> Result<()> {
    continue_with(&mut flags, &["program", "--bool_f=TRUE"])?;
    ensure!(*flags.bool_f.value(&flags.registry));
    continue_with(&mut flags, &["program", "--bool_f=False"])?;
    ensure!(!*flags.bool_f.value(&flags.registry));
    continue_with(&mut flags, &["program", "--bool_f=1"])?;
    ensure!(*flags.bool_f.value(&flags.registry));
    Ok(())
}

#[rstest]
#[case(&["program", "--foo"], "foo")]
#[case(&["program", "--int32_f=1", "--foo=bar"], "foo")]
#[case(&["program", "-int33_f", "3"], "int33_f")]
fn unknown_flags_are_rejected(
    mut flags: TestFlags,
    #[case] tokens: &[&str],
    #[case] unknown: &str,
) {
    let outcome = flags
        .registry
        .parse_command_line(&program_info(), argv(tokens));
    assert_eq!(
        outcome,
        Err(FlagError::UnknownFlag {
            name: unknown.to_owned()
        })
    );
}

#[rstest]
#[case(&["program", "--int32_f=X"], "int32_f", "X", ValueType::Int32)]
#[case(&["program", "--int64_f", "1.5"], "int64_f", "1.5", ValueType::Int64)]
#[case(&["program", "--uint64_f=-1"], "uint64_f", "-1", ValueType::UInt64)]
#[case(&["program", "--double_f=abc"], "double_f", "abc", ValueType::Double)]
#[case(&["program", "--bool_f=yes"], "bool_f", "yes", ValueType::Bool)]
fn malformed_values_are_rejected(
    mut flags: TestFlags,
    #[case] tokens: &[&str],
    #[case] name: &str,
    #[case] value: &str,
    #[case] expected: ValueType,
) {
    let err = flags
        .registry
        .parse_command_line(&program_info(), argv(tokens))
        .expect_err("malformed value must fail");
    assert_eq!(err.flag_name(), name);
    assert_eq!(
        err,
        FlagError::InvalidValueFormat {
            name: name.to_owned(),
            value: value.to_owned(),
            expected,
        }
    );
}

#[rstest]
fn parse_or_terminate_turns_errors_into_status_one(mut flags: TestFlags) {
    let outcome = flags
        .registry
        .parse_or_terminate(&program_info(), argv(&["program", "--foo"]));
    let ParseOutcome::Terminate(termination) = outcome else {
        panic!("unknown flag must terminate");
    };
    assert_eq!(termination.reason(), TerminationReason::Failure);
    assert_eq!(termination.status(), 1);
    assert!(termination.message().starts_with("ERROR: unknown/invalid flag 'foo'"));
}

#[rstest]
fn help_lists_every_flag_in_registration_order(mut flags: TestFlags) -> Result<()> {
    let outcome = flags
        .registry
        .parse_command_line(&program_info(), argv(&["program", "--help"]))?;
    let ParseOutcome::Terminate(termination) = outcome else {
        bail!("--help must terminate");
    };
    ensure!(termination.status() == 0);
    ensure!(
        listed_flag_names(termination.message())
            == [
                "help", "version", "int32_f", "bool_f", "int64_f", "uint64_f", "double_f",
                "string_f"
            ]
    );
    ensure!(
        termination
            .message()
            .contains("   --uint64_f (uint64_flags)  type: uint64 default: 18446744073709551615\n")
    );
    Ok(())
}

#[rstest]
fn version_prints_package_and_version(mut flags: TestFlags) -> Result<()> {
    let outcome = flags
        .registry
        .parse_command_line(&program_info(), argv(&["program", "--version"]))?;
    let ParseOutcome::Terminate(termination) = outcome else {
        bail!("--version must terminate");
    };
    ensure!(termination.reason() == TerminationReason::Version);
    ensure!(termination.message() == "sentencepiece 0.2.0\n");
    let mut out = Vec::new();
    termination.write_to(&mut out)?;
    ensure!(out == b"sentencepiece 0.2.0\n");
    Ok(())
}

#[rstest]
fn dashes_alone_are_positional(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(&mut flags, &["program", "-", "--", "file"])?;
    ensure!(positionals.args() == ["-", "--", "file"]);
    Ok(())
}

#[rstest]
fn separate_values_and_mixed_dashes(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(
        &mut flags,
        &[
            "program",
            "--int32_f",
            "500",
            "-int64_f=600",
            "-uint64_f",
            "700",
            "--bool_f=FALSE",
        ],
    )?;
    let registry = &flags.registry;
    ensure!(*flags.int32_f.value(registry) == 500);
    ensure!(*flags.int64_f.value(registry) == 600);
    ensure!(*flags.uint64_f.value(registry) == 700);
    ensure!(!*flags.bool_f.value(registry));
    ensure!(positionals.argc() == 1);
    Ok(())
}

#[rstest]
fn bare_boolean_before_value_flag(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(&mut flags, &["program", "--bool_f", "--int32_f", "800"])?;
    ensure!(*flags.bool_f.value(&flags.registry));
    ensure!(*flags.int32_f.value(&flags.registry) == 800);
    ensure!(positionals.argc() == 1);
    Ok(())
}

#[rstest]
fn empty_inline_value_assigns_empty_string(mut flags: TestFlags) -> Result<()> {
    let positionals = continue_with(&mut flags, &["program", "--string_f="])?;
    ensure!(flags.string_f.value(&flags.registry).is_empty());
    ensure!(positionals.argc() == 1);
    Ok(())
}
