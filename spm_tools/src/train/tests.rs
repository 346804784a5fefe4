//! Unit tests for `spm_train` settings resolution.

use std::fs;

use anyhow::{Context, Result, bail, ensure};
use rstest::rstest;

use super::{ModelType, TrainFlags, TrainSettings};
use crate::error::ToolError;
use crate::runner::{Invocation, invoke};

fn resolve(argv: &[&str]) -> Result<TrainSettings> {
    match invoke::<TrainFlags, _, _>(argv.iter().copied())? {
        Invocation::Resolved(settings) => Ok(settings),
        Invocation::Terminated(termination) => {
            bail!("unexpected termination: {}", termination.message())
        }
    }
}

#[test]
fn defaults_match_the_trainer() -> Result<()> {
    let settings = resolve(&["spm_train", "--input=corpus.txt", "--model_prefix=m"])?;
    let trainer = &settings.trainer;
    ensure!(trainer.input == ["corpus.txt"]);
    ensure!(trainer.model_type == ModelType::Unigram);
    ensure!(trainer.vocab_size == 8000);
    ensure!(trainer.character_coverage.total_cmp(&0.9995).is_eq());
    ensure!(trainer.shrinking_factor.total_cmp(&0.75).is_eq());
    ensure!(trainer.seed_sentencepiece_size == 1_000_000);
    ensure!(trainer.max_sentence_length == 4192);
    ensure!(trainer.num_threads == 16);
    ensure!((trainer.unk_id, trainer.bos_id, trainer.eos_id, trainer.pad_id) == (0, 1, 2, -1));
    ensure!(trainer.unk_surface == " \u{2047} ");
    ensure!(trainer.random_seed.is_none());
    ensure!(settings.normalizer.name == "nmt_nfkc");
    ensure!(settings.normalizer.add_dummy_prefix);
    ensure!(settings.denormalizer.is_none());
    Ok(())
}

#[rstest]
#[case(&["spm_train", "--model_prefix=m"], "input")]
#[case(&["spm_train", "--input=a.txt"], "model_prefix")]
#[case(&["spm_train", "--input=", "--model_prefix=m"], "input")]
fn required_flags_must_be_set(#[case] argv: &[&str], #[case] missing: &str) {
    let err = resolve(argv).expect_err("required flag left unset");
    assert!(
        matches!(
            err.downcast_ref::<ToolError>(),
            Some(ToolError::MissingRequired { flag }) if *flag == missing
        ),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case("BPE", ModelType::Bpe)]
#[case("word", ModelType::Word)]
#[case("Char", ModelType::Char)]
fn model_type_ignores_case(#[case] name: &str, #[case] expected: ModelType) -> Result<()> {
    let model_type = format!("--model_type={name}");
    let settings = resolve(&["spm_train", "--input=a", "--model_prefix=m", model_type.as_str()])?;
    ensure!(settings.trainer.model_type == expected);
    Ok(())
}

#[test]
fn unknown_model_type_is_rejected() {
    let err = resolve(&["spm_train", "--input=a", "--model_prefix=m", "--model_type=lstm"])
        .expect_err("lstm is not a model type");
    assert!(matches!(
        err.downcast_ref::<ToolError>(),
        Some(ToolError::UnknownModelType { value }) if value == "lstm"
    ));
}

#[test]
fn list_flags_are_split() -> Result<()> {
    let settings = resolve(&[
        "spm_train",
        "--input=a.txt,b.txt",
        "--model_prefix=m",
        "--accept_language",
        "ja,en",
        "--control_symbols=<ctrl>,\"<a,b>\"",
        "--random_seed=7",
    ])?;
    let trainer = &settings.trainer;
    ensure!(trainer.input == ["a.txt", "b.txt"]);
    ensure!(trainer.accept_language == ["ja", "en"]);
    ensure!(trainer.control_symbols == ["<ctrl>", "<a,b>"]);
    ensure!(trainer.random_seed == Some(7));
    Ok(())
}

#[test]
fn symbol_files_extend_and_replace() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let symbols = dir.path().join("symbols.txt");
    fs::write(&symbols, "<sep>\n<cls>\n")?;
    let chars = dir.path().join("chars.txt");
    fs::write(&chars, "ab\ncd\n")?;

    let symbols_flag = format!("--user_defined_symbols_file={}", symbols.display());
    let chars_flag = format!("--required_chars_file={}", chars.display());
    let settings = resolve(&[
        "spm_train",
        "--input=a",
        "--model_prefix=m",
        "--user_defined_symbols=<mask>",
        symbols_flag.as_str(),
        "--required_chars=zz",
        chars_flag.as_str(),
    ])?;
    let trainer = &settings.trainer;
    ensure!(trainer.user_defined_symbols == ["<mask>", "<sep>", "<cls>"]);
    ensure!(trainer.required_chars == "abcd");
    Ok(())
}

#[test]
fn missing_symbol_file_names_the_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let absent = dir.path().join("absent.txt");
    let flag = format!("--control_symbols_file={}", absent.display());
    let Err(err) = resolve(&["spm_train", "--input=a", "--model_prefix=m", flag.as_str()]) else {
        bail!("reading a missing file must fail");
    };
    match err.downcast_ref::<ToolError>() {
        Some(ToolError::ReadFile { path, .. }) => ensure!(*path == absent),
        _ => bail!("unexpected error: {err}"),
    }
    Ok(())
}

#[test]
fn denormalizer_disables_text_rewrites() -> Result<()> {
    let settings = resolve(&[
        "spm_train",
        "--input=a",
        "--model_prefix=m",
        "--denormalization_rule_tsv=denorm.tsv",
    ])?;
    let denormalizer = settings
        .denormalizer
        .context("denormalizer should be configured")?;
    ensure!(denormalizer.normalization_rule_tsv == "denorm.tsv");
    ensure!(!denormalizer.add_dummy_prefix);
    ensure!(!denormalizer.remove_extra_whitespaces);
    ensure!(!denormalizer.escape_whitespaces);
    Ok(())
}

#[test]
fn help_is_not_resolved() -> Result<()> {
    let Invocation::Terminated(termination) = invoke::<TrainFlags, _, _>(["spm_train", "--help"])?
    else {
        bail!("--help must terminate");
    };
    ensure!(termination.status() == 0);
    ensure!(
        termination
            .message()
            .contains("   --vocab_size (vocabulary size)  type: int32 default: 8000\n")
    );
    Ok(())
}
