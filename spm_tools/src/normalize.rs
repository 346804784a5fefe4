//! Flags and settings for `spm_normalize`.

use serde::Serialize;
use spm_flags::{Flag, FlagError, FlagRegistry, Positionals};

use crate::error::{Result, ToolError};
use crate::runner::FlagTable;

/// Flags accepted by `spm_normalize`.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeFlags {
    model: Flag<String>,
    use_internal_normalization: Flag<bool>,
    normalization_rule_name: Flag<String>,
    normalization_rule_tsv: Flag<String>,
    remove_extra_whitespaces: Flag<bool>,
    decompile: Flag<bool>,
    input: Flag<String>,
    output: Flag<String>,
}

/// Where the normalization rules come from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NormalizerSource {
    /// Use the normalizer embedded in a trained model.
    Model(String),
    /// Compile rules from a TSV file.
    RuleTsv(String),
    /// Use a named built-in rule set.
    RuleName(String),
}

/// Adjustments applied unless `--use_internal_normalization` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizerOverrides {
    /// Whether to prepend the whitespace marker.
    pub add_dummy_prefix: bool,
    /// Whether to replace spaces with the meta symbol.
    pub escape_whitespaces: bool,
    /// Whether to collapse runs of whitespace.
    pub remove_extra_whitespaces: bool,
}

/// One input stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// Read standard input.
    Stdin,
    /// Read the named file.
    File(String),
}

/// What `spm_normalize` does once its flags are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NormalizeTask {
    /// Normalize each input line by line.
    Normalize {
        /// Inputs in the order they are read.
        inputs: Vec<InputSource>,
        /// Output file, or `None` for standard output.
        output: Option<String>,
    },
    /// Write the compiled character map back out as TSV.
    Decompile {
        /// Output file, or `None` for standard output.
        output: Option<String>,
    },
}

/// Resolved `spm_normalize` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeSettings {
    /// Rules to normalize with.
    pub source: NormalizerSource,
    /// Overrides applied on top of the source, if any.
    pub overrides: Option<NormalizerOverrides>,
    /// Work to perform.
    pub task: NormalizeTask,
}

impl FlagTable for NormalizeFlags {
    type Settings = NormalizeSettings;

    fn declare(registry: &mut FlagRegistry) -> Result<Self, FlagError> {
        Ok(Self {
            model: Flag::new(registry, "model", String::new(), "Model file name")?,
            use_internal_normalization: Flag::new(
                registry,
                "use_internal_normalization",
                false,
                "Use NormalizerSpec \"as-is\" to run the normalizer for SentencePiece segmentation",
            )?,
            normalization_rule_name: Flag::new(
                registry,
                "normalization_rule_name",
                String::new(),
                "Normalization rule name. Choose from nfkc or identity",
            )?,
            normalization_rule_tsv: Flag::new(
                registry,
                "normalization_rule_tsv",
                String::new(),
                "Normalization rule TSV file. ",
            )?,
            remove_extra_whitespaces: Flag::new(
                registry,
                "remove_extra_whitespaces",
                true,
                "Remove extra whitespaces",
            )?,
            decompile: Flag::new(
                registry,
                "decompile",
                false,
                "Decompile compiled charamap and output it as TSV.",
            )?,
            input: Flag::new(registry, "input", String::new(), "Input filename")?,
            output: Flag::new(registry, "output", String::new(), "Output filename")?,
        })
    }

    fn resolve(&self, registry: &FlagRegistry, positionals: &Positionals) -> Result<NormalizeSettings> {
        let source = self.source(registry)?;
        let overrides = (!*self.use_internal_normalization.value(registry)).then(|| {
            NormalizerOverrides {
                add_dummy_prefix: false,
                escape_whitespaces: false,
                remove_extra_whitespaces: *self.remove_extra_whitespaces.value(registry),
            }
        });
        let output = non_empty(self.output.value(registry));
        let task = if *self.decompile.value(registry) {
            NormalizeTask::Decompile { output }
        } else {
            NormalizeTask::Normalize {
                inputs: self.inputs(registry, positionals),
                output,
            }
        };
        Ok(NormalizeSettings {
            source,
            overrides,
            task,
        })
    }
}

impl NormalizeFlags {
    fn source(&self, registry: &FlagRegistry) -> Result<NormalizerSource> {
        if let Some(model) = non_empty(self.model.value(registry)) {
            return Ok(NormalizerSource::Model(model));
        }
        if let Some(tsv) = non_empty(self.normalization_rule_tsv.value(registry)) {
            return Ok(NormalizerSource::RuleTsv(tsv));
        }
        non_empty(self.normalization_rule_name.value(registry))
            .map(NormalizerSource::RuleName)
            .ok_or(ToolError::MissingNormalizerSource)
    }

    /// `--input` wins over positionals; no inputs at all means stdin.
    fn inputs(&self, registry: &FlagRegistry, positionals: &Positionals) -> Vec<InputSource> {
        let files: Vec<String> = match non_empty(self.input.value(registry)) {
            Some(input) => vec![input],
            None => positionals.args().to_vec(),
        };
        if files.is_empty() {
            return vec![InputSource::Stdin];
        }
        files.into_iter().map(InputSource::File).collect()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}
