//! Flags and settings for `spm_train`.
//!
//! The flag table mirrors the trainer's configuration one-to-one. After
//! parsing, comma-separated flags are split into lists, `*_file` flags are
//! read from disk and the result is grouped into trainer, normalizer and
//! optional denormalizer settings.

use std::fs;
use std::path::Path;

use serde::Serialize;
use spm_flags::{Flag, FlagError, FlagRegistry, Positionals};
use tracing::debug;

use crate::csv::split_csv;
use crate::error::{Result, ToolError};
use crate::runner::FlagTable;

/// Seed value meaning "leave the generator unseeded".
pub const UNSET_RANDOM_SEED: u32 = u32::MAX;

/// Segmentation algorithm to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Unigram language model.
    Unigram,
    /// Byte-pair encoding.
    Bpe,
    /// Whitespace-delimited words.
    Word,
    /// Single characters.
    Char,
}

impl ModelType {
    /// Parses a model type name, ignoring ASCII case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        [Self::Unigram, Self::Bpe, Self::Word, Self::Char]
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(name))
    }

    /// Lowercase name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unigram => "unigram",
            Self::Bpe => "bpe",
            Self::Word => "word",
            Self::Char => "char",
        }
    }
}

/// Flags accepted by `spm_train`.
#[derive(Debug, Clone, Copy)]
pub struct TrainFlags {
    input: Flag<String>,
    input_format: Flag<String>,
    model_prefix: Flag<String>,
    model_type: Flag<String>,
    vocab_size: Flag<i32>,
    accept_language: Flag<String>,
    self_test_sample_size: Flag<i32>,
    character_coverage: Flag<f64>,
    input_sentence_size: Flag<u64>,
    shuffle_input_sentence: Flag<bool>,
    seed_sentencepiece_size: Flag<i32>,
    shrinking_factor: Flag<f64>,
    num_threads: Flag<i32>,
    num_sub_iterations: Flag<i32>,
    max_sentencepiece_length: Flag<i32>,
    max_sentence_length: Flag<i32>,
    split_by_unicode_script: Flag<bool>,
    split_by_number: Flag<bool>,
    split_by_whitespace: Flag<bool>,
    split_digits: Flag<bool>,
    pretokenization_delimiter: Flag<String>,
    treat_whitespace_as_suffix: Flag<bool>,
    allow_whitespace_only_pieces: Flag<bool>,
    control_symbols: Flag<String>,
    control_symbols_file: Flag<String>,
    user_defined_symbols: Flag<String>,
    user_defined_symbols_file: Flag<String>,
    required_chars: Flag<String>,
    required_chars_file: Flag<String>,
    byte_fallback: Flag<bool>,
    vocabulary_output_piece_score: Flag<bool>,
    normalization_rule_name: Flag<String>,
    normalization_rule_tsv: Flag<String>,
    denormalization_rule_tsv: Flag<String>,
    add_dummy_prefix: Flag<bool>,
    remove_extra_whitespaces: Flag<bool>,
    hard_vocab_limit: Flag<bool>,
    use_all_vocab: Flag<bool>,
    unk_id: Flag<i32>,
    bos_id: Flag<i32>,
    eos_id: Flag<i32>,
    pad_id: Flag<i32>,
    unk_piece: Flag<String>,
    bos_piece: Flag<String>,
    eos_piece: Flag<String>,
    pad_piece: Flag<String>,
    unk_surface: Flag<String>,
    train_extremely_large_corpus: Flag<bool>,
    random_seed: Flag<u32>,
    enable_differential_privacy: Flag<bool>,
    differential_privacy_noise_level: Flag<f64>,
    differential_privacy_clipping_threshold: Flag<u64>,
}

/// Trainer configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each switch maps to one trainer option"
)]
pub struct TrainerSettings {
    /// Training corpora.
    pub input: Vec<String>,
    /// Corpus format, `text` or `tsv`; empty selects the trainer's default.
    pub input_format: String,
    /// Prefix for the `.model` and `.vocab` outputs.
    pub model_prefix: String,
    /// Algorithm to train.
    pub model_type: ModelType,
    /// Target vocabulary size.
    pub vocab_size: i32,
    /// Languages the model accepts.
    pub accept_language: Vec<String>,
    /// Number of self-test samples.
    pub self_test_sample_size: i32,
    /// Share of characters the vocabulary must cover.
    pub character_coverage: f64,
    /// Maximum number of sentences loaded; `0` loads all.
    pub input_sentence_size: u64,
    /// Whether to sample input sentences up front.
    pub shuffle_input_sentence: bool,
    /// Number of seed pieces.
    pub seed_sentencepiece_size: i32,
    /// Fraction of pieces kept per pruning step.
    pub shrinking_factor: f64,
    /// Worker threads.
    pub num_threads: i32,
    /// EM sub-iterations.
    pub num_sub_iterations: i32,
    /// Longest piece, in characters.
    pub max_sentencepiece_length: i32,
    /// Longest sentence, in bytes.
    pub max_sentence_length: i32,
    /// Split pieces at Unicode script boundaries.
    pub split_by_unicode_script: bool,
    /// Split pieces at digits.
    pub split_by_number: bool,
    /// Split pieces at whitespace.
    pub split_by_whitespace: bool,
    /// Make every digit its own piece.
    pub split_digits: bool,
    /// Pre-tokenization delimiter.
    pub pretokenization_delimiter: String,
    /// Attach the whitespace marker as a suffix.
    pub treat_whitespace_as_suffix: bool,
    /// Allow pieces made only of whitespace.
    pub allow_whitespace_only_pieces: bool,
    /// Control symbols, from the flag and then the file.
    pub control_symbols: Vec<String>,
    /// User-defined symbols, from the flag and then the file.
    pub user_defined_symbols: Vec<String>,
    /// Characters always kept in the character set.
    pub required_chars: String,
    /// Decompose unknown pieces into bytes.
    pub byte_fallback: bool,
    /// Write scores to the vocabulary file.
    pub vocabulary_output_piece_score: bool,
    /// Treat `vocab_size` as a hard limit.
    pub hard_vocab_limit: bool,
    /// Use every token as vocabulary.
    pub use_all_vocab: bool,
    /// Id of `<unk>`.
    pub unk_id: i32,
    /// Id of `<s>`, `-1` to disable.
    pub bos_id: i32,
    /// Id of `</s>`, `-1` to disable.
    pub eos_id: i32,
    /// Id of `<pad>`, `-1` to disable.
    pub pad_id: i32,
    /// Surface of the unknown piece.
    pub unk_piece: String,
    /// Surface of the sentence-begin piece.
    pub bos_piece: String,
    /// Surface of the sentence-end piece.
    pub eos_piece: String,
    /// Surface of the padding piece.
    pub pad_piece: String,
    /// Text `<unk>` decodes to.
    pub unk_surface: String,
    /// Use wider counters for very large corpora.
    pub train_extremely_large_corpus: bool,
    /// Generator seed, if one was given.
    pub random_seed: Option<u32>,
    /// Train with differential privacy.
    pub enable_differential_privacy: bool,
    /// Noise added for differential privacy.
    pub differential_privacy_noise_level: f64,
    /// Count clipping threshold for differential privacy.
    pub differential_privacy_clipping_threshold: u64,
}

/// Normalizer applied to the training corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizerSettings {
    /// Built-in rule set name.
    pub name: String,
    /// Custom rule file, overriding `name` when set.
    pub normalization_rule_tsv: String,
    /// Prepend the whitespace marker.
    pub add_dummy_prefix: bool,
    /// Collapse runs of whitespace.
    pub remove_extra_whitespaces: bool,
}

/// Denormalizer applied when decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenormalizerSettings {
    /// Rule file.
    pub normalization_rule_tsv: String,
    /// Always `false` for denormalization.
    pub add_dummy_prefix: bool,
    /// Always `false` for denormalization.
    pub remove_extra_whitespaces: bool,
    /// Always `false` for denormalization.
    pub escape_whitespaces: bool,
}

/// Resolved `spm_train` configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainSettings {
    /// Trainer options.
    pub trainer: TrainerSettings,
    /// Normalizer options.
    pub normalizer: NormalizerSettings,
    /// Denormalizer options, when a rule file was given.
    pub denormalizer: Option<DenormalizerSettings>,
}

impl FlagTable for TrainFlags {
    type Settings = TrainSettings;

    #[expect(
        clippy::too_many_lines,
        reason = "one declaration per trainer option keeps the table readable"
    )]
    fn declare(registry: &mut FlagRegistry) -> Result<Self, FlagError> {
        Ok(Self {
            input: Flag::new(registry, "input", String::new(), "comma separated list of input sentences")?,
            input_format: Flag::new(
                registry,
                "input_format",
                String::new(),
                "Input format. Supported format is `text` or `tsv`.",
            )?,
            model_prefix: Flag::new(registry, "model_prefix", String::new(), "output model prefix")?,
            model_type: Flag::new(
                registry,
                "model_type",
                String::from("unigram"),
                "model algorithm: unigram, bpe, word or char",
            )?,
            vocab_size: Flag::new(registry, "vocab_size", 8000_i32, "vocabulary size")?,
            accept_language: Flag::new(
                registry,
                "accept_language",
                String::new(),
                "comma-separated list of languages this model can accept",
            )?,
            self_test_sample_size: Flag::new(
                registry,
                "self_test_sample_size",
                0_i32,
                "the size of self test samples",
            )?,
            character_coverage: Flag::new(
                registry,
                "character_coverage",
                0.9995_f64,
                "character coverage to determine the minimum symbols",
            )?,
            input_sentence_size: Flag::new(
                registry,
                "input_sentence_size",
                0_u64,
                "maximum size of sentences the trainer loads",
            )?,
            shuffle_input_sentence: Flag::new(
                registry,
                "shuffle_input_sentence",
                true,
                "Randomly sample input sentences in advance. Valid when --input_sentence_size > 0",
            )?,
            seed_sentencepiece_size: Flag::new(
                registry,
                "seed_sentencepiece_size",
                1_000_000_i32,
                "the size of seed sentencepieces",
            )?,
            shrinking_factor: Flag::new(
                registry,
                "shrinking_factor",
                0.75_f64,
                "Keeps top shrinking_factor pieces with respect to the loss",
            )?,
            num_threads: Flag::new(registry, "num_threads", 16_i32, "number of threads for training")?,
            num_sub_iterations: Flag::new(
                registry,
                "num_sub_iterations",
                2_i32,
                "number of EM sub-iterations",
            )?,
            max_sentencepiece_length: Flag::new(
                registry,
                "max_sentencepiece_length",
                16_i32,
                "maximum length of sentence piece",
            )?,
            max_sentence_length: Flag::new(
                registry,
                "max_sentence_length",
                4192_i32,
                "maximum length of sentence in byte",
            )?,
            split_by_unicode_script: Flag::new(
                registry,
                "split_by_unicode_script",
                true,
                "use Unicode script to split sentence pieces",
            )?,
            split_by_number: Flag::new(registry, "split_by_number", true, "split tokens by numbers (0-9)")?,
            split_by_whitespace: Flag::new(
                registry,
                "split_by_whitespace",
                true,
                "use a white space to split sentence pieces",
            )?,
            split_digits: Flag::new(
                registry,
                "split_digits",
                false,
                "split all digits (0-9) into separate pieces",
            )?,
            pretokenization_delimiter: Flag::new(
                registry,
                "pretokenization_delimiter",
                String::new(),
                "specifies the delimiter of pre-tokenization",
            )?,
            treat_whitespace_as_suffix: Flag::new(
                registry,
                "treat_whitespace_as_suffix",
                false,
                "treat whitespace marker as suffix instead of prefix.",
            )?,
            allow_whitespace_only_pieces: Flag::new(
                registry,
                "allow_whitespace_only_pieces",
                false,
                "allow pieces that only contain (consecutive) whitespace tokens",
            )?,
            control_symbols: Flag::new(
                registry,
                "control_symbols",
                String::new(),
                "comma separated list of control symbols",
            )?,
            control_symbols_file: Flag::new(
                registry,
                "control_symbols_file",
                String::new(),
                "load control_symbols from file.",
            )?,
            user_defined_symbols: Flag::new(
                registry,
                "user_defined_symbols",
                String::new(),
                "comma separated list of user defined symbols",
            )?,
            user_defined_symbols_file: Flag::new(
                registry,
                "user_defined_symbols_file",
                String::new(),
                "load user_defined_symbols from file.",
            )?,
            required_chars: Flag::new(
                registry,
                "required_chars",
                String::new(),
                "UTF8 characters in this flag are always used in the character set regardless of --character_coverage",
            )?,
            required_chars_file: Flag::new(
                registry,
                "required_chars_file",
                String::new(),
                "load required_chars from file.",
            )?,
            byte_fallback: Flag::new(
                registry,
                "byte_fallback",
                false,
                "decompose unknown pieces into UTF-8 byte pieces",
            )?,
            vocabulary_output_piece_score: Flag::new(
                registry,
                "vocabulary_output_piece_score",
                true,
                "Define score in vocab file",
            )?,
            normalization_rule_name: Flag::new(
                registry,
                "normalization_rule_name",
                String::from("nmt_nfkc"),
                "Normalization rule name. Choose from nfkc or identity",
            )?,
            normalization_rule_tsv: Flag::new(
                registry,
                "normalization_rule_tsv",
                String::new(),
                "Normalization rule TSV file. ",
            )?,
            denormalization_rule_tsv: Flag::new(
                registry,
                "denormalization_rule_tsv",
                String::new(),
                "Denormalization rule TSV file.",
            )?,
            add_dummy_prefix: Flag::new(
                registry,
                "add_dummy_prefix",
                true,
                "Add dummy whitespace at the beginning of text",
            )?,
            remove_extra_whitespaces: Flag::new(
                registry,
                "remove_extra_whitespaces",
                true,
                "Removes leading, trailing, and duplicate internal whitespace",
            )?,
            hard_vocab_limit: Flag::new(
                registry,
                "hard_vocab_limit",
                true,
                "If set to false, --vocab_size is considered as a soft limit.",
            )?,
            use_all_vocab: Flag::new(
                registry,
                "use_all_vocab",
                false,
                "If set to true, use all tokens as vocab. Valid for word/char models.",
            )?,
            unk_id: Flag::new(registry, "unk_id", 0_i32, "Override UNK (<unk>) id.")?,
            bos_id: Flag::new(registry, "bos_id", 1_i32, "Override BOS (<s>) id. Set -1 to disable BOS.")?,
            eos_id: Flag::new(registry, "eos_id", 2_i32, "Override EOS (</s>) id. Set -1 to disable EOS.")?,
            pad_id: Flag::new(registry, "pad_id", -1_i32, "Override PAD (<pad>) id. Set -1 to disable PAD.")?,
            unk_piece: Flag::new(registry, "unk_piece", String::from("<unk>"), "Override UNK (<unk>) piece.")?,
            bos_piece: Flag::new(registry, "bos_piece", String::from("<s>"), "Override BOS (<s>) piece.")?,
            eos_piece: Flag::new(registry, "eos_piece", String::from("</s>"), "Override EOS (</s>) piece.")?,
            pad_piece: Flag::new(registry, "pad_piece", String::from("<pad>"), "Override PAD (<pad>) piece.")?,
            unk_surface: Flag::new(
                registry,
                "unk_surface",
                String::from(" \u{2047} "),
                "Dummy surface string for <unk>. In decoding <unk> is decoded to `unk_surface`.",
            )?,
            train_extremely_large_corpus: Flag::new(
                registry,
                "train_extremely_large_corpus",
                false,
                "Increase bit depth for unigram tokenization.",
            )?,
            random_seed: Flag::new(
                registry,
                "random_seed",
                UNSET_RANDOM_SEED,
                "Seed value for random generator.",
            )?,
            enable_differential_privacy: Flag::new(
                registry,
                "enable_differential_privacy",
                false,
                "Whether to add DP while training. Currently supported only by UNIGRAM model.",
            )?,
            differential_privacy_noise_level: Flag::new(
                registry,
                "differential_privacy_noise_level",
                0.0_f64,
                "Amount of noise to add for DP",
            )?,
            differential_privacy_clipping_threshold: Flag::new(
                registry,
                "differential_privacy_clipping_threshold",
                0_u64,
                "Threshold for clipping the counts for DP",
            )?,
        })
    }

    fn resolve(&self, registry: &FlagRegistry, _positionals: &Positionals) -> Result<TrainSettings> {
        Ok(TrainSettings {
            trainer: self.trainer(registry)?,
            normalizer: NormalizerSettings {
                name: self.normalization_rule_name.value(registry).clone(),
                normalization_rule_tsv: self.normalization_rule_tsv.value(registry).clone(),
                add_dummy_prefix: *self.add_dummy_prefix.value(registry),
                remove_extra_whitespaces: *self.remove_extra_whitespaces.value(registry),
            },
            denormalizer: self.denormalizer(registry),
        })
    }
}

impl TrainFlags {
    fn trainer(&self, registry: &FlagRegistry) -> Result<TrainerSettings> {
        let input = required(self.input, registry, "input")?;
        let model_prefix = required(self.model_prefix, registry, "model_prefix")?;
        let model_type_name = self.model_type.value(registry);
        let model_type = ModelType::parse(model_type_name).ok_or_else(|| ToolError::UnknownModelType {
            value: model_type_name.clone(),
        })?;

        let mut control_symbols = split_csv(self.control_symbols.value(registry));
        control_symbols.extend(read_lines_from(self.control_symbols_file.value(registry))?);
        let mut user_defined_symbols = split_csv(self.user_defined_symbols.value(registry));
        user_defined_symbols.extend(read_lines_from(self.user_defined_symbols_file.value(registry))?);
        let required_chars = match self.required_chars_file.value(registry).as_str() {
            "" => self.required_chars.value(registry).clone(),
            path => read_lines(path)?.concat(),
        };

        let random_seed = Some(*self.random_seed.value(registry)).filter(|&seed| seed != UNSET_RANDOM_SEED);
        if let Some(seed) = random_seed {
            debug!(seed, "seeding random generator");
        }

        Ok(TrainerSettings {
            input: split_csv(&input),
            input_format: self.input_format.value(registry).clone(),
            model_prefix,
            model_type,
            vocab_size: *self.vocab_size.value(registry),
            accept_language: split_csv(self.accept_language.value(registry)),
            self_test_sample_size: *self.self_test_sample_size.value(registry),
            character_coverage: *self.character_coverage.value(registry),
            input_sentence_size: *self.input_sentence_size.value(registry),
            shuffle_input_sentence: *self.shuffle_input_sentence.value(registry),
            seed_sentencepiece_size: *self.seed_sentencepiece_size.value(registry),
            shrinking_factor: *self.shrinking_factor.value(registry),
            num_threads: *self.num_threads.value(registry),
            num_sub_iterations: *self.num_sub_iterations.value(registry),
            max_sentencepiece_length: *self.max_sentencepiece_length.value(registry),
            max_sentence_length: *self.max_sentence_length.value(registry),
            split_by_unicode_script: *self.split_by_unicode_script.value(registry),
            split_by_number: *self.split_by_number.value(registry),
            split_by_whitespace: *self.split_by_whitespace.value(registry),
            split_digits: *self.split_digits.value(registry),
            pretokenization_delimiter: self.pretokenization_delimiter.value(registry).clone(),
            treat_whitespace_as_suffix: *self.treat_whitespace_as_suffix.value(registry),
            allow_whitespace_only_pieces: *self.allow_whitespace_only_pieces.value(registry),
            control_symbols,
            user_defined_symbols,
            required_chars,
            byte_fallback: *self.byte_fallback.value(registry),
            vocabulary_output_piece_score: *self.vocabulary_output_piece_score.value(registry),
            hard_vocab_limit: *self.hard_vocab_limit.value(registry),
            use_all_vocab: *self.use_all_vocab.value(registry),
            unk_id: *self.unk_id.value(registry),
            bos_id: *self.bos_id.value(registry),
            eos_id: *self.eos_id.value(registry),
            pad_id: *self.pad_id.value(registry),
            unk_piece: self.unk_piece.value(registry).clone(),
            bos_piece: self.bos_piece.value(registry).clone(),
            eos_piece: self.eos_piece.value(registry).clone(),
            pad_piece: self.pad_piece.value(registry).clone(),
            unk_surface: self.unk_surface.value(registry).clone(),
            train_extremely_large_corpus: *self.train_extremely_large_corpus.value(registry),
            random_seed,
            enable_differential_privacy: *self.enable_differential_privacy.value(registry),
            differential_privacy_noise_level: *self.differential_privacy_noise_level.value(registry),
            differential_privacy_clipping_threshold: *self
                .differential_privacy_clipping_threshold
                .value(registry),
        })
    }

    fn denormalizer(&self, registry: &FlagRegistry) -> Option<DenormalizerSettings> {
        let tsv = self.denormalization_rule_tsv.value(registry);
        (!tsv.is_empty()).then(|| DenormalizerSettings {
            normalization_rule_tsv: tsv.clone(),
            add_dummy_prefix: false,
            remove_extra_whitespaces: false,
            escape_whitespaces: false,
        })
    }
}

fn required(flag: Flag<String>, registry: &FlagRegistry, name: &'static str) -> Result<String> {
    let value = flag.value(registry);
    if value.is_empty() {
        return Err(ToolError::MissingRequired { flag: name });
    }
    Ok(value.clone())
}

/// Lines of `path`, or nothing when `path` is empty.
fn read_lines_from(path: &str) -> Result<Vec<String>> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    read_lines(path)
}

fn read_lines(path: &str) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| ToolError::ReadFile {
        path: Path::new(path).to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_owned).collect())
}

#[cfg(test)]
mod tests;
