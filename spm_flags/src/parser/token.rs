//! Classification of individual `argv` tokens.

/// A single `argv` entry after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Anything that is not a flag token.
    Positional,
    /// `-name`, `--name`, `-name=value` or `--name=value`.
    Flag {
        name: String,
        inline_value: Option<String>,
    },
}

/// Classifies `raw`.
///
/// One or two leading dashes are stripped; what remains up to the first `=`
/// is the name. An empty name (`-`, `--`, `--=x`) makes the token
/// positional.
pub(crate) fn classify(raw: &str) -> Token {
    let Some(body) = raw.strip_prefix("--").or_else(|| raw.strip_prefix('-')) else {
        return Token::Positional;
    };
    let (name, inline_value) = match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    };
    if name.is_empty() {
        return Token::Positional;
    }
    Token::Flag {
        name: name.to_owned(),
        inline_value: inline_value.map(str::to_owned),
    }
}
