//! Error families raised by state validation, the sampler contract and run configuration.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic attached to every [`MatchingsError`].
///
/// `code` is the kebab-case identifier tests match on (`label-repeated`,
/// `proposal-length-mismatch`, `zero-thinning`, ...). `context` carries the
/// offending values, typically a label, a vertex, a size or a file path,
/// rendered in key order so messages are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case error code.
    pub code: String,
    /// What went wrong.
    pub message: String,
    /// Offending values keyed by name.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, if there is an obvious one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Builds a diagnostic with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records an offending value, e.g. `("label", 7)` or `("right_size", 4)`.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Renders as `[code] message {key=value, ...} hint: ...`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " {{{}}}", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " hint: {hint}"),
            None => Ok(()),
        }
    }
}

/// Canonical error type for the matchings samplers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum MatchingsError {
    /// A permutation or matching failed validation.
    #[error("state error: {0}")]
    State(ErrorInfo),
    /// An external collaborator broke its contract (e.g. a proposal of the wrong length).
    #[error("contract error: {0}")]
    Contract(ErrorInfo),
    /// Run configuration was rejected.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization, parsing and artefact I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl MatchingsError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            MatchingsError::State(info)
            | MatchingsError::Contract(info)
            | MatchingsError::Config(info)
            | MatchingsError::Serde(info) => info,
        }
    }

    /// Stable code of the underlying payload.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
