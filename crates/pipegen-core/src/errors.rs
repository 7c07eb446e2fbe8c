//! Structured error types shared across pipegen crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`PipegenError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (slot positions, parameter names, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the operator fix the template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the pipeline generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum PipegenError {
    /// Template structure errors (missing `chainer`, malformed slots, ...).
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Requested search mode is not supported.
    #[error("mode error: {0}")]
    Mode(ErrorInfo),
    /// Search values that the active mode cannot enumerate.
    #[error("search error: {0}")]
    Search(ErrorInfo),
    /// Parameter sampler failures.
    #[error("sampler error: {0}")]
    Sampler(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// Filesystem errors raised by loaders and writers.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl PipegenError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        let (PipegenError::Config(info)
        | PipegenError::Mode(info)
        | PipegenError::Search(info)
        | PipegenError::Sampler(info)
        | PipegenError::Serde(info)
        | PipegenError::Io(info)) = self;
        info
    }

    /// Lowercase family name, matching the `Display` prefix.
    pub fn family(&self) -> &'static str {
        match self {
            PipegenError::Config(_) => "config",
            PipegenError::Mode(_) => "mode",
            PipegenError::Search(_) => "search",
            PipegenError::Sampler(_) => "sampler",
            PipegenError::Serde(_) => "serde",
            PipegenError::Io(_) => "io",
        }
    }

    /// Attaches a context entry (slot position, alternative index, ...)
    /// while keeping the error family.
    pub fn in_context(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            PipegenError::Config(info) => PipegenError::Config(info.with_context(key, value)),
            PipegenError::Mode(info) => PipegenError::Mode(info.with_context(key, value)),
            PipegenError::Search(info) => PipegenError::Search(info.with_context(key, value)),
            PipegenError::Sampler(info) => PipegenError::Sampler(info.with_context(key, value)),
            PipegenError::Serde(info) => PipegenError::Serde(info.with_context(key, value)),
            PipegenError::Io(info) => PipegenError::Io(info.with_context(key, value)),
        }
    }

    /// Shorthand for a [`PipegenError::Config`] with the given code and message.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        PipegenError::Config(ErrorInfo::new(code, message))
    }
}
