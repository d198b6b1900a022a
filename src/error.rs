//! Error and warning types shared across the crate.
//!
//! Initialization errors (resource loading) are fatal; per-line errors are
//! isolated by the caller so one bad input line never kills a batch.

use std::fmt;
use std::path::PathBuf;

/// Fatal error while loading a resource data file.
#[derive(Debug, Clone)]
pub struct ResourceError {
    /// File the error occurred in.
    pub file: PathBuf,
    /// One-based line number, 0 when the error is not tied to a line.
    pub line: usize,
    /// The offending rule text, if any.
    pub rule: Option<String>,
    pub message: String,
}

impl ResourceError {
    pub fn new(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            rule: None,
            message: message.into(),
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file.display(), self.line, self.message)?;
        if let Some(rule) = &self.rule {
            write!(f, " in rule `{}`", rule)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResourceError {}

/// Errors raised while tokenizing a single line.
#[derive(Debug, Clone)]
pub enum TokenizeError {
    /// The finalized chart violated coverage or ordering invariants.
    Internal(String),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::Internal(msg) => write!(f, "Tokenization error: {}", msg),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Errors raised while detokenizing a line.
#[derive(Debug, Clone)]
pub enum DetokenizeError {
    InvalidMarkup(String),
}

impl fmt::Display for DetokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetokenizeError::InvalidMarkup(msg) => write!(f, "Invalid markup: {}", msg),
        }
    }
}

impl std::error::Error for DetokenizeError {}

/// Non-fatal diagnostic produced during loading or processing.
///
/// The library never writes to stderr itself; warnings are collected and
/// handed to the caller, which decides how to render them.
#[derive(Debug, Clone)]
pub struct Warning {
    pub file: Option<PathBuf>,
    pub line: Option<usize>,
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            file: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn in_file(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: Some(file.into()),
            line: Some(line),
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => {
                write!(f, "{}:{}: {}", file.display(), line, self.message)
            }
            (Some(file), None) => write!(f, "{}: {}", file.display(), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}
