use serde::{Deserialize, Serialize};

/// The broad category an error belongs to, used by callers to decide how to react
/// (e.g. a `SecurityViolation` is reported differently from an `Io` failure).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The lesson content could not be turned into the defaulted model.
    ContentValidation,
    /// The requested output path resolves outside of the allowed directories.
    SecurityViolation,
    /// Something went wrong while emitting slides or encoding the PDF.
    Render,
    /// Reading the input or writing the final artifact failed.
    Io,
    /// The deck configuration file is unreadable or malformed.
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::ContentValidation => "content validation error",
            ErrorKind::SecurityViolation => "security violation",
            ErrorKind::Render => "render error",
            ErrorKind::Io => "I/O error",
            ErrorKind::Configuration => "configuration error",
        };
        write!(formatter, "{}", name)
    }
}

/// A struct that represents an error with a kind, a context and possibly the propagated source error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ContextError {
    pub kind: ErrorKind,
    pub context: String,
    pub source_error: Option<String>,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source_error {
            Some(source_error) => write!(
                formatter,
                "{}: {}",
                self.context,
                minimize_first_letter(source_error.to_string()),
            ),
            None => write!(formatter, "{}", self.context),
        }
    }
}

impl std::error::Error for ContextError {}

impl ContextError {
    /// Create a new `ContextError` of the given kind with the given context.
    pub fn with_context<S: Into<String>>(kind: ErrorKind, context: S) -> ContextError {
        ContextError {
            kind,
            context: context.into(),
            source_error: None,
        }
    }

    /// Create a new `ContextError` of the given kind with the given context and source error.
    pub fn with_error<S: Into<String>>(
        kind: ErrorKind,
        context: S,
        error: &dyn std::error::Error,
    ) -> ContextError {
        ContextError {
            kind,
            context: context.into(),
            source_error: Some(error.to_string()),
        }
    }

    pub fn validation<S: Into<String>>(context: S) -> ContextError {
        ContextError::with_context(ErrorKind::ContentValidation, context)
    }

    pub fn security<S: Into<String>>(context: S) -> ContextError {
        ContextError::with_context(ErrorKind::SecurityViolation, context)
    }

    pub fn render<S: Into<String>>(context: S) -> ContextError {
        ContextError::with_context(ErrorKind::Render, context)
    }

    /// Whether this error was raised because of a rejected output path.
    pub fn is_security_violation(&self) -> bool {
        self.kind == ErrorKind::SecurityViolation
    }
}

/// Minimizes the first letter of a string, it is used for standardizing the error message.
fn minimize_first_letter(string: String) -> String {
    let mut characters = string.chars();
    match characters.next() {
        None => String::new(),
        Some(character) => character.to_lowercase().chain(characters).collect(),
    }
}
