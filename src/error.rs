use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Warning,
    Info,
}

/// A structured, non-blocking message attached to a validation or commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn warning(code: &str, path: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Warning,
            code: code.to_string(),
            path: Some(path.to_string()),
            message: message.into(),
        }
    }

    pub(crate) fn info(code: &str, path: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Info,
            code: code.to_string(),
            path: Some(path.to_string()),
            message: message.into(),
        }
    }
}

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    UnclosedElement,
    NoRootElement,
    Encoding,
}

/// Produced by `parse` when the XML text cannot be turned into a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// A field-level validation failure. Never fatal; the user corrects the
/// input and retries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    /// Campaign id is empty, contains whitespace, or fails the format/date check.
    Format { message: String },
    /// Campaign id suffix and link prefix disagree.
    PairMismatch { expected: String, found: String },
    /// Subject contains an unrepairable KRHRED token or normalizes to nothing.
    TokenNormalization { message: String },
    /// Link does not start with `http://` or `https://`.
    InvalidLink { message: String },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Format { message } => write!(f, "{}", message),
            FieldError::PairMismatch { expected, found } => write!(
                f,
                "campaign id and link do not match: expected {}, found {}",
                expected, found
            ),
            FieldError::TokenNormalization { message } => write!(f, "{}", message),
            FieldError::InvalidLink { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for FieldError {}

/// Produced when a commit cannot be applied to the document. The document is
/// left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitError {
    /// No document is loaded.
    NoDocument,
    /// The element the field writes into is absent from the document.
    MissingElement(String),
    /// The field value was rejected.
    Field(FieldError),
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::NoDocument => write!(f, "no XML document is loaded"),
            CommitError::MissingElement(name) => write!(f, "{} not found in XML", name),
            CommitError::Field(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CommitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommitError::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldError> for CommitError {
    fn from(e: FieldError) -> Self {
        CommitError::Field(e)
    }
}

/// Produced when an editor configuration cannot be loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigError {
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Produced by a [`TextStore`](crate::store::TextStore) when reading or
/// writing fails.
#[derive(Debug)]
pub struct StoreError {
    pub handle: String,
    pub source: std::io::Error,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.handle, self.source)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

/// Combined error type for loading a document from a store.
#[derive(Debug)]
pub enum LoadError {
    Store(StoreError),
    Parse(ParseError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Store(e) => write!(f, "Store error: {}", e),
            LoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {}

/// Combined error type for saving a document to a store.
#[derive(Debug)]
pub enum SaveError {
    NoDocument,
    Serialize(SerializeError),
    Store(StoreError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::NoDocument => write!(f, "no XML document is loaded"),
            SaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
            SaveError::Store(e) => write!(f, "Store error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}
