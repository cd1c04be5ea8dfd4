use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::shape::{ErrorShape, WrappedError};

/// Crate result type
pub type Result<T> = std::result::Result<T, PlatformTimeoutError>;

/// Errors from parsing forwarded error reports
#[derive(Debug, thiserror::Error)]
pub enum PlatformTimeoutError {
    /// Report was not valid JSON or had the wrong overall shape
    #[error("failed to parse error report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Error reported by a JavaScript client, reduced to `name` and `message`
///
/// Both fields are optional; a report with a missing or non-string field
/// deserializes with that field set to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    /// Error class name (e.g. `SyntaxError`)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub name: Option<String>,
    /// Human-readable message
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_string"
    )]
    pub message: Option<String>,
}

impl ErrorValue {
    /// Create an error value with both fields set
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            message: Some(message.into()),
        }
    }

    /// Create a `SyntaxError` as thrown by a failed `JSON.parse`
    pub fn syntax_error(message: impl Into<String>) -> Self {
        Self::new(crate::signature::SYNTAX_ERROR_NAME, message)
    }

    /// Parse a JSON error report
    ///
    /// # Errors
    ///
    /// Returns an error if `report` is not a JSON error report
    pub fn from_json(report: &str) -> Result<Self> {
        serde_json::from_str(report).map_err(Into::into)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.name, &self.message) {
            (Some(name), Some(message)) => write!(f, "{name}: {message}"),
            (Some(name), None) => f.write_str(name),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("Error"),
        }
    }
}

impl std::error::Error for ErrorValue {}

impl ErrorShape for ErrorValue {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Error from an RPC client layer, optionally wrapping the underlying failure
///
/// When the client optimistically parsed a non-JSON body, `cause` holds
/// the parser's `SyntaxError`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    /// Client-level message
    #[serde(default)]
    pub message: String,
    /// Underlying error
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_cause"
    )]
    #[source]
    pub cause: Option<ErrorValue>,
}

impl ClientError {
    /// Name reported for the client error itself
    pub const NAME: &'static str = "ClientError";

    /// Create a client error without a cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Attach the underlying error
    #[must_use]
    pub fn with_cause(mut self, cause: ErrorValue) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Parse a JSON client error report
    ///
    /// # Errors
    ///
    /// Returns an error if `report` is not a JSON error report
    pub fn from_json(report: &str) -> Result<Self> {
        serde_json::from_str(report).map_err(Into::into)
    }
}

impl ErrorShape for ClientError {
    fn name(&self) -> Option<&str> {
        Some(Self::NAME)
    }

    fn message(&self) -> Option<&str> {
        Some(self.message.as_str())
    }
}

impl WrappedError for ClientError {
    fn cause(&self) -> Option<&dyn ErrorShape> {
        self.cause.as_ref().map(|cause| cause as &dyn ErrorShape)
    }
}

/// Keep strings, drop any other JSON value
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

/// A cause that is not an object carries no name, so treat it as absent
fn lenient_cause<'de, D>(deserializer: D) -> std::result::Result<Option<ErrorValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;

    Ok(value
        .filter(serde_json::Value::is_object)
        .and_then(|cause| serde_json::from_value(cause).ok()))
}
