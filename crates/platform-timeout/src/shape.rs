//! Read-only views over the values a caller hands to the detector
//!
//! Every accessor returns `Option` so malformed input can be expressed
//! and is classified as a non-match instead of failing.

/// Error with a JavaScript-style `name` and `message`
pub trait ErrorShape {
    /// Error class name (e.g. `SyntaxError`)
    fn name(&self) -> Option<&str>;

    /// Human-readable message
    fn message(&self) -> Option<&str>;
}

/// Error produced by a client layer that may wrap a lower-level cause
pub trait WrappedError {
    /// The wrapped error, if any
    fn cause(&self) -> Option<&dyn ErrorShape>;
}

/// Response-like value carrying an HTTP status code
pub trait StatusShape {
    /// Numeric status code, `None` when the value has none
    fn status_code(&self) -> Option<u16>;
}

// -- serde_json error reports --

impl ErrorShape for serde_json::Value {
    fn name(&self) -> Option<&str> {
        self.get("name").and_then(serde_json::Value::as_str)
    }

    fn message(&self) -> Option<&str> {
        self.get("message").and_then(serde_json::Value::as_str)
    }
}

impl WrappedError for serde_json::Value {
    fn cause(&self) -> Option<&dyn ErrorShape> {
        self.get("cause")
            .filter(|cause| !cause.is_null())
            .map(|cause| cause as &dyn ErrorShape)
    }
}

// -- Status codes --

impl StatusShape for u16 {
    fn status_code(&self) -> Option<u16> {
        Some(*self)
    }
}

impl StatusShape for Option<u16> {
    fn status_code(&self) -> Option<u16> {
        *self
    }
}

impl StatusShape for http::StatusCode {
    fn status_code(&self) -> Option<u16> {
        Some(self.as_u16())
    }
}

impl<B> StatusShape for http::Response<B> {
    fn status_code(&self) -> Option<u16> {
        Some(self.status().as_u16())
    }
}

impl StatusShape for http::response::Parts {
    fn status_code(&self) -> Option<u16> {
        Some(self.status.as_u16())
    }
}

#[cfg(feature = "reqwest")]
impl StatusShape for reqwest::Response {
    fn status_code(&self) -> Option<u16> {
        Some(self.status().as_u16())
    }
}

/// Only errors raised from a response (e.g. `error_for_status`) carry a status
#[cfg(feature = "reqwest")]
impl StatusShape for reqwest::Error {
    fn status_code(&self) -> Option<u16> {
        self.status().map(|status| status.as_u16())
    }
}
