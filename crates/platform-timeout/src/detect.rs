use std::fmt;

use crate::error::{ClientError, ErrorValue};
use crate::shape::{ErrorShape, StatusShape, WrappedError};
use crate::signature::{GATEWAY_TIMEOUT_STATUS, SYNTAX_ERROR_NAME, UNEXPECTED_TOKEN_FRAGMENT};

/// A failed call as seen by the caller: a thrown error or a received response
#[derive(Clone, Copy)]
pub enum Failure<'a> {
    /// Error raised while making the call or reading its body
    Error(&'a dyn ErrorShape),
    /// Response that came back from the platform
    Response(&'a dyn StatusShape),
}

impl<'a> Failure<'a> {
    /// Classify `error` by its name and message
    pub fn error<E: ErrorShape>(error: &'a E) -> Self {
        Self::Error(error)
    }

    /// Classify `response` by its status code
    pub fn status<R: StatusShape>(response: &'a R) -> Self {
        Self::Response(response)
    }
}

impl fmt::Debug for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => f
                .debug_struct("Error")
                .field("name", &error.name())
                .field("message", &error.message())
                .finish(),
            Self::Response(response) => f
                .debug_struct("Response")
                .field("status", &response.status_code())
                .finish(),
        }
    }
}

impl<'a> From<&'a ErrorValue> for Failure<'a> {
    fn from(error: &'a ErrorValue) -> Self {
        Self::Error(error)
    }
}

impl<'a> From<&'a ClientError> for Failure<'a> {
    fn from(error: &'a ClientError) -> Self {
        Self::Error(error)
    }
}

impl<'a> From<&'a serde_json::Value> for Failure<'a> {
    fn from(report: &'a serde_json::Value) -> Self {
        Self::Error(report)
    }
}

impl<'a> From<&'a http::StatusCode> for Failure<'a> {
    fn from(status: &'a http::StatusCode) -> Self {
        Self::Response(status)
    }
}

impl<'a, B: 'a> From<&'a http::Response<B>> for Failure<'a> {
    fn from(response: &'a http::Response<B>) -> Self {
        Self::Response(response)
    }
}

#[cfg(feature = "reqwest")]
impl<'a> From<&'a reqwest::Response> for Failure<'a> {
    fn from(response: &'a reqwest::Response) -> Self {
        Self::Response(response)
    }
}

#[cfg(feature = "reqwest")]
impl<'a> From<&'a reqwest::Error> for Failure<'a> {
    fn from(error: &'a reqwest::Error) -> Self {
        Self::Response(error)
    }
}

/// Whether an RPC client error was caused by a platform invocation timeout
///
/// True only when the error wraps a cause that carries the timeout
/// `SyntaxError` signature. Suitable as a retry predicate:
///
/// ```
/// use platform_timeout::{ClientError, ErrorValue, is_platform_invocation_timeout};
///
/// let err = ClientError::new("Unexpected token 'A'").with_cause(ErrorValue::syntax_error(
///     "Unexpected token 'A', \"An error o\"... is not valid JSON",
/// ));
///
/// let should_retry = |attempt: u32| attempt < 3 && is_platform_invocation_timeout(&err);
/// assert!(should_retry(1));
/// ```
pub fn is_platform_invocation_timeout(err: &ClientError) -> bool {
    is_wrapped_invocation_timeout(err)
}

/// [`is_platform_invocation_timeout`] for any error exposing a cause
pub fn is_wrapped_invocation_timeout<E: WrappedError + ?Sized>(err: &E) -> bool {
    err.cause().is_some_and(is_timeout_syntax_error)
}

/// Whether a failed call hit a platform invocation timeout
///
/// Errors are matched against the timeout `SyntaxError` signature;
/// responses match only on status `504`.
///
/// ```
/// use platform_timeout::{ErrorValue, is_platform_timeout};
///
/// assert!(is_platform_timeout(&http::StatusCode::GATEWAY_TIMEOUT));
/// assert!(!is_platform_timeout(&http::StatusCode::BAD_GATEWAY));
///
/// let parse_err = ErrorValue::syntax_error(
///     "Unexpected token 'A', \"An error o\"... is not valid JSON",
/// );
/// assert!(is_platform_timeout(&parse_err));
/// ```
pub fn is_platform_timeout<'a>(value: impl Into<Failure<'a>>) -> bool {
    match value.into() {
        Failure::Error(error) => is_timeout_syntax_error(error),
        Failure::Response(response) => {
            let timed_out = response.status_code() == Some(GATEWAY_TIMEOUT_STATUS);
            if timed_out {
                tracing::debug!(
                    signal = "status",
                    status = GATEWAY_TIMEOUT_STATUS,
                    "platform invocation timeout detected"
                );
            }
            timed_out
        }
    }
}

/// Matches the error V8's `JSON.parse` throws on the plain-text timeout page
fn is_timeout_syntax_error(error: &dyn ErrorShape) -> bool {
    let matched = error.name() == Some(SYNTAX_ERROR_NAME)
        && error
            .message()
            .is_some_and(|message| message.contains(UNEXPECTED_TOKEN_FRAGMENT));

    if matched {
        tracing::debug!(
            signal = "syntax_error",
            "platform invocation timeout detected"
        );
    }

    matched
}
