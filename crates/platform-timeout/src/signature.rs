//! Literal fingerprints of a Vercel function invocation timeout
//!
//! These values are coupled to behavior this crate does not control.
//! If Vercel rewords its timeout page, or V8 changes how `JSON.parse`
//! phrases its errors, detection silently stops matching. Keep them
//! verbatim.

/// HTTP status returned when a function exceeds its execution limit
pub const GATEWAY_TIMEOUT_STATUS: u16 = 504;

/// `Error.name` of a JSON parse failure in JavaScript runtimes
pub const SYNTAX_ERROR_NAME: &str = "SyntaxError";

/// Fragment V8 puts in a `JSON.parse` error when the body starts with `A`
pub const UNEXPECTED_TOKEN_FRAGMENT: &str = "Unexpected token 'A',";

/// Start of the plain-text body served for an invocation timeout
///
/// Its leading `A` is the unexpected token in [`UNEXPECTED_TOKEN_FRAGMENT`]
pub const TIMEOUT_PAGE_PREFIX: &str =
    "An error occurred with your deployment\n\nFUNCTION_INVOCATION_TIMEOUT";
