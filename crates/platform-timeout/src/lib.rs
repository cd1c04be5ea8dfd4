#![allow(clippy::must_use_candidate)]

//! Detect Vercel function invocation timeouts from client-side failures
//!
//! A timed-out function surfaces either as a `504` response or, when the
//! caller parsed the plain-text timeout page as JSON, as a `SyntaxError`
//! whose message quotes the page's first character. Both checks are
//! independent; callers decide whether to retry.
//!
//! The `SyntaxError` check matches literal text from one JSON parser and
//! one platform page (see [`signature`]) and breaks silently if either
//! changes upstream.

mod detect;
pub mod error;
pub mod shape;
pub mod signature;

pub use detect::{
    Failure, is_platform_invocation_timeout, is_platform_timeout, is_wrapped_invocation_timeout,
};
pub use error::{ClientError, ErrorValue, PlatformTimeoutError, Result};
pub use shape::{ErrorShape, StatusShape, WrappedError};
