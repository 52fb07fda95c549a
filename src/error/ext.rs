//! Extension trait for attaching context to Results
//!
//! Mirrors the free functions in [`attach`](super::attach) for the error path
//! of a `Result`, so context can be added with `?` in the same expression.

use super::{BoxError, ContextualError};
use serde::Serialize;

/// Result whose error carries diagnostic context
pub type ContextResult<T> = Result<T, ContextualError>;

/// Extension trait for attaching context to Results
///
/// # Examples
///
/// ```
/// use errctx::{ContextResult, ResultExt, StaticError};
///
/// const ERR_PARSE: StaticError = StaticError::new("invalid port");
///
/// fn parse_port(raw: &str) -> ContextResult<u16> {
///     let port = raw
///         .parse::<u16>()
///         .map_err(|_| ERR_PARSE)
///         .with_key_msg("input", raw)?;
///     Ok(port)
/// }
///
/// let err = parse_port("http").unwrap_err();
/// assert!(err.is(&ERR_PARSE));
/// ```
pub trait ResultExt<T> {
    /// Attach a message to the error
    fn with_msg(self, msg: impl Into<String>) -> ContextResult<T>;

    /// Attach a message computed only if an error occurred
    fn with_msg_lazy<F>(self, f: F) -> ContextResult<T>
    where
        F: FnOnce() -> String;

    /// Attach a value to the error
    fn with_val<V: Serialize>(self, val: V) -> ContextResult<T>;

    /// Attach a message under an explicit key
    fn with_key_msg(self, key: impl Into<String>, msg: impl Into<String>) -> ContextResult<T>;

    /// Attach a value under an explicit key
    fn with_key_val<V: Serialize>(self, key: impl Into<String>, val: V) -> ContextResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn with_msg(self, msg: impl Into<String>) -> ContextResult<T> {
        self.map_err(|e| super::with_msg(e, msg))
    }

    fn with_msg_lazy<F>(self, f: F) -> ContextResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| super::with_msg(e, f()))
    }

    fn with_val<V: Serialize>(self, val: V) -> ContextResult<T> {
        self.map_err(|e| super::with_val(e, val))
    }

    fn with_key_msg(self, key: impl Into<String>, msg: impl Into<String>) -> ContextResult<T> {
        self.map_err(|e| super::with_key_msg(e, key, msg))
    }

    fn with_key_val<V: Serialize>(self, key: impl Into<String>, val: V) -> ContextResult<T> {
        self.map_err(|e| super::with_key_val(e, key, val))
    }
}
