//! Attaching context to any error
//!
//! Each function accepts anything convertible into a boxed error, reuses a
//! `ContextualError` already present in it, and returns the augmented wrapper.
//!
//! ```
//! use errctx::{with_msg, with_key_val, StaticError};
//!
//! const ERR_TIMEOUT: StaticError = StaticError::new("upstream timed out");
//!
//! let err = with_msg(ERR_TIMEOUT, "fetching profile");
//! let err = with_key_val(err, "attempt", 3);
//!
//! assert!(err.is(&ERR_TIMEOUT));
//! assert_eq!(err.context().len(), 2);
//! ```

use super::{BoxError, ContextualError};
use serde::Serialize;

/// Attach a message. The first entry of a context is keyed
/// [`FIRST_KEY`](crate::keys::FIRST_KEY), later ones
/// [`MESSAGE_KEY`](crate::keys::MESSAGE_KEY).
pub fn with_msg(err: impl Into<BoxError>, msg: impl Into<String>) -> ContextualError {
    ContextualError::new(err).with_msg(msg)
}

/// Attach a value. The first entry of a context is keyed
/// [`FIRST_KEY`](crate::keys::FIRST_KEY), later ones
/// [`VALUE_KEY`](crate::keys::VALUE_KEY).
///
/// Be careful: only what `val` serializes is captured.
pub fn with_val<T: Serialize>(err: impl Into<BoxError>, val: T) -> ContextualError {
    ContextualError::new(err).with_val(val)
}

/// Attach a message, always under `key`, even when it is the first entry.
pub fn with_key_msg(
    err: impl Into<BoxError>,
    key: impl Into<String>,
    msg: impl Into<String>,
) -> ContextualError {
    ContextualError::new(err).with_key_msg(key, msg)
}

/// Attach a value, always under `key`, even when it is the first entry.
pub fn with_key_val<T: Serialize>(
    err: impl Into<BoxError>,
    key: impl Into<String>,
    val: T,
) -> ContextualError {
    ContextualError::new(err).with_key_val(key, val)
}

/// Turn an `anyhow::Error` into a boxed error, keeping a `ContextualError`
/// stored in it reachable.
///
/// Boxing an `anyhow::Error` directly hides the error it holds from
/// downcasting, so context attached before the error crossed an `anyhow`
/// boundary would otherwise start over.
pub fn from_anyhow(err: anyhow::Error) -> BoxError {
    match err.downcast::<ContextualError>() {
        Ok(contextual) => Box::new(contextual),
        Err(err) => err.into(),
    }
}
