//! # errctx
//!
//! Keeps the error a program branches on apart from the data it logs about it.
//!
//! - The **identity** is a static error (a sentinel such as [`StaticError`], an
//!   `io::Error`, any `std::error::Error`). Control flow compares against it.
//! - The **context** is an ordered list of keyed messages and values attached
//!   while the error propagates. It only ever reaches a structured sink.
//!
//! ```
//! use errctx::sink::{try_insert, JsonEvent};
//! use errctx::{with_msg, with_val, StaticError};
//!
//! const ERR_QUOTA: StaticError = StaticError::new("quota exceeded");
//!
//! fn reserve(bytes: u64) -> Result<(), errctx::ContextualError> {
//!     Err(with_val(ERR_QUOTA, bytes))
//! }
//!
//! let err = with_msg(reserve(4096).unwrap_err(), "uploading avatar");
//! assert!(err.is(&ERR_QUOTA));
//!
//! let mut event = JsonEvent::new();
//! try_insert(&err)(&mut event);
//! assert_eq!(
//!     event.to_json_string().unwrap(),
//!     r#"{"error":"quota exceeded","errcontext":{"root":4096,"msg":"uploading avatar"}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - `keys` - Reserved keys shared with sinks
//! - `context` - Ordered diagnostic entries
//! - `chain` - Equality and lookups across `source()` chains and joined errors
//! - `error` - `ContextualError`, attach functions and the `ResultExt` trait
//! - `sink` - Sink contract, deferred insertion, JSON and `tracing` sinks
//! - `logging` - Subscriber setup for binaries and tests

pub mod chain;
pub mod context;
pub mod error;
pub mod keys;
pub mod logging;
pub mod sink;

pub use chain::JoinedError;
pub use context::{Context, ContextValue};
pub use error::{
    from_anyhow, with_key_msg, with_key_val, with_msg, with_val, BoxError, ContextResult,
    ContextualError, HasContext, ResultExt, StaticError,
};
pub use sink::{log_error, try_insert, EventSink, FieldSink, JsonEvent, SinkError};
