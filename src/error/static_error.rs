use thiserror::Error;

/// A sentinel error identified by its message.
///
/// Declare sentinels as constants and branch on them with
/// [`ContextualError::is`](super::ContextualError::is) or [`chain::is`](crate::chain::is):
///
/// ```
/// use errctx::StaticError;
///
/// const ERR_NOT_FOUND: StaticError = StaticError::new("not found");
/// assert_eq!(ERR_NOT_FOUND.to_string(), "not found");
/// ```
///
/// Two sentinels with the same message compare equal, wherever they are
/// declared. Keep messages unique across a program, or use a `thiserror` enum
/// per module when the same text has to mean different things:
///
/// ```
/// use errctx::{with_msg, StaticError};
///
/// #[derive(Debug, PartialEq, thiserror::Error)]
/// enum StoreError {
///     #[error("not found")]
///     NotFound,
/// }
///
/// let err = with_msg(StoreError::NotFound, "key user:7");
/// assert!(err.is(&StoreError::NotFound));
/// assert!(!err.is(&StaticError::new("not found")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{message}")]
pub struct StaticError {
    message: &'static str,
}

impl StaticError {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }
}
