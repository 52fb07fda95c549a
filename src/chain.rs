//! Walking error chains
//!
//! A chain is followed through `source()` links. A [`JoinedError`] branches:
//! each of its members is walked in order, depth first. Every lookup in this
//! crate (equality, typed extraction, locating a [`ContextualError`]) goes
//! through [`find_map`], so a wrapper buried under other layers is still found.

use crate::context::Context;
use crate::error::ContextualError;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Shared, type-erased error used as an identity.
pub type SharedError = Arc<dyn Error + Send + Sync + 'static>;

/// Several errors combined into one identity.
///
/// Equality checks succeed against any member. Rendered as the member
/// messages separated by newlines.
#[derive(Debug, Clone, Error)]
#[error("{}", join_messages(.errors))]
pub struct JoinedError {
    errors: Vec<SharedError>,
}

fn join_messages(errors: &[SharedError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl JoinedError {
    pub fn new(errors: Vec<SharedError>) -> Self {
        Self { errors }
    }

    /// Members in the order they were joined
    pub fn errors(&self) -> &[SharedError] {
        &self.errors
    }
}

/// Visit `err` and everything reachable from it until `f` returns `Some`.
pub fn find_map<'a, T, F>(err: &'a (dyn Error + 'static), mut f: F) -> Option<T>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<T>,
{
    walk(err, &mut f)
}

fn walk<'a, T, F>(err: &'a (dyn Error + 'static), f: &mut F) -> Option<T>
where
    F: FnMut(&'a (dyn Error + 'static)) -> Option<T>,
{
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = f(e) {
            return Some(found);
        }
        if let Some(joined) = e.downcast_ref::<JoinedError>() {
            for member in joined.errors() {
                if let Some(found) = walk(&**member, f) {
                    return Some(found);
                }
            }
            return None;
        }
        current = e.source();
    }
    None
}

/// Whether any error reachable from `err` equals `target`.
pub fn is<E>(err: &(dyn Error + 'static), target: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    find_map(err, |e| (e.downcast_ref::<E>() == Some(target)).then_some(())).is_some()
}

/// First error of type `T` reachable from `err`.
pub fn find<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    find_map(err, |e| e.downcast_ref::<T>())
}

/// The outermost [`ContextualError`] in the chain.
pub fn find_contextual<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a ContextualError> {
    find::<ContextualError>(err)
}

/// Context carried anywhere in the chain.
pub fn find_context<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a Context> {
    find_contextual(err).map(ContextualError::context)
}

/// Copy the identity and context of the first [`ContextualError`] in the
/// chain into `target`.
///
/// Matching is by wrapper type only: the identities of `err` and `target` do
/// not need to agree. Returns `false` and leaves `target` untouched when the
/// chain carries no context.
pub fn extract_into(err: &(dyn Error + 'static), target: &mut ContextualError) -> bool {
    match find_contextual(err) {
        Some(found) => found.as_into(target),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StaticError;
    use std::fmt;

    const ERR_A: StaticError = StaticError::new("a failed");
    const ERR_B: StaticError = StaticError::new("b failed");
    const ERR_C: StaticError = StaticError::new("c failed");

    #[derive(Debug)]
    struct Wrapper(SharedError);

    impl fmt::Display for Wrapper {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl Error for Wrapper {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&*self.0)
        }
    }

    #[test]
    fn test_is_follows_source_links() {
        let err = Wrapper(Arc::new(Wrapper(Arc::new(ERR_A))));
        assert!(is(&err, &ERR_A));
        assert!(!is(&err, &ERR_B));
    }

    #[test]
    fn test_is_branches_into_joined_members() {
        let joined = JoinedError::new(vec![
            Arc::new(ERR_A) as SharedError,
            Arc::new(Wrapper(Arc::new(ERR_B))),
        ]);
        let err = Wrapper(Arc::new(joined));

        assert!(is(&err, &ERR_A));
        assert!(is(&err, &ERR_B));
        assert!(!is(&err, &ERR_C));
    }

    #[test]
    fn test_joined_display_uses_newlines() {
        let joined = JoinedError::new(vec![Arc::new(ERR_A) as SharedError, Arc::new(ERR_B)]);
        assert_eq!(joined.to_string(), "a failed\nb failed");
    }

    #[test]
    fn test_find_returns_first_match() {
        let err = Wrapper(Arc::new(ERR_C));
        assert_eq!(find::<StaticError>(&err), Some(&ERR_C));
        assert!(find::<JoinedError>(&err).is_none());
    }

    #[test]
    fn test_find_context_through_wrapper() {
        let inner = ContextualError::new(ERR_A).with_msg("while loading");
        let err = Wrapper(Arc::new(inner));

        let ctx = find_context(&err).expect("context should be found below the wrapper");
        assert_eq!(ctx.len(), 1);
        assert!(find_context(&ERR_A).is_none());
    }
}
