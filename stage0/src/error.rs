//! Error type for screen hooks.

use thiserror::Error;

/// Errors returned by a [`Screen`](crate::Screen) hook.
///
/// A hook error is not a veto. Vetoes are expressed by a guard returning
/// a false [`GuardValue`](crate::GuardValue); an error aborts whatever
/// transition was waiting on the hook and is reported to its caller.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The hook ran and failed.
    #[error("screen hook failed: {0}")]
    Failed(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
