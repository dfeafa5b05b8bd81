use stage0::{Capability, Screen, ScreenError};
use thiserror::Error;

/// Errors returned by `stage-activator`.
///
/// A refused guard is not an error: transitions report it as `Ok(false)`.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ActivatorError {
    /// A screen hook failed while a transition was waiting on it.
    #[error("{capability} failed for screen {screen}: {source}")]
    Hook {
        /// Name of the screen whose hook failed.
        screen: String,
        /// Which hook failed.
        capability: Capability,
        /// What the hook reported.
        #[source]
        source: ScreenError,
    },
}

impl ActivatorError {
    pub(crate) fn hook(screen: &dyn Screen, capability: Capability, source: ScreenError) -> Self {
        ActivatorError::Hook {
            screen: screen.name().to_owned(),
            capability,
            source,
        }
    }
}

impl From<ActivatorError> for ScreenError {
    fn from(err: ActivatorError) -> Self {
        ScreenError::Other(Box::new(err))
    }
}
