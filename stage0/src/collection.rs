//! The ordered collection an activator can be bound to.

use crate::screen::ScreenRef;

/// An externally owned, insertion-ordered list of screens.
///
/// An activator in collection mode reads and mutates the list only
/// through this trait; it never owns it. Every method is synchronous and
/// mutations must be visible to the next read on any handle, so that a
/// removal made while one transition settles is seen by the next phase.
///
/// Membership is by identity ([`same_screen`](crate::same_screen)).
pub trait OrderedCollection: Send + Sync {
    /// Append `screen` at the end.
    fn append(&self, screen: ScreenRef);

    /// Remove `screen` by identity. No-op if it is not present.
    fn remove(&self, screen: &ScreenRef);

    /// Position of `screen`, or `None` if it is not present.
    fn index_of(&self, screen: &ScreenRef) -> Option<usize>;

    /// The current contents, in order.
    fn snapshot(&self) -> Vec<ScreenRef>;

    /// Number of screens.
    fn len(&self) -> usize;

    /// Whether the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
