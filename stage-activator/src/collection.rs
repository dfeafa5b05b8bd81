//! Collection mode: one active screen picked from an ordered list.

use crate::activator::Activator;
use crate::error::ActivatorError;
use crate::settings::NextItemPolicy;
use futures::future::join_all;
use stage0::{OrderedCollection, ScreenRef};

/// Default neighbour policy.
///
/// `list` is the collection as it stands while the screen at `last_index`
/// is being left. Leaving the first screen picks its right neighbour,
/// leaving any other screen picks its left neighbour, and leaving the
/// last screen of the list or a sole screen picks nothing.
///
/// ```
/// # use stage_activator::determine_next_item;
/// # use stage0::test_utils::ScriptedScreen;
/// # use stage0::ScreenRef;
/// # use std::sync::Arc;
/// let list: Vec<ScreenRef> = vec![
///     Arc::new(ScriptedScreen::new("a")),
///     Arc::new(ScriptedScreen::new("b")),
/// ];
/// let next = determine_next_item(&list, 0).unwrap();
/// assert_eq!(next.name(), "b");
/// ```
pub fn determine_next_item(list: &[ScreenRef], last_index: usize) -> Option<ScreenRef> {
    if last_index == 0 {
        return if list.len() > 1 { list.get(1).cloned() } else { None };
    }
    let left = last_index - 1;
    if left + 1 < list.len() {
        list.get(left).cloned()
    } else {
        None
    }
}

/// Collection replacement for `before_activate`.
///
/// An absent candidate is replaced by the policy's pick around `current`,
/// or around index 0 when nothing is active. If `current` has already
/// left the list there is no neighbour and the result is `None`.
/// A candidate the list does not hold yet is appended. A candidate it
/// already holds is re-bound to the stored handle.
pub(crate) fn resolve_candidate(
    items: &dyn OrderedCollection,
    current: Option<&ScreenRef>,
    candidate: Option<ScreenRef>,
    policy: &NextItemPolicy,
) -> Option<ScreenRef> {
    match candidate {
        None => {
            let last_index = match current {
                None => 0,
                Some(current) => items.index_of(current)?,
            };
            policy(&items.snapshot(), last_index)
        }
        Some(screen) => match items.index_of(&screen) {
            None => {
                items.append(screen.clone());
                Some(screen)
            }
            Some(index) => items.snapshot().get(index).cloned().or(Some(screen)),
        },
    }
}

/// Ask every screen in the collection whether it may be closed.
///
/// All guards run concurrently and every one of them is awaited; the
/// verdict is the conjunction. An empty collection may always be closed.
pub(crate) async fn can_close_all(
    activator: &Activator,
    items: &dyn OrderedCollection,
) -> Result<bool, ActivatorError> {
    let snapshot = items.snapshot();
    let verdicts = join_all(
        snapshot
            .iter()
            .map(|screen| activator.can_deactivate_item(Some(screen), true)),
    )
    .await;

    let mut all = true;
    for verdict in verdicts {
        all &= verdict?;
    }
    tracing::debug!(screens = snapshot.len(), verdict = all, "asked collection whether it can close");
    Ok(all)
}

/// Close every screen in the collection.
///
/// Deactivations run concurrently; each screen leaves the collection as
/// soon as its own deactivation settles. Resolves after all of them have.
pub(crate) async fn close_all(
    activator: &Activator,
    items: &dyn OrderedCollection,
) -> Result<(), ActivatorError> {
    let snapshot = items.snapshot();
    let outcomes = join_all(snapshot.iter().map(|screen| async move {
        let outcome = activator.deactivate_item(Some(screen), true).await;
        items.remove(screen);
        outcome
    }))
    .await;

    tracing::debug!(screens = snapshot.len(), "closed collection");
    for outcome in outcomes {
        outcome?;
    }
    Ok(())
}
