use stage0::{OrderedCollection, ScreenRef, same_screen};
use std::fmt;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

/// In-memory [`OrderedCollection`] backed by a `Vec` behind a `RwLock`.
///
/// Every structural change bumps a version number that subscribers can
/// watch; removing an absent screen changes nothing and announces nothing.
pub struct ScreenList {
    screens: RwLock<Vec<ScreenRef>>,
    version: watch::Sender<u64>,
}

impl ScreenList {
    /// Create an empty list.
    pub fn new() -> Self {
        let (version, _rx) = watch::channel(0);
        Self {
            screens: RwLock::new(Vec::new()),
            version,
        }
    }

    /// Create a list holding `screens`, in order.
    pub fn from_screens(screens: impl IntoIterator<Item = ScreenRef>) -> Self {
        let list = Self::new();
        *list.screens.write().unwrap_or_else(PoisonError::into_inner) =
            screens.into_iter().collect();
        list
    }

    /// Receiver of the structural version, bumped on every append or removal.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    /// Whether `screen` is in the list.
    pub fn contains(&self, screen: &ScreenRef) -> bool {
        self.index_of(screen).is_some()
    }

    fn bump(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for ScreenList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScreenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .snapshot()
            .iter()
            .map(|s| s.name().to_owned())
            .collect();
        f.debug_struct("ScreenList")
            .field("screens", &names)
            .field("version", &*self.version.borrow())
            .finish()
    }
}

impl OrderedCollection for ScreenList {
    fn append(&self, screen: ScreenRef) {
        self.screens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen);
        self.bump();
    }

    fn remove(&self, screen: &ScreenRef) {
        let removed = {
            let mut screens = self.screens.write().unwrap_or_else(PoisonError::into_inner);
            let before = screens.len();
            screens.retain(|s| !same_screen(Some(s), Some(screen)));
            screens.len() != before
        };
        if removed {
            self.bump();
        }
    }

    fn index_of(&self, screen: &ScreenRef) -> Option<usize> {
        self.screens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .position(|s| same_screen(Some(s), Some(screen)))
    }

    fn snapshot(&self) -> Vec<ScreenRef> {
        self.screens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn len(&self) -> usize {
        self.screens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
