//! Activator settings.

use crate::collection::determine_next_item;
use serde::{Deserialize, Serialize};
use stage0::{GuardValue, LifecycleHost, ScreenRef};
use std::fmt;
use std::sync::Arc;

/// Resolves the candidate just before activation.
pub type BeforeActivate = Arc<dyn Fn(Option<ScreenRef>) -> Option<ScreenRef> + Send + Sync>;

/// Runs after a screen has been deactivated, with the `close` flag used.
pub type AfterDeactivate = Arc<dyn Fn(&ScreenRef, bool) + Send + Sync>;

/// Turns a raw guard answer into a verdict.
pub type InterpretGuard = Arc<dyn Fn(&GuardValue) -> bool + Send + Sync>;

/// Picks what to activate in a collection when no candidate is given,
/// from the list and the index of the screen being left.
pub type NextItemPolicy = Arc<dyn Fn(&[ScreenRef], usize) -> Option<ScreenRef> + Send + Sync>;

/// The plain-data part of [`Settings`]. Every field is optional when
/// deserializing; missing fields take their defaults.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivatorConfig {
    /// Whether deactivating the current screen during a transition closes it.
    pub close_on_deactivate: bool,
    /// Whether to activate the initial screen as soon as the activator is built.
    pub activate: bool,
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            close_on_deactivate: true,
            activate: false,
        }
    }
}

/// Normalized activator settings.
///
/// Every option has a default; `Settings::default()` is identity
/// `before_activate`, no-op `after_deactivate`, [`GuardValue::interpret`]
/// as the guard interpreter, no parent, no eager activation and
/// `close_on_deactivate = true`.
#[derive(Clone)]
pub struct Settings {
    /// Whether deactivating the current screen during a transition closes it.
    /// Forced to `false` in collection mode.
    pub close_on_deactivate: bool,
    /// Activate the initial screen at construction (ignored when `parent` is set).
    pub activate: bool,
    /// Candidate transform. Replaced by the collection behaviour in collection mode.
    pub before_activate: BeforeActivate,
    /// Post-deactivation hook. Replaced by the collection behaviour in collection mode.
    pub after_deactivate: AfterDeactivate,
    /// Guard interpreter.
    pub interpret_guard: InterpretGuard,
    /// Neighbour selection used in collection mode.
    pub determine_next_item: NextItemPolicy,
    /// Host whose lifecycle is handed to the activator at construction.
    pub parent: Option<Arc<LifecycleHost>>,
}

impl Settings {
    /// Default settings.
    pub fn new() -> Self {
        Self::from(ActivatorConfig::default())
    }

    /// Set `close_on_deactivate`.
    pub fn with_close_on_deactivate(mut self, close: bool) -> Self {
        self.close_on_deactivate = close;
        self
    }

    /// Set eager activation.
    pub fn with_activate(mut self, activate: bool) -> Self {
        self.activate = activate;
        self
    }

    /// Set the candidate transform.
    pub fn with_before_activate(
        mut self,
        f: impl Fn(Option<ScreenRef>) -> Option<ScreenRef> + Send + Sync + 'static,
    ) -> Self {
        self.before_activate = Arc::new(f);
        self
    }

    /// Set the post-deactivation hook.
    pub fn with_after_deactivate(mut self, f: impl Fn(&ScreenRef, bool) + Send + Sync + 'static) -> Self {
        self.after_deactivate = Arc::new(f);
        self
    }

    /// Set the guard interpreter.
    pub fn with_interpret_guard(mut self, f: impl Fn(&GuardValue) -> bool + Send + Sync + 'static) -> Self {
        self.interpret_guard = Arc::new(f);
        self
    }

    /// Set the collection neighbour policy.
    pub fn with_next_item_policy(
        mut self,
        f: impl Fn(&[ScreenRef], usize) -> Option<ScreenRef> + Send + Sync + 'static,
    ) -> Self {
        self.determine_next_item = Arc::new(f);
        self
    }

    /// Hand `parent`'s lifecycle to the activator once it is built.
    pub fn with_parent(mut self, parent: Arc<LifecycleHost>) -> Self {
        self.parent = Some(parent);
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ActivatorConfig> for Settings {
    fn from(config: ActivatorConfig) -> Self {
        Self {
            close_on_deactivate: config.close_on_deactivate,
            activate: config.activate,
            before_activate: Arc::new(|candidate: Option<ScreenRef>| candidate),
            after_deactivate: Arc::new(|_: &ScreenRef, _: bool| {}),
            interpret_guard: Arc::new(GuardValue::interpret),
            determine_next_item: Arc::new(determine_next_item),
            parent: None,
        }
    }
}

/// Shorthand: `Settings::from(true)` means "activate at construction".
impl From<bool> for Settings {
    fn from(activate: bool) -> Self {
        Self::new().with_activate(activate)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("close_on_deactivate", &self.close_on_deactivate)
            .field("activate", &self.activate)
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}
