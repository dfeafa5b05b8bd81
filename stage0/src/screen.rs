//! The Screen interface: anything an activator can make current.

use crate::{error::ScreenError, guard::GuardValue};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// One of the four optional lifecycle hooks a screen may provide.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May this screen become the active one?
    CanActivate,
    /// Called after the screen became the active one.
    Activate,
    /// May this screen stop being the active one?
    CanDeactivate,
    /// Called when the screen stops being the active one.
    Deactivate,
}

impl Capability {
    /// Every capability. Convenient for screens that implement them all.
    pub const ALL: &'static [Capability] = &[
        Capability::CanActivate,
        Capability::Activate,
        Capability::CanDeactivate,
        Capability::Deactivate,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::CanActivate => "can_activate",
            Capability::Activate => "activate",
            Capability::CanDeactivate => "can_deactivate",
            Capability::Deactivate => "deactivate",
        };
        f.write_str(name)
    }
}

/// A screen, panel or list entry that can be activated and deactivated.
///
/// Every hook is optional. A screen lists the hooks it actually provides
/// in [`Screen::capabilities`]; the activator treats an unlisted guard as
/// approval and an unlisted hook as a no-op, and never calls it.
///
/// The default method bodies approve / do nothing, so an implementation
/// only overrides what it declares.
///
/// `close` distinguishes "navigate away, the screen stays reachable"
/// (`false`) from "the screen is being removed for good" (`true`).
#[async_trait]
pub trait Screen: Send + Sync {
    /// Human-readable name, used for diagnostics only.
    fn name(&self) -> &str;

    /// Which hooks this screen provides.
    fn capabilities(&self) -> &[Capability];

    /// Whether this screen provides `capability`.
    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Guard: may this screen become active?
    async fn can_activate(&self) -> Result<GuardValue, ScreenError> {
        Ok(GuardValue::Bool(true))
    }

    /// Hook: the screen has just become active.
    async fn activate(&self) -> Result<(), ScreenError> {
        Ok(())
    }

    /// Guard: may this screen stop being active?
    async fn can_deactivate(&self, _close: bool) -> Result<GuardValue, ScreenError> {
        Ok(GuardValue::Bool(true))
    }

    /// Hook: the screen is no longer active.
    async fn deactivate(&self, _close: bool) -> Result<(), ScreenError> {
        Ok(())
    }
}

/// Shared handle to a screen. Identity is the allocation, see [`same_screen`].
pub type ScreenRef = Arc<dyn Screen>;

/// Identity comparison for optional screens. Two absent screens are the same.
pub fn same_screen(a: Option<&ScreenRef>, b: Option<&ScreenRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
        (None, None) => true,
        _ => false,
    }
}

/// A screen whose lifecycle can be handed over to another screen.
///
/// Before a delegate is attached the host has no capabilities. Once
/// attached, all four hooks are forwarded to the delegate; this is how a
/// screen hosts a nested activator as its own lifecycle.
pub struct LifecycleHost {
    name: String,
    delegate: RwLock<Option<ScreenRef>>,
}

impl LifecycleHost {
    /// Create a host with no delegate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delegate: RwLock::new(None),
        }
    }

    /// Forward this host's lifecycle to `target`, replacing any previous delegate.
    pub fn delegate_to(&self, target: ScreenRef) {
        let mut delegate = self.delegate.write().unwrap_or_else(PoisonError::into_inner);
        *delegate = Some(target);
    }

    /// The current delegate, if any.
    pub fn delegate(&self) -> Option<ScreenRef> {
        self.delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl fmt::Debug for LifecycleHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHost")
            .field("name", &self.name)
            .field("delegate", &self.delegate().map(|d| d.name().to_owned()))
            .finish()
    }
}

#[async_trait]
impl Screen for LifecycleHost {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &[Capability] {
        if self.delegate().is_some() {
            Capability::ALL
        } else {
            &[]
        }
    }

    async fn can_activate(&self) -> Result<GuardValue, ScreenError> {
        match self.delegate() {
            Some(target) => target.can_activate().await,
            None => Ok(GuardValue::Bool(true)),
        }
    }

    async fn activate(&self) -> Result<(), ScreenError> {
        match self.delegate() {
            Some(target) => target.activate().await,
            None => Ok(()),
        }
    }

    async fn can_deactivate(&self, close: bool) -> Result<GuardValue, ScreenError> {
        match self.delegate() {
            Some(target) => target.can_deactivate(close).await,
            None => Ok(GuardValue::Bool(true)),
        }
    }

    async fn deactivate(&self, close: bool) -> Result<(), ScreenError> {
        match self.delegate() {
            Some(target) => target.deactivate(close).await,
            None => Ok(()),
        }
    }
}
