//! ScriptedScreen: a screen whose hooks answer from a script.

use crate::error::ScreenError;
use crate::guard::GuardValue;
use crate::screen::{Capability, Screen};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A hook invocation recorded for inspection in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Name of the screen whose hook ran.
    pub screen: String,
    /// Which hook ran.
    pub capability: Capability,
    /// The `close` argument, for the deactivation hooks.
    pub close: Option<bool>,
}

/// Call journal shared between screens, to check cross-screen ordering.
pub type Journal = Arc<Mutex<Vec<RecordedCall>>>;

/// Create an empty journal.
pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

/// A screen built from a script: which hooks it has, what its guards
/// answer, how long each hook takes and which hooks fail.
///
/// `ScriptedScreen::new` has no capabilities at all; each `with_*`
/// method adds one. Calls are recorded in the journal when a hook starts.
pub struct ScriptedScreen {
    name: String,
    capabilities: Vec<Capability>,
    can_activate: Mutex<GuardValue>,
    can_deactivate: Mutex<GuardValue>,
    delays: HashMap<Capability, Duration>,
    failing: Vec<Capability>,
    journal: Journal,
}

impl ScriptedScreen {
    /// A screen with no hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: Vec::new(),
            can_activate: Mutex::new(GuardValue::Bool(true)),
            can_deactivate: Mutex::new(GuardValue::Bool(true)),
            delays: HashMap::new(),
            failing: Vec::new(),
            journal: new_journal(),
        }
    }

    /// A screen with all four hooks, every guard approving.
    pub fn full(name: impl Into<String>) -> Self {
        Self::new(name)
            .with_can_activate(true)
            .with_activate()
            .with_can_deactivate(true)
            .with_deactivate()
    }

    fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Add a `can_activate` guard answering `verdict`.
    pub fn with_can_activate(self, verdict: impl Into<GuardValue>) -> Self {
        self.set_can_activate(verdict);
        self.with_capability(Capability::CanActivate)
    }

    /// Add an `activate` hook.
    pub fn with_activate(self) -> Self {
        self.with_capability(Capability::Activate)
    }

    /// Add a `can_deactivate` guard answering `verdict`.
    pub fn with_can_deactivate(self, verdict: impl Into<GuardValue>) -> Self {
        self.set_can_deactivate(verdict);
        self.with_capability(Capability::CanDeactivate)
    }

    /// Add a `deactivate` hook.
    pub fn with_deactivate(self) -> Self {
        self.with_capability(Capability::Deactivate)
    }

    /// Make `capability` sleep for `delay` before answering.
    pub fn with_delay(mut self, capability: Capability, delay: Duration) -> Self {
        self.delays.insert(capability, delay);
        self
    }

    /// Make `capability` fail with [`ScreenError::Failed`].
    pub fn failing_on(mut self, capability: Capability) -> Self {
        self.failing.push(capability);
        self
    }

    /// Record calls into `journal` instead of a private one.
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    /// Change what `can_activate` answers from now on.
    pub fn set_can_activate(&self, verdict: impl Into<GuardValue>) {
        *self.can_activate.lock().unwrap_or_else(PoisonError::into_inner) = verdict.into();
    }

    /// Change what `can_deactivate` answers from now on.
    pub fn set_can_deactivate(&self, verdict: impl Into<GuardValue>) {
        *self.can_deactivate.lock().unwrap_or_else(PoisonError::into_inner) = verdict.into();
    }

    /// Calls made on this screen, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|call| call.screen == self.name)
            .cloned()
            .collect()
    }

    /// How many times `capability` was invoked on this screen.
    pub fn count(&self, capability: Capability) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.capability == capability)
            .count()
    }

    async fn step(&self, capability: Capability, close: Option<bool>) -> Result<(), ScreenError> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                screen: self.name.clone(),
                capability,
                close,
            });
        if let Some(delay) = self.delays.get(&capability) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&capability) {
            return Err(ScreenError::Failed(format!(
                "{} failed in {capability}",
                self.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Screen for ScriptedScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    async fn can_activate(&self) -> Result<GuardValue, ScreenError> {
        self.step(Capability::CanActivate, None).await?;
        Ok(self
            .can_activate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn activate(&self) -> Result<(), ScreenError> {
        self.step(Capability::Activate, None).await
    }

    async fn can_deactivate(&self, close: bool) -> Result<GuardValue, ScreenError> {
        self.step(Capability::CanDeactivate, Some(close)).await?;
        Ok(self
            .can_deactivate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn deactivate(&self, close: bool) -> Result<(), ScreenError> {
        self.step(Capability::Deactivate, Some(close)).await
    }
}
