use crate::activator::Activator;
use crate::error::ActivatorError;
use stage0::ScreenRef;
use stage_cell::Receiver;
use std::sync::Arc;

/// Write facade for UI bindings.
///
/// Reads see the activator's slot. Writes never assign it directly: they
/// run the full guarded transition, so a UI selection that a guard refuses
/// is rolled back by the re-announcement that follows the refusal.
#[derive(Clone)]
pub struct ActiveBinding {
    activator: Arc<Activator>,
}

impl ActiveBinding {
    pub(crate) fn new(activator: Arc<Activator>) -> Self {
        Self { activator }
    }

    /// The active screen.
    pub fn get(&self) -> Option<ScreenRef> {
        self.activator.active()
    }

    /// Request `screen` as the active screen through the transition protocol.
    pub async fn set(&self, screen: Option<ScreenRef>) -> Result<bool, ActivatorError> {
        self.activator.activate_item(screen).await
    }

    /// Receiver of slot writes and re-announcements.
    pub fn subscribe(&self) -> Receiver<Option<ScreenRef>> {
        self.activator.subscribe()
    }

    /// The activator behind this binding.
    pub fn activator(&self) -> &Arc<Activator> {
        &self.activator
    }
}
