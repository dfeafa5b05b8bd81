//! Execution and logging collaborators.
//!
//! Both are injected into an activator at construction instead of being
//! pulled from global state, so the engine can be driven in isolation.

use crate::screen::Screen;
use futures::future::BoxFuture;

/// Runs a future to completion without the caller awaiting it.
///
/// The activator uses this for work whose result nobody inspects, such
/// as the eager activation requested at construction.
pub trait Spawner: Send + Sync {
    /// Start `task`. The spawner owns it from here on.
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// [`Spawner`] backed by the ambient tokio runtime.
///
/// When called outside a runtime the task is dropped and a warning is
/// logged; nothing panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task);
            }
            Err(e) => {
                tracing::warn!(error = %e, "no tokio runtime, dropping spawned task");
            }
        }
    }
}

/// Diagnostic sink for transition steps. Carries no control flow.
pub trait TransitionLog: Send + Sync {
    /// Record that `label` (e.g. `"Activating"`) is happening to `screen`.
    fn log(&self, label: &str, screen: &dyn Screen);
}

/// [`TransitionLog`] that emits `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl TransitionLog for TracingLog {
    fn log(&self, label: &str, screen: &dyn Screen) {
        tracing::debug!(screen = screen.name(), "{label}");
    }
}
