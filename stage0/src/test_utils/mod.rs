//! Scripted implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that let activator behaviour be observed without a UI.

mod queued_spawner;
mod recording_log;
mod scripted_screen;

pub use queued_spawner::QueuedSpawner;
pub use recording_log::{LogEntry, RecordingLog};
pub use scripted_screen::{Journal, RecordedCall, ScriptedScreen, new_journal};
