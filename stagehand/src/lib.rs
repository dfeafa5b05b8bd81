#![deny(missing_docs)]
//! # stagehand: umbrella crate
//!
//! Single import surface for guarded screen activation. Re-exports the
//! protocol crate and its implementations behind feature flags, plus a
//! `prelude` for the common case.
//!
//! ```no_run
//! use stagehand::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run(home: ScreenRef, settings: ScreenRef) -> Result<(), ActivatorError> {
//! let tabs = Arc::new(ScreenList::from_screens([home.clone(), settings.clone()]));
//! let activator = Activator::builder().collection(tabs).build();
//! activator.activate_item(Some(home)).await?;
//! if !activator.activate_item(Some(settings)).await? {
//!     // The home screen vetoed leaving; it is still active.
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "core")]
pub use stage0;
#[cfg(feature = "activator")]
pub use stage_activator;
#[cfg(feature = "cell")]
pub use stage_cell;

/// Happy-path imports for wiring screens to an activator.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use stage0::{
        Capability, GuardValue, LifecycleHost, OrderedCollection, Screen, ScreenError, ScreenRef,
        Spawner, TransitionLog, same_screen,
    };

    #[cfg(feature = "cell")]
    pub use stage_cell::{ReactiveCell, ScreenList};

    #[cfg(feature = "activator")]
    pub use stage_activator::{
        ActiveBinding, Activator, ActivatorConfig, ActivatorError, Settings,
    };
}
