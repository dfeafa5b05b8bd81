//! Guarded, asynchronous activation of screens.
//!
//! An [`Activator`] owns one active slot and moves it between screens
//! with a four-phase protocol: may the current screen go, may the
//! candidate come, deactivate the current one, activate the candidate.
//! Guards are conjunctive: a single refusal keeps the current screen,
//! re-announces it to subscribers and resolves `Ok(false)`.
//!
//! Two modes are chosen once, when the activator is built:
//! - single-item mode, the default;
//! - collection mode ([`ActivatorBuilder::collection`]), where the slot
//!   is backed by an externally owned [`OrderedCollection`](stage0::OrderedCollection)
//!   and `can_deactivate(true)` / `deactivate(true)` close the whole list.
//!
//! UI code should write through an [`ActiveBinding`] rather than around
//! the activator; the binding routes every write into
//! [`Activator::activate_item`].

#![deny(missing_docs)]

mod activator;
mod binding;
mod collection;
mod error;
mod settings;

pub use activator::{Activator, ActivatorBuilder};
pub use binding::ActiveBinding;
pub use collection::determine_next_item;
pub use error::ActivatorError;
pub use settings::{
    ActivatorConfig, AfterDeactivate, BeforeActivate, InterpretGuard, NextItemPolicy, Settings,
};
