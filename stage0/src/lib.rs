//! # stage0: Protocol traits for guarded screen activation
//!
//! This crate defines the contracts that a screen activator is built on.
//! It contains no transition logic of its own; see `stage-activator` for
//! the engine and `stage-cell` for the reactive primitives.
//!
//! ## The Contracts
//!
//! | Contract | Types | What it does |
//! |----------|-------|-------------|
//! | Item | [`Screen`], [`Capability`], [`ScreenRef`] | An activatable thing with optional lifecycle hooks |
//! | Guard | [`GuardValue`] | Raw verdict returned by `can_*` hooks |
//! | Collection | [`OrderedCollection`] | Externally owned, insertion-ordered item list |
//! | Hosting | [`LifecycleHost`] | A screen whose lifecycle is forwarded elsewhere |
//! | Runtime | [`Spawner`], [`TransitionLog`] | Fire-and-forget execution and diagnostic tracing |
//!
//! ## Capabilities, not shape probing
//!
//! A [`Screen`] declares which of its four hooks are meaningful through
//! [`Screen::capabilities`]. The activator only calls hooks that are
//! declared; an undeclared guard approves and an undeclared hook is a no-op.
//!
//! ## Async hooks
//!
//! Every hook is an `async fn` (via `async-trait`, so the trait stays
//! object safe). A hook that has nothing to wait for completes on its
//! first poll, which is how "plain value or async value" is expressed.

#![deny(missing_docs)]

pub mod collection;
pub mod error;
pub mod guard;
pub mod runtime;
pub mod screen;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use collection::OrderedCollection;
pub use error::ScreenError;
pub use guard::GuardValue;
pub use runtime::{Spawner, TokioSpawner, TracingLog, TransitionLog};
pub use screen::{Capability, LifecycleHost, Screen, ScreenRef, same_screen};
