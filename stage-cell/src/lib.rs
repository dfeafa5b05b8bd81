//! Reactive primitives for stagehand.
//!
//! [`ReactiveCell`] is a value with change notification, built on a
//! `tokio::sync::watch` channel. [`ScreenList`] is an in-memory
//! implementation of stage0's [`OrderedCollection`] that announces every
//! structural change the same way.

#![deny(missing_docs)]

mod cell;
mod list;

pub use cell::ReactiveCell;
pub use list::ScreenList;

/// Re-exported so callers can name receivers without depending on tokio.
pub use tokio::sync::watch::Receiver;

#[doc(no_inline)]
pub use stage0::OrderedCollection;
