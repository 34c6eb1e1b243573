//! Boundaries to the outside world: external item source, busy flag, logging

pub mod busy;
pub mod item_source;
pub mod tracing_setup;

pub use busy::{BusyFlag, BusyGuard};
pub use item_source::{DetachedSource, ItemSource};
