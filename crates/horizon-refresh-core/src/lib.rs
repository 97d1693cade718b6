//! Core systems for Horizon Refresh.
//!
//! This crate provides the foundational pieces the refresh controllers are
//! built on:
//!
//! - **Signal/Slot System**: Type-safe change notification between a host
//!   scroll surface and its observers
//! - **Property System**: Interior-mutable values with change detection
//! - **Thread Affinity**: Checks that UI-thread-only objects stay on their thread
//! - **Logging**: `tracing` targets used across the workspace
//!
//! # Example
//!
//! ```
//! use horizon_refresh_core::{Property, Signal};
//!
//! struct Counter {
//!     value: Property<i32>,
//!     value_changed: Signal<i32>,
//! }
//!
//! impl Counter {
//!     fn increment(&self) {
//!         let new_value = self.value.get() + 1;
//!         if self.value.set(new_value) {
//!             self.value_changed.emit(new_value);
//!         }
//!     }
//! }
//!
//! let counter = Counter { value: Property::new(0), value_changed: Signal::new() };
//! counter.value_changed.connect(|v| println!("now {v}"));
//! counter.increment();
//! ```

pub mod logging;
pub mod property;
pub mod signal;
pub mod thread_check;

pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use thread_check::ThreadAffinity;

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(Property<f32>: Send, Sync);
