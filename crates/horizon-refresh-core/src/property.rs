//! Reactive property storage.
//!
//! A [`Property<T>`] wraps a value behind interior mutability and reports
//! whether a write actually changed it. Owners pair properties with a
//! [`Signal`](crate::Signal) and emit only when `set` returns `true`, which is
//! how the scroll surface avoids notifying observers about no-op writes.
//!
//! # Example
//!
//! ```
//! use horizon_refresh_core::{Property, Signal};
//!
//! struct Viewport {
//!     height: Property<f32>,
//!     height_changed: Signal<f32>,
//! }
//!
//! impl Viewport {
//!     fn set_height(&self, height: f32) {
//!         if self.height.set(height) {
//!             self.height_changed.emit(height);
//!         }
//!     }
//! }
//!
//! let viewport = Viewport { height: Property::new(800.0), height_changed: Signal::new() };
//! viewport.set_height(600.0);
//! assert_eq!(viewport.height.get(), 600.0);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// `Property<T>` uses an `RwLock` internally and is `Send + Sync` whenever `T`
/// is. Reads clone the value.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_basic() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);
    }

    #[test]
    fn test_property_set_detects_change() {
        let prop = Property::new(10.0_f32);

        assert!(!prop.set(10.0));
        assert!(prop.set(20.0));
        assert_eq!(prop.get(), 20.0);
    }

    #[test]
    fn test_property_set_silent() {
        let prop = Property::new(true);
        prop.set_silent(false);
        assert!(!prop.get());
    }
}
