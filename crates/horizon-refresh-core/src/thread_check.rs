//! Thread affinity verification.
//!
//! Refresh controllers are driven entirely from the thread that delivers
//! scroll and gesture notifications. [`ThreadAffinity`] records the thread an
//! object was created on and lets it assert that later mutations happen on
//! the same one.
//!
//! [`ThreadAffinity::debug_assert_same_thread`] is compiled to nothing in
//! release builds; [`ThreadAffinity::assert_same_thread`] always checks.
//!
//! # Example
//!
//! ```
//! use horizon_refresh_core::thread_check::ThreadAffinity;
//!
//! struct Indicator {
//!     affinity: ThreadAffinity,
//!     progress: std::cell::Cell<f32>,
//! }
//!
//! impl Indicator {
//!     fn set_progress(&self, progress: f32) {
//!         self.affinity.debug_assert_same_thread();
//!         self.progress.set(progress);
//!     }
//! }
//!
//! let indicator = Indicator {
//!     affinity: ThreadAffinity::current(),
//!     progress: std::cell::Cell::new(0.0),
//! };
//! indicator.set_progress(0.5);
//! ```

use std::thread::ThreadId;

/// Thread affinity tracker for objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl ThreadAffinity {
    /// Create a new thread affinity tracker for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the same thread as the affinity.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            self.panic_wrong_thread();
        }
    }

    /// [`assert_same_thread`](Self::assert_same_thread) in debug builds only.
    #[inline]
    pub fn debug_assert_same_thread(&self) {
        if cfg!(debug_assertions) {
            self.assert_same_thread();
        }
    }

    #[cold]
    #[inline(never)]
    fn panic_wrong_thread(&self) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");

        panic!(
            "thread affinity violation: object created on thread {:?}, \
             accessed from \"{current_name}\" ({:?}). Refresh controllers and \
             the scroll surfaces they observe must be driven from the thread \
             that delivers scroll and gesture events.",
            self.thread_id,
            current.id()
        )
    }
}
