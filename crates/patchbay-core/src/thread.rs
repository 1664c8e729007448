//! Processing-thread marker.
//!
//! The engine enters a [`ProcessingScope`] at the top of its audio callback.
//! While the guard lives, [`is_processing_thread`] returns `true` on that
//! thread, which selects render-safe code paths and lets the manager flag
//! topology mutations that arrive from the render thread.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static PROCESSING: Cell<bool> = const { Cell::new(false) };
}

/// Returns `true` if the calling thread is inside a [`ProcessingScope`].
#[inline]
pub fn is_processing_thread() -> bool {
    PROCESSING.with(Cell::get)
}

/// RAII guard marking the current thread as the render thread.
///
/// Scopes nest; dropping restores the previous state. The guard is `!Send`
/// so it cannot be dropped on a different thread than the one it marked.
///
/// # Example
///
/// ```rust
/// use patchbay_core::{ProcessingScope, is_processing_thread};
///
/// assert!(!is_processing_thread());
/// {
///     let _scope = ProcessingScope::enter();
///     assert!(is_processing_thread());
/// }
/// assert!(!is_processing_thread());
/// ```
#[must_use = "the thread is only marked while the guard is alive"]
pub struct ProcessingScope {
    previous: bool,
    _not_send: PhantomData<*const ()>,
}

impl ProcessingScope {
    /// Marks the current thread as the render thread.
    pub fn enter() -> Self {
        let previous = PROCESSING.with(|flag| flag.replace(true));
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ProcessingScope {
    fn drop(&mut self) {
        PROCESSING.with(|flag| flag.set(self.previous));
    }
}
