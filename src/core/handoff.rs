//! Process-wide handoff slot for the "resume this history file" selection.
//!
//! The title screen (or the `--load` flag) selects a history file before the
//! chat session exists; the session consumes the selection exactly once when
//! it starts. The slot is unset at process startup, survives any screen
//! teardown, and is reset only by [`clear`] or [`consume_and_clear`].

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

static SELECTED: Mutex<Option<PathBuf>> = Mutex::new(None);

fn slot() -> std::sync::MutexGuard<'static, Option<PathBuf>> {
    SELECTED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Overwrite the pending selection. Last writer wins; at most one selection
/// is ever pending.
pub fn set(path: impl Into<PathBuf>) {
    *slot() = Some(path.into());
}

/// Peek at the pending selection without clearing it.
pub fn get() -> Option<PathBuf> {
    slot().clone()
}

/// Take the pending selection and reset the slot in one atomic step. This is
/// the operation the consuming session must use; after it returns, [`get`]
/// reads unset until a producer calls [`set`] again.
pub fn consume_and_clear() -> Option<PathBuf> {
    slot().take()
}

/// Explicitly drop any pending selection (the "start a fresh chat" path).
pub fn clear() {
    *slot() = None;
}

/// Tests touching the slot must hold this lock; the slot is process-global
/// and the test runner is multithreaded.
#[cfg(test)]
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn slot_lifecycle() {
        let _guard = TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        clear();
        assert_eq!(get(), None);
        assert_eq!(consume_and_clear(), None);

        set("a");
        assert_eq!(get().as_deref(), Some(Path::new("a")));
        // Peeking does not clear.
        assert_eq!(get().as_deref(), Some(Path::new("a")));

        // Last writer wins.
        set("b");
        assert_eq!(consume_and_clear().as_deref(), Some(Path::new("b")));
        assert_eq!(get(), None);
        assert_eq!(consume_and_clear(), None);

        set("c");
        clear();
        assert_eq!(get(), None);
    }
}
