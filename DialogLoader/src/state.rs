//! Process-wide loader instance shared by all entry points

use bkdialog::loader::DialogLoader;
use std::sync::{Mutex, OnceLock, PoisonError};

static LOADER: OnceLock<Mutex<DialogLoader>> = OnceLock::new();

/// Run `f` against the shared loader, creating it on first use.
///
/// The runtime calls in from a single game thread, so the lock is never
/// contended. A poisoned lock is recovered since the cache stays usable
/// after a contained panic.
pub fn with_loader<R>(f: impl FnOnce(&mut DialogLoader) -> R) -> R {
    let loader = LOADER.get_or_init(|| Mutex::new(DialogLoader::new()));
    let mut guard = loader.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}
