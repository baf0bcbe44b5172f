//! Whole-collection session cache.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Holds at most one fetched collection per session.
///
/// The cache is either empty or populated with the complete value from the last successful
/// load. It is never partially filled: callers store whole collections only.
pub struct SessionCache<T> {
    name: &'static str,
    slot: RwLock<Option<Arc<T>>>,
    fill: Mutex<()>,
}

/// Decision returned by a fill closure in [`SessionCache::get_or_try_fill`].
#[derive(Debug)]
pub enum Fill<T> {
    /// Complete value; stored and returned.
    Store(T),
    /// Usable but incomplete value; returned without populating the cache.
    Pass(T),
}

impl<T> SessionCache<T> {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name, slot: RwLock::new(None), fill: Mutex::new(()) }
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn set(&self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.slot.write() = Some(Arc::clone(&value));
        debug!(cache = self.name, "cache populated");
        value
    }

    pub fn invalidate(&self) {
        if self.slot.write().take().is_some() {
            debug!(cache = self.name, "cache invalidated");
        }
    }

    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Returns the cached value or runs `load` once to produce it.
    ///
    /// Concurrent callers on an empty cache wait for the first loader instead of issuing
    /// their own fetch.
    pub fn get_or_try_fill<E>(
        &self,
        load: impl FnOnce() -> Result<Fill<T>, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(hit) = self.get() {
            return Ok(hit);
        }

        let _guard = self.fill.lock();
        if let Some(hit) = self.get() {
            return Ok(hit);
        }

        match load()? {
            Fill::Store(value) => Ok(self.set(value)),
            Fill::Pass(value) => Ok(Arc::new(value)),
        }
    }
}

impl<T> fmt::Debug for SessionCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCache")
            .field("name", &self.name)
            .field("populated", &self.is_populated())
            .finish_non_exhaustive()
    }
}
