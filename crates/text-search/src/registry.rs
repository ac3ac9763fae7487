// text-search/src/registry.rs
//! 索引注册表 - tracks which index directories have a live context
//!
//! Only one context may hold an index directory at a time. A context keeps a
//! [`RegistrySlot`] for its directory and the slot is released when the
//! context is dropped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Thread-safe set of index paths currently held by a context.
#[derive(Clone, Default)]
pub struct IndexRegistry {
    inner: Arc<Mutex<HashSet<PathBuf>>>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `path`; `None` when another context already holds it.
    pub fn try_acquire(&self, path: &Path) -> Option<RegistrySlot> {
        let mut paths = self.inner.lock();
        if !paths.insert(path.to_path_buf()) {
            return None;
        }
        Some(RegistrySlot {
            registry: self.clone(),
            path: path.to_path_buf(),
        })
    }

    pub fn is_live(&self, path: &Path) -> bool {
        self.inner.lock().contains(path)
    }

    pub fn live_count(&self) -> usize {
        self.inner.lock().len()
    }

    fn release(&self, path: &Path) {
        self.inner.lock().remove(path);
    }
}

/// Ownership of one registered path.
pub struct RegistrySlot {
    registry: IndexRegistry,
    path: PathBuf,
}

impl RegistrySlot {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RegistrySlot {
    fn drop(&mut self) {
        self.registry.release(&self.path);
        tracing::trace!("released index slot {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_path_can_be_held_once() {
        let registry = IndexRegistry::new();
        let path = Path::new("/tmp/index_a");

        let slot = registry.try_acquire(path).unwrap();
        assert!(registry.is_live(path));
        assert!(registry.try_acquire(path).is_none());

        drop(slot);
        assert!(!registry.is_live(path));
        assert!(registry.try_acquire(path).is_some());
    }

    #[test]
    fn clones_share_state() {
        let registry = IndexRegistry::new();
        let other = registry.clone();
        let _slot = registry.try_acquire(Path::new("/tmp/index_b")).unwrap();
        assert_eq!(other.live_count(), 1);
    }
}
