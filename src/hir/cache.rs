//! Memoized module references.
//!
//! References are computed at most once per `(revision, element, scope)` key.
//! Values are node locations rather than red tree nodes, so one cache can be
//! shared by analyses running on different threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::module_index::NodeLocation;
use crate::base::{FileId, Revision};
use crate::parser::NodePtr;

/// Identity of a memoized reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReferenceKey {
    pub revision: Revision,
    pub file: FileId,
    pub element: NodePtr,
    pub scope: NodePtr,
}

/// Candidate set of a memoized reference. `None` when the element owns no reference.
pub type CachedTargets = Option<Arc<[NodeLocation]>>;

type Slot = Arc<OnceCell<CachedTargets>>;

/// Compute-once reference memo shared between snapshots.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: RwLock<FxHashMap<ReferenceKey, Slot>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized value for `key`, computing it with `compute` if absent.
    ///
    /// Concurrent callers with the same key wait for a single computation.
    pub fn get_or_compute(
        &self,
        key: ReferenceKey,
        compute: impl FnOnce() -> CachedTargets,
    ) -> CachedTargets {
        let slot = self.slot(key);
        let mut computed = false;
        let value = slot.get_or_init(|| {
            computed = true;
            compute()
        });
        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        value.clone()
    }

    fn slot(&self, key: ReferenceKey) -> Slot {
        if let Some(slot) = self.entries.read().get(&key) {
            return Arc::clone(slot);
        }
        let mut entries = self.entries.write();
        Arc::clone(entries.entry(key).or_default())
    }

    /// Drop every entry computed for another revision.
    pub fn retain_revision(&self, revision: Revision) {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| key.revision == revision);
        tracing::debug!(
            "[CACHE] pruned {} stale references, {} kept",
            before - entries.len(),
            entries.len()
        );
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }
}
