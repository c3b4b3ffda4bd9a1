use std::collections::BTreeMap;

use super::WindowKey;
use super::record::{InitialGeometry, Position, Size, WindowRecord};
use crate::constants::INITIAL_Z_INDEX;

/// Registry of open windows and the single source of truth for their
/// transient UI state.
///
/// Every operation is total over the id space. Unknown ids never panic;
/// mutators report whether anything was applied so stale callbacks can be
/// told apart from real updates.
///
/// Stacking is tracked by `z_index` alone. The counter only moves forward,
/// so the most recently created or focused record always holds the largest
/// value without re-sorting anyone else. If it ever runs out, every record
/// is renumbered once in stacking order and counting resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowStore<K: WindowKey> {
    records: BTreeMap<K, WindowRecord<K>>,
    baseline: u64,
    next_z_index: u64,
}

impl<K: WindowKey> Default for WindowStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: WindowKey> WindowStore<K> {
    pub fn new() -> Self {
        Self::with_baseline(INITIAL_Z_INDEX)
    }

    pub fn with_baseline(initial_z_index: u64) -> Self {
        Self {
            records: BTreeMap::new(),
            baseline: initial_z_index,
            next_z_index: initial_z_index,
        }
    }

    fn take_z_index(&mut self) -> u64 {
        let z = match self.next_z_index.checked_add(1) {
            Some(_) => self.next_z_index,
            None => self.renumber(),
        };
        self.next_z_index = z + 1;
        z
    }

    /// Pack every z-index into a dense run that keeps the current order and
    /// return the first free value after it.
    fn renumber(&mut self) -> u64 {
        let count = self.records.len() as u64;
        let start = match self.baseline.checked_add(count) {
            Some(end) if end < u64::MAX => self.baseline,
            _ => 0,
        };
        tracing::warn!(
            windows = count,
            start,
            "z-index counter exhausted, renumbering"
        );
        let mut order: Vec<(u64, K)> = self
            .records
            .values()
            .map(|r| (r.z_index, r.id.clone()))
            .collect();
        order.sort_by_key(|(z, _)| *z);
        let mut next = start;
        for (_, id) in order {
            if let Some(record) = self.records.get_mut(&id) {
                record.z_index = next;
            }
            next += 1;
        }
        next
    }

    /// Register `id` on top of the stack.
    ///
    /// Re-registering a known id is a no-op returning `false`; the existing
    /// record keeps whatever geometry the user gave it.
    pub fn add_window(&mut self, id: K, initial: InitialGeometry) -> bool {
        if self.records.contains_key(&id) {
            tracing::trace!(window_id = ?id, "add ignored, already registered");
            return false;
        }
        let z_index = self.take_z_index();
        tracing::debug!(window_id = ?id, z_index, "registered window");
        self.records
            .insert(id.clone(), WindowRecord::new(id, initial, z_index));
        true
    }

    /// Purge `id` completely. A later `add_window` with the same id starts
    /// from a fresh record.
    pub fn remove_window(&mut self, id: &K) -> Option<WindowRecord<K>> {
        let removed = self.records.remove(id);
        if removed.is_some() {
            tracing::debug!(window_id = ?id, "removed window");
        }
        removed
    }

    /// Raise `id` above every other record. Apart from a counter renumber,
    /// this is the only way a z-index changes after creation.
    pub fn focus_window(&mut self, id: &K) -> bool {
        if !self.records.contains_key(id) {
            return false;
        }
        let z_index = self.take_z_index();
        if let Some(record) = self.records.get_mut(id) {
            record.z_index = z_index;
        }
        tracing::debug!(window_id = ?id, z_index, "focused window");
        true
    }

    /// Snapshot of the record for `id`.
    pub fn get_window(&self, id: &K) -> Option<WindowRecord<K>> {
        self.records.get(id).cloned()
    }

    /// Borrowing accessor for render paths that only read.
    pub fn window(&self, id: &K) -> Option<&WindowRecord<K>> {
        self.records.get(id)
    }

    fn update<F>(&mut self, id: &K, apply: F) -> bool
    where
        F: FnOnce(&mut WindowRecord<K>),
    {
        match self.records.get_mut(id) {
            Some(record) => {
                apply(record);
                true
            }
            None => false,
        }
    }

    pub fn set_minimized(&mut self, id: &K, value: bool) -> bool {
        self.update(id, |record| record.is_minimized = value)
    }

    pub fn set_maximized(&mut self, id: &K, value: bool) -> bool {
        self.update(id, |record| record.is_maximized = value)
    }

    pub fn set_position(&mut self, id: &K, position: Position) -> bool {
        self.update(id, |record| record.position = Some(position))
    }

    pub fn set_size(&mut self, id: &K, size: Size) -> bool {
        self.update(id, |record| record.size = Some(size))
    }

    /// Flip the maximized flag. Returns the new value, or `None` when `id`
    /// is not registered.
    pub fn toggle_maximized(&mut self, id: &K) -> Option<bool> {
        let record = self.records.get_mut(id)?;
        record.is_maximized = !record.is_maximized;
        Some(record.is_maximized)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &WindowRecord<K>> {
        self.records.values()
    }

    /// Value the next creation or focus event will receive.
    pub fn next_z_index(&self) -> u64 {
        self.next_z_index
    }

    /// Visible ids from bottom to top.
    pub fn stacking_order(&self) -> Vec<K> {
        let mut visible: Vec<&WindowRecord<K>> =
            self.records.values().filter(|r| r.is_visible()).collect();
        visible.sort_by_key(|r| r.z_index);
        visible.into_iter().map(|r| r.id.clone()).collect()
    }

    /// The focused window: highest z-index among non-minimized records.
    pub fn top_window(&self) -> Option<&K> {
        self.records
            .values()
            .filter(|r| r.is_visible())
            .max_by_key(|r| r.z_index)
            .map(|r| &r.id)
    }

    /// Drop every record for which `keep` returns false and return the
    /// purged ids.
    pub fn retain<F>(&mut self, mut keep: F) -> Vec<K>
    where
        F: FnMut(&WindowRecord<K>) -> bool,
    {
        let purged: Vec<K> = self
            .records
            .values()
            .filter(|r| !keep(r))
            .map(|r| r.id.clone())
            .collect();
        for id in &purged {
            self.remove_window(id);
        }
        purged
    }
}
