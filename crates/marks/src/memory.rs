use std::collections::{BTreeMap, BTreeSet};

use foundation::math::Vec2;
use tracing::trace;

use crate::mark::{Mark, MarkId, MarkKind};
use crate::store::MarkStore;

/// Deterministic in-memory [`MarkStore`].
///
/// Marks live in a `BTreeMap` keyed by monotonically increasing ids, so
/// iteration order is creation order.
#[derive(Debug, Default, Clone)]
pub struct MemoryMarkStore {
    next_id: u64,
    marks: BTreeMap<MarkId, Mark>,
    downloaded: BTreeSet<String>,
    notify_count: u64,
}

impl MemoryMarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `guide_id` as present in the local catalog.
    pub fn add_downloaded(&mut self, guide_id: impl Into<String>) {
        self.downloaded.insert(guide_id.into());
    }

    pub fn remove_downloaded(&mut self, guide_id: &str) -> bool {
        self.downloaded.remove(guide_id)
    }

    pub fn marks(&self, kind: MarkKind) -> impl Iterator<Item = &Mark> + '_ {
        self.marks.values().filter(move |m| m.kind == kind)
    }

    pub fn mark_count(&self, kind: MarkKind) -> usize {
        self.marks(kind).count()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// How many edit sessions have flushed changes.
    pub fn notify_count(&self) -> u64 {
        self.notify_count
    }
}

impl MarkStore for MemoryMarkStore {
    fn clear_group(&mut self, kind: MarkKind) {
        self.marks.retain(|_, m| m.kind != kind);
    }

    fn create_mark(&mut self, kind: MarkKind, pivot: Vec2) -> MarkId {
        let id = MarkId(self.next_id);
        self.next_id += 1;
        self.marks.insert(id, Mark::new(id, kind, pivot));
        id
    }

    fn mark_mut(&mut self, id: MarkId) -> Option<&mut Mark> {
        self.marks.get_mut(&id)
    }

    fn mark_ids(&self, kind: MarkKind) -> Vec<MarkId> {
        self.marks(kind).map(|m| m.id).collect()
    }

    fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    fn has_downloaded(&self, guide_id: &str) -> bool {
        self.downloaded.contains(guide_id)
    }

    fn notify_changes(&mut self) {
        self.notify_count += 1;
        trace!(marks = self.marks.len(), "mark store changed");
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryMarkStore;
    use crate::mark::{MarkId, MarkKind};
    use crate::store::MarkStore;
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_unique_and_in_creation_order() {
        let mut s = MemoryMarkStore::new();
        let a = s.create_mark(MarkKind::Guide, Vec2::new(0.0, 0.0));
        let b = s.create_mark(MarkKind::GuideCluster, Vec2::new(1.0, 0.0));
        let c = s.create_mark(MarkKind::Guide, Vec2::new(2.0, 0.0));
        assert_eq!(s.mark_ids(MarkKind::Guide), vec![a, c]);
        assert_eq!(s.mark_ids(MarkKind::GuideCluster), vec![b]);
        assert_ne!(a, b);
    }

    #[test]
    fn clear_group_only_touches_its_kind() {
        let mut s = MemoryMarkStore::new();
        s.create_mark(MarkKind::Guide, Vec2::ZERO);
        s.create_mark(MarkKind::GuideSelection, Vec2::ZERO);
        s.clear_group(MarkKind::Guide);
        assert_eq!(s.mark_count(MarkKind::Guide), 0);
        assert_eq!(s.mark_count(MarkKind::GuideSelection), 1);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut s = MemoryMarkStore::new();
        let first = s.create_mark(MarkKind::Guide, Vec2::ZERO);
        s.clear_group(MarkKind::Guide);
        let second = s.create_mark(MarkKind::Guide, Vec2::ZERO);
        assert!(second > first);
        assert!(s.mark(first).is_none());
        assert_eq!(second, MarkId(1));
    }

    #[test]
    fn downloaded_catalog() {
        let mut s = MemoryMarkStore::new();
        assert!(!s.has_downloaded("g"));
        s.add_downloaded("g");
        assert!(s.has_downloaded("g"));
        assert!(s.remove_downloaded("g"));
        assert!(!s.has_downloaded("g"));
    }
}
