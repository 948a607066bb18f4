use foundation::math::Vec2;

use crate::mark::{Mark, MarkId, MarkKind};
use crate::store::MarkStore;

/// Scoped edit of a [`MarkStore`].
///
/// Changes become visible to the renderer once the session is dropped.
pub struct EditSession<'a, S: MarkStore + ?Sized> {
    store: &'a mut S,
    changed: bool,
}

impl<'a, S: MarkStore + ?Sized> EditSession<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            changed: false,
        }
    }

    pub fn clear_group(&mut self, kind: MarkKind) {
        self.store.clear_group(kind);
        self.changed = true;
    }

    /// Creates a mark and hands it back for tagging.
    ///
    /// Returns `None` only if the store loses the mark it just created.
    pub fn create_mark(&mut self, kind: MarkKind, pivot: Vec2) -> Option<&mut Mark> {
        self.changed = true;
        let id = self.store.create_mark(kind, pivot);
        self.store.mark_mut(id)
    }

    pub fn mark_ids(&self, kind: MarkKind) -> Vec<MarkId> {
        self.store.mark_ids(kind)
    }

    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.store.mark(id)
    }

    pub fn has_downloaded(&self, guide_id: &str) -> bool {
        self.store.has_downloaded(guide_id)
    }
}

impl<S: MarkStore + ?Sized> Drop for EditSession<'_, S> {
    fn drop(&mut self) {
        if self.changed {
            self.store.notify_changes();
        }
    }
}
