use foundation::math::Vec2;

use crate::mark::{Mark, MarkId, MarkKind};

/// Storage layer that owns map marks and the downloaded-guides catalog.
///
/// Mutations are expected to go through an [`crate::EditSession`], which calls
/// [`MarkStore::notify_changes`] once the session ends.
pub trait MarkStore {
    /// Removes every mark of `kind`.
    fn clear_group(&mut self, kind: MarkKind);

    fn create_mark(&mut self, kind: MarkKind, pivot: Vec2) -> MarkId;

    fn mark_mut(&mut self, id: MarkId) -> Option<&mut Mark>;

    /// Ids of every mark of `kind`, in creation order.
    fn mark_ids(&self, kind: MarkKind) -> Vec<MarkId>;

    fn mark(&self, id: MarkId) -> Option<&Mark>;

    /// Whether the guide with `guide_id` is saved to the device.
    fn has_downloaded(&self, guide_id: &str) -> bool;

    /// Flushes pending changes to whoever draws the marks.
    fn notify_changes(&mut self) {}
}
