use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Stable handle of a mark inside a [`crate::MarkStore`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkId(pub u64);

/// Mark groups managed by the guides layer. Each kind is cleared as a unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkKind {
    /// Two or more guides collapsed into one marker.
    GuideCluster,
    Guide,
    /// Highlight drawn under the active guide.
    GuideSelection,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideType {
    City,
    Outdoor,
}

/// A user mark as the storage layer keeps it.
///
/// Fields that do not apply to `kind` keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub id: MarkId,
    pub kind: MarkKind,
    pub pivot: Vec2,
    /// Display order; later marks draw on top.
    pub index: u64,
    pub sights_count: u32,
    pub outdoor_count: u32,
    pub guide_id: String,
    pub guide_type: Option<GuideType>,
    pub downloaded: bool,
}

impl Mark {
    pub fn new(id: MarkId, kind: MarkKind, pivot: Vec2) -> Self {
        Self {
            id,
            kind,
            pivot,
            index: 0,
            sights_count: 0,
            outdoor_count: 0,
            guide_id: String::new(),
            guide_type: None,
            downloaded: false,
        }
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn set_index(&mut self, index: u64) {
        self.index = index;
    }

    pub fn set_guides_count(&mut self, sights_count: u32, outdoor_count: u32) {
        self.sights_count = sights_count;
        self.outdoor_count = outdoor_count;
    }

    pub fn set_guide_type(&mut self, guide_type: GuideType) {
        self.guide_type = Some(guide_type);
    }

    pub fn set_guide_id(&mut self, guide_id: impl Into<String>) {
        self.guide_id = guide_id.into();
    }

    pub fn set_downloaded(&mut self, downloaded: bool) {
        self.downloaded = downloaded;
    }
}
