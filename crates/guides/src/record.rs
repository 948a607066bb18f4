use foundation::math::Vec2;
use marks::GuideType;
use serde::{Deserialize, Serialize};

/// Descriptive part of a guide as the service returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideInfo {
    pub id: String,
    pub name: String,
    pub image_url: String,
    /// Outdoor route tag, e.g. "hiking".
    pub tag: String,
    pub bookmarks_count: u32,
    pub has_track: bool,
    /// Meters.
    pub tracks_length: f64,
    /// Seconds.
    pub tour_duration: f64,
    /// Meters.
    pub ascent: u32,
}

/// One point on the guides layer: either a single guide or a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideRecord {
    pub point: Vec2,
    pub sights_count: u32,
    pub outdoor_count: u32,
    pub guide_info: GuideInfo,
}

pub type GuidesOnMap = Vec<GuideRecord>;

impl GuideRecord {
    pub fn total_count(&self) -> u32 {
        self.sights_count.saturating_add(self.outdoor_count)
    }

    pub fn is_cluster(&self) -> bool {
        self.total_count() > 1
    }

    /// Exactly one guide of exactly one category.
    pub fn is_single(&self) -> bool {
        self.total_count() == 1
    }

    pub fn guide_type(&self) -> GuideType {
        if self.sights_count > 0 {
            GuideType::City
        } else {
            GuideType::Outdoor
        }
    }
}
