use serde::Serialize;
use tracing::warn;

use crate::config::GalleryConfig;
use crate::record::GuideRecord;
use crate::url::{inject_utm, inject_utm_term, join_url};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GalleryItemKind {
    City {
        bookmarks_count: u32,
        track_is_available: bool,
    },
    Outdoor {
        duration: f64,
        distance: f64,
        ascent: u32,
        tag: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem {
    pub guide_id: String,
    pub url: String,
    pub image_url: String,
    pub title: String,
    pub downloaded: bool,
    #[serde(flatten)]
    pub kind: GalleryItemKind,
}

impl GalleryItem {
    pub fn is_city(&self) -> bool {
        matches!(self.kind, GalleryItemKind::City { .. })
    }
}

/// Cards shown under the map for the guides currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GuidesGallery {
    pub items: Vec<GalleryItem>,
}

impl GuidesGallery {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Builds the gallery from single guides, in record order. Clusters are
    /// skipped, as is every item when the catalog base URL does not parse.
    ///
    /// `shown_guides` is tagged into every URL so analytics can tell how many
    /// guides the user had seen when opening one.
    pub fn build(
        guides: &[GuideRecord],
        shown_guides: usize,
        config: &GalleryConfig,
        is_downloaded: impl Fn(&str) -> bool,
    ) -> Self {
        let term = shown_guides.to_string();
        let items = guides
            .iter()
            .filter(|g| g.is_single())
            .filter_map(|guide| {
                let info = &guide.guide_info;

                let mut segments = vec![config.locale.as_str()];
                segments.extend(config.route_path.split('/'));
                segments.push(info.id.as_str());
                let mut url = match join_url(&config.catalog_front_url, &segments) {
                    Ok(url) => url,
                    Err(err) => {
                        warn!(guide_id = %info.id, %err, "skipping gallery item");
                        return None;
                    }
                };
                inject_utm(&mut url, &config.utm);
                inject_utm_term(&mut url, &term);

                let kind = if guide.sights_count == 1 {
                    GalleryItemKind::City {
                        bookmarks_count: info.bookmarks_count,
                        track_is_available: info.has_track,
                    }
                } else {
                    GalleryItemKind::Outdoor {
                        duration: info.tour_duration,
                        distance: info.tracks_length,
                        ascent: info.ascent,
                        tag: info.tag.clone(),
                    }
                };

                Some(GalleryItem {
                    guide_id: info.id.clone(),
                    url: url.into(),
                    image_url: info.image_url.clone(),
                    title: info.name.clone(),
                    downloaded: is_downloaded(&info.id),
                    kind,
                })
            })
            .collect();

        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::{GalleryItemKind, GuidesGallery};
    use crate::config::GalleryConfig;
    use crate::record::{GuideInfo, GuideRecord};
    use pretty_assertions::assert_eq;

    fn guide(id: &str, sights: u32, outdoor: u32) -> GuideRecord {
        GuideRecord {
            sights_count: sights,
            outdoor_count: outdoor,
            guide_info: GuideInfo {
                id: id.to_string(),
                name: format!("Guide {id}"),
                image_url: format!("https://img.test/{id}.jpg"),
                tag: "hiking".to_string(),
                bookmarks_count: 12,
                has_track: true,
                tracks_length: 5400.0,
                tour_duration: 7200.0,
                ascent: 310,
            },
            ..GuideRecord::default()
        }
    }

    #[test]
    fn clusters_are_skipped() {
        let guides = vec![guide("a", 1, 1), guide("b", 0, 1), guide("c", 2, 0)];
        let gallery = GuidesGallery::build(&guides, 0, &GalleryConfig::default(), |_| false);
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.items[0].guide_id, "b");
    }

    #[test]
    fn city_and_outdoor_fields() {
        let guides = vec![guide("city", 1, 0), guide("trail", 0, 1)];
        let gallery = GuidesGallery::build(&guides, 0, &GalleryConfig::default(), |id| {
            id == "trail"
        });

        let city = &gallery.items[0];
        assert!(city.is_city());
        assert!(!city.downloaded);
        assert_eq!(
            city.kind,
            GalleryItemKind::City {
                bookmarks_count: 12,
                track_is_available: true
            }
        );

        let trail = &gallery.items[1];
        assert!(trail.downloaded);
        assert_eq!(trail.title, "Guide trail");
        assert_eq!(
            trail.kind,
            GalleryItemKind::Outdoor {
                duration: 7200.0,
                distance: 5400.0,
                ascent: 310,
                tag: "hiking".to_string()
            }
        );
    }

    #[test]
    fn url_carries_locale_and_shown_count() {
        let mut config = GalleryConfig::default();
        config.catalog_front_url = "https://catalog.test/".to_string();
        config.locale = "fr".to_string();
        let gallery = GuidesGallery::build(&[guide("g7", 1, 0)], 4, &config, |_| false);
        assert_eq!(
            gallery.items[0].url,
            "https://catalog.test/fr/v3/mobilefront/route/g7\
             ?utm_source=guides_app&utm_medium=map&utm_campaign=guides_on_map_gallery&utm_term=4"
        );
    }

    #[test]
    fn guide_id_cannot_break_out_of_its_path_segment() {
        let id = "a b&utm_term=999#x";
        let config = GalleryConfig::default();
        let gallery = GuidesGallery::build(&[guide(id, 0, 1)], 4, &config, |_| false);
        let url = ::url::Url::parse(&gallery.items[0].url).unwrap();

        assert!(!gallery.items[0].url.contains(' '));
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path(), "/en/v3/mobilefront/route/a%20b&utm_term=999%23x");
        let terms: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "utm_term")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(terms, vec!["4".to_string()]);
    }

    #[test]
    fn unusable_base_url_yields_no_items() {
        let mut config = GalleryConfig::default();
        config.catalog_front_url = "catalog".to_string();
        let gallery = GuidesGallery::build(&[guide("g1", 1, 0)], 0, &config, |_| false);
        assert!(gallery.is_empty());
    }
}
