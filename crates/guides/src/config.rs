use serde::{Deserialize, Serialize};

use crate::url::{UrlError, join_url};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid guides config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("request_attempts must be at least 1")]
    NoAttempts,
    #[error("{name} must be in (0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("gallery.catalog_front_url: {0}")]
    CatalogUrl(#[from] UrlError),
}

/// Tuning of the refresh controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidesConfig {
    /// Consecutive failures tolerated before giving up.
    #[serde(default = "default_request_attempts")]
    pub request_attempts: u32,

    /// Relative scale change above which two viewports are never similar.
    ///
    /// Empirically matched to `min_intersection_score`: concentric viewports
    /// whose scales differ by more than 11.15% overlap by less than 80%.
    #[serde(default = "default_scale_eps")]
    pub scale_eps: f64,

    /// Viewports overlapping by more than this are considered the same.
    #[serde(default = "default_min_intersection_score")]
    pub min_intersection_score: f64,

    /// Zoom factor applied when a cluster mark is tapped.
    #[serde(default = "default_cluster_scale_factor")]
    pub cluster_scale_factor: f64,

    #[serde(default)]
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Catalog front end that gallery links point at. The default is a local
    /// development server; deployments set their own.
    #[serde(default = "default_catalog_front_url")]
    pub catalog_front_url: String,
    #[serde(default = "default_route_path")]
    pub route_path: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub utm: UtmParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtmParams {
    pub source: String,
    pub medium: String,
    pub campaign: String,
}

fn default_request_attempts() -> u32 {
    3
}

fn default_scale_eps() -> f64 {
    0.1115
}

fn default_min_intersection_score() -> f64 {
    0.8
}

fn default_cluster_scale_factor() -> f64 {
    2.0
}

fn default_catalog_front_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_route_path() -> String {
    "v3/mobilefront/route".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for UtmParams {
    fn default() -> Self {
        Self {
            source: "guides_app".to_string(),
            medium: "map".to_string(),
            campaign: "guides_on_map_gallery".to_string(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            catalog_front_url: default_catalog_front_url(),
            route_path: default_route_path(),
            locale: default_locale(),
            utm: UtmParams::default(),
        }
    }
}

impl Default for GuidesConfig {
    fn default() -> Self {
        Self {
            request_attempts: default_request_attempts(),
            scale_eps: default_scale_eps(),
            min_intersection_score: default_min_intersection_score(),
            cluster_scale_factor: default_cluster_scale_factor(),
            gallery: GalleryConfig::default(),
        }
    }
}

impl GuidesConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        for (name, value) in [
            ("scale_eps", self.scale_eps),
            ("min_intersection_score", self.min_intersection_score),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        join_url(&self.gallery.catalog_front_url, &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, GuidesConfig};
    use crate::url::UrlError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = GuidesConfig::from_json_str("{}").expect("config");
        assert_eq!(config, GuidesConfig::default());
        assert_eq!(config.request_attempts, 3);
        assert_eq!(config.scale_eps, 0.1115);
        assert_eq!(config.gallery.route_path, "v3/mobilefront/route");
    }

    #[test]
    fn partial_override() {
        let config = GuidesConfig::from_json_str(
            r#"{"request_attempts": 5, "gallery": {"locale": "de"}}"#,
        )
        .expect("config");
        assert_eq!(config.request_attempts, 5);
        assert_eq!(config.gallery.locale, "de");
        assert_eq!(config.gallery.route_path, "v3/mobilefront/route");
    }

    #[test]
    fn rejects_zero_attempts() {
        let err = GuidesConfig::from_json_str(r#"{"request_attempts": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoAttempts));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = GuidesConfig::from_json_str(r#"{"min_intersection_score": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "min_intersection_score",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unusable_catalog_url() {
        let err = GuidesConfig::from_json_str(r#"{"gallery": {"catalog_front_url": "catalog"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::CatalogUrl(UrlError::Parse(_))));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GuidesConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
