//! Tracking URLs for gallery items.

use thiserror::Error;
use url::Url;

use crate::config::UtmParams;

#[derive(Debug, Error)]
pub enum UrlError {
    #[error("invalid base url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("base url {0} cannot carry path segments")]
    CannotBeABase(String),
}

/// Parses `base` and appends `segments` as path segments.
///
/// Each entry is one segment: `/` inside it is percent-encoded, empty entries
/// are skipped and a trailing slash on the base is dropped.
pub fn join_url(base: &str, segments: &[&str]) -> Result<Url, UrlError> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| UrlError::CannotBeABase(base.to_string()))?
        .pop_if_empty()
        .extend(segments.iter().filter(|s| !s.is_empty()));
    Ok(url)
}

pub fn inject_utm(url: &mut Url, utm: &UtmParams) {
    url.query_pairs_mut()
        .append_pair("utm_source", &utm.source)
        .append_pair("utm_medium", &utm.medium)
        .append_pair("utm_campaign", &utm.campaign);
}

pub fn inject_utm_term(url: &mut Url, term: &str) {
    url.query_pairs_mut().append_pair("utm_term", term);
}
