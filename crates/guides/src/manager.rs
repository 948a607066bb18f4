use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use foundation::intersection::intersection_score;
use foundation::viewport::Viewport;
use marks::{EditSession, MarkId, MarkKind, MarkStore};
use tracing::{debug, info, trace, warn};

use crate::api::{FetchError, GuidesApi, GuidesRequest, GuidesResponse};
use crate::config::GuidesConfig;
use crate::gallery::GuidesGallery;
use crate::record::{GuideRecord, GuidesOnMap};
use crate::render::MapRenderer;
use crate::state::GuidesState;
use crate::stats::RefreshStats;

pub type StateListener = Box<dyn FnMut(GuidesState)>;

/// Called with `reload = true` when the gallery content was replaced and
/// `false` when only the selection moved.
pub type GalleryListener = Box<dyn FnMut(bool)>;

#[derive(Debug, Copy, Clone, PartialEq)]
struct RequestParams {
    viewport: Viewport,
    zoom: u8,
}

/// Keeps the guides layer in sync with the map viewport.
///
/// All methods, including response delivery, must run on one thread; the
/// manager holds no locks.
///
/// Response policy: only the answer to the most recently issued request is
/// applied. Answers carrying an older generation are dropped whether they
/// succeeded or failed, so a superseded request can neither retry nor
/// overwrite newer data.
pub struct GuidesManager {
    config: GuidesConfig,
    api: Box<dyn GuidesApi>,
    marks: Rc<RefCell<dyn MarkStore>>,
    renderer: Option<Box<dyn MapRenderer>>,

    state: GuidesState,
    // Last accepted viewport. Suppressed updates do not move it, so slow
    // drift still triggers a request once it adds up.
    params: Option<RequestParams>,
    guides: GuidesOnMap,
    active_guide: Option<String>,
    shown_guides: BTreeSet<String>,

    request_counter: u64,
    error_requests_count: u32,
    next_mark_index: u64,

    on_state_changed: Option<StateListener>,
    on_gallery_changed: Option<GalleryListener>,
    stats: RefreshStats,
}

impl GuidesManager {
    pub fn new(
        config: GuidesConfig,
        api: Box<dyn GuidesApi>,
        marks: Rc<RefCell<dyn MarkStore>>,
    ) -> Self {
        Self {
            config,
            api,
            marks,
            renderer: None,
            state: GuidesState::Disabled,
            params: None,
            guides: GuidesOnMap::new(),
            active_guide: None,
            shown_guides: BTreeSet::new(),
            request_counter: 0,
            error_requests_count: 0,
            next_mark_index: 0,
            on_state_changed: None,
            on_gallery_changed: None,
            stats: RefreshStats::default(),
        }
    }

    pub fn set_renderer(&mut self, renderer: Box<dyn MapRenderer>) {
        self.renderer = Some(renderer);
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.config.gallery.locale = locale.into();
    }

    pub fn config(&self) -> &GuidesConfig {
        &self.config
    }

    pub fn stats(&self) -> RefreshStats {
        self.stats
    }

    pub fn state(&self) -> GuidesState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Registers the state observer and immediately reports the current
    /// state to it.
    pub fn set_state_listener(&mut self, listener: impl FnMut(GuidesState) + 'static) {
        let mut listener: StateListener = Box::new(listener);
        listener(self.state);
        self.on_state_changed = Some(listener);
    }

    pub fn set_gallery_listener(&mut self, listener: impl FnMut(bool) + 'static) {
        self.on_gallery_changed = Some(Box::new(listener));
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled == self.is_enabled() {
            return;
        }

        if enabled {
            info!("guides layer enabled");
            self.change_state(GuidesState::Enabled);
            self.request_guides();
        } else {
            info!("guides layer disabled");
            self.clear();
            self.change_state(GuidesState::Disabled);
            self.shown_guides.clear();
        }
    }

    /// Resumes requests after the attempt budget ran out. No-op otherwise.
    pub fn reconnect(&mut self) {
        if self.state != GuidesState::FatalNetworkError {
            return;
        }

        info!("reconnecting guides layer");
        self.change_state(GuidesState::Enabled);
        self.request_guides();
    }

    /// Reports a new camera position.
    pub fn update_viewport(&mut self, viewport: Viewport, zoom: u8) {
        if self.state.is_paused() {
            self.params = Some(RequestParams { viewport, zoom });
            return;
        }

        if viewport.is_empty_interior() {
            trace!("ignoring degenerate viewport");
            return;
        }

        if let Some(current) = self.initialized_params() {
            if self.is_similar(&current.viewport, &viewport) {
                self.stats.requests_suppressed += 1;
                trace!("viewport change too small, request suppressed");
                return;
            }
        }

        self.params = Some(RequestParams { viewport, zoom });
        self.request_guides();
    }

    /// Entry point for the guides service answer.
    pub fn handle_response(&mut self, response: GuidesResponse) {
        match response.result {
            Ok(guides) => self.on_guides_received(response.generation, guides),
            Err(err) => self.on_request_failed(response.generation, &err),
        }
    }

    pub fn on_guides_received(&mut self, generation: u64, guides: GuidesOnMap) {
        if !self.accepts_response(generation) {
            return;
        }

        debug!(generation, count = guides.len(), "guides received");
        self.stats.successes += 1;
        self.guides = guides;
        self.error_requests_count = 0;

        if self.guides.is_empty() {
            self.change_state(GuidesState::NoData);
        } else {
            self.change_state(GuidesState::HasData);
        }

        self.update_guides_marks();
        self.notify_gallery(true);
    }

    pub fn on_request_failed(&mut self, generation: u64, error: &FetchError) {
        if !self.accepts_response(generation) {
            return;
        }

        self.stats.failures += 1;
        self.error_requests_count += 1;

        if self.error_requests_count >= self.config.request_attempts {
            warn!(
                attempts = self.error_requests_count,
                "{error}; giving up until reconnect"
            );
            self.clear();
            self.change_state(GuidesState::FatalNetworkError);
            self.notify_gallery(true);
            return;
        }

        debug!(
            attempt = self.error_requests_count,
            "{error}; retrying"
        );
        self.change_state(GuidesState::NetworkError);
        self.stats.retries += 1;
        self.request_guides();
    }

    pub fn gallery(&self) -> GuidesGallery {
        let store = self.marks.borrow();
        GuidesGallery::build(
            &self.guides,
            self.shown_guides.len(),
            &self.config.gallery,
            |id| store.has_downloaded(id),
        )
    }

    pub fn guides(&self) -> &[GuideRecord] {
        &self.guides
    }

    pub fn active_guide(&self) -> Option<&str> {
        self.active_guide.as_deref()
    }

    /// Highlights `guide_id`; an empty id clears the selection.
    pub fn set_active_guide(&mut self, guide_id: &str) {
        if self.active_guide.as_deref().unwrap_or_default() == guide_id {
            return;
        }

        self.active_guide = (!guide_id.is_empty()).then(|| guide_id.to_string());
        self.update_active_guide();
    }

    /// Number of distinct guides shown as single marks since enabling.
    pub fn shown_guides_count(&self) -> usize {
        self.shown_guides.len()
    }

    /// Zooms the map into a tapped cluster.
    pub fn on_cluster_selected(&mut self, mark_id: MarkId, viewport: &Viewport) {
        let pivot = {
            let store = self.marks.borrow();
            match store.mark(mark_id) {
                Some(mark) if mark.kind == MarkKind::GuideCluster => mark.pivot(),
                _ => {
                    warn!(?mark_id, "selected cluster mark not found");
                    return;
                }
            }
        };

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.animate_scale(
                self.config.cluster_scale_factor,
                viewport.g_to_p(pivot),
                true,
            );
        }
    }

    /// Makes a tapped guide mark the active guide.
    pub fn on_guide_selected(&mut self, mark_id: MarkId) {
        let marks = Rc::clone(&self.marks);
        {
            let mut store = marks.borrow_mut();
            let Some((pivot, guide_id)) = store
                .mark(mark_id)
                .filter(|m| m.kind == MarkKind::Guide)
                .map(|m| (m.pivot(), m.guide_id.clone()))
            else {
                warn!(?mark_id, "selected guide mark not found");
                return;
            };

            let mut es = EditSession::new(&mut *store);
            es.clear_group(MarkKind::GuideSelection);
            es.create_mark(MarkKind::GuideSelection, pivot);
            self.active_guide = Some(guide_id);
        }

        self.notify_gallery(false);
    }

    fn change_state(&mut self, new_state: GuidesState) {
        if self.state == new_state {
            return;
        }

        debug!(from = %self.state, to = %new_state, "guides state changed");
        self.state = new_state;
        if let Some(listener) = self.on_state_changed.as_mut() {
            listener(new_state);
        }
    }

    fn notify_gallery(&mut self, reload: bool) {
        if let Some(listener) = self.on_gallery_changed.as_mut() {
            listener(reload);
        }
    }

    fn initialized_params(&self) -> Option<RequestParams> {
        self.params.filter(|p| !p.viewport.is_empty_interior())
    }

    fn is_similar(&self, current: &Viewport, next: &Viewport) -> bool {
        let current_scale = current.scale();
        if current_scale <= 0.0 {
            return false;
        }

        let scale_delta = (current_scale - next.scale()).abs() / current_scale;
        if scale_delta > self.config.scale_eps {
            return false;
        }

        let score = intersection_score(
            &current.global_rect().global_corners(),
            &next.global_rect().global_corners(),
        );
        score > self.config.min_intersection_score
    }

    fn request_guides(&mut self) {
        let Some(params) = self.initialized_params() else {
            debug!("no viewport yet, guides request deferred");
            return;
        };

        self.request_counter += 1;
        self.stats.requests_issued += 1;
        let request = GuidesRequest {
            generation: self.request_counter,
            rect: params.viewport.global_rect(),
            zoom: params.zoom,
        };
        debug!(generation = request.generation, zoom = request.zoom, "requesting guides");
        self.api.request_guides(request);
    }

    fn accepts_response(&mut self, generation: u64) -> bool {
        if self.state.is_paused() {
            trace!(generation, state = %self.state, "response ignored");
            return false;
        }
        if generation != self.request_counter {
            self.stats.stale_responses += 1;
            debug!(
                generation,
                latest = self.request_counter,
                "stale guides response dropped"
            );
            return false;
        }
        true
    }

    fn clear(&mut self) {
        self.active_guide = None;
        self.guides.clear();
        self.error_requests_count = 0;

        self.update_guides_marks();
    }

    fn update_guides_marks(&mut self) {
        let marks = Rc::clone(&self.marks);
        {
            let mut store = marks.borrow_mut();
            let mut es = EditSession::new(&mut *store);
            es.clear_group(MarkKind::GuideCluster);
            es.clear_group(MarkKind::Guide);

            for guide in &self.guides {
                self.next_mark_index += 1;
                let index = self.next_mark_index;

                if guide.is_cluster() {
                    let Some(mark) = es.create_mark(MarkKind::GuideCluster, guide.point) else {
                        warn!(index, "mark store dropped a cluster mark");
                        continue;
                    };
                    mark.set_guides_count(guide.sights_count, guide.outdoor_count);
                    mark.set_index(index);
                } else {
                    let id = &guide.guide_info.id;
                    let downloaded = es.has_downloaded(id);
                    let Some(mark) = es.create_mark(MarkKind::Guide, guide.point) else {
                        warn!(index, guide_id = %id, "mark store dropped a guide mark");
                        continue;
                    };
                    mark.set_guide_type(guide.guide_type());
                    mark.set_guide_id(id.as_str());
                    mark.set_downloaded(downloaded);
                    mark.set_index(index);
                    self.shown_guides.insert(id.clone());
                }
            }
        }

        self.update_active_guide();
    }

    fn update_active_guide(&mut self) {
        let marks = Rc::clone(&self.marks);
        let mut store = marks.borrow_mut();
        let mut es = EditSession::new(&mut *store);
        es.clear_group(MarkKind::GuideSelection);

        if let Some(active) = self.active_guide.as_deref() {
            let pivot = es
                .mark_ids(MarkKind::Guide)
                .into_iter()
                .filter_map(|id| es.mark(id))
                .find(|m| m.guide_id == active)
                .map(|m| m.pivot());
            if let Some(pivot) = pivot {
                es.create_mark(MarkKind::GuideSelection, pivot);
                return;
            }
            debug!(guide = active, "active guide is no longer on the map");
        }

        self.active_guide = None;
    }
}
