//! Scripted replay of user actions and service answers against a
//! [`GuidesManager`].

use std::cell::RefCell;
use std::rc::Rc;

use foundation::viewport::Viewport;
use guides::{
    FetchError, GuidesConfig, GuidesGallery, GuidesManager, GuidesOnMap, GuidesResponse,
    GuidesState, QueuedApi, RefreshStats,
};
use marks::{MarkKind, MarkStore, MemoryMarkStore};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Enable,
    Disable,
    Reconnect,
    Viewport {
        viewport: Viewport,
        zoom: u8,
    },
    /// Answers the oldest pending request.
    Respond {
        #[serde(default)]
        guides: GuidesOnMap,
    },
    /// Fails the oldest pending request.
    Fail {
        #[serde(default = "default_fail_reason")]
        reason: String,
    },
    SelectGuide {
        id: String,
    },
    /// Taps the n-th guide mark on the map.
    TapGuide {
        index: usize,
    },
    SetLocale {
        locale: String,
    },
}

fn default_fail_reason() -> String {
    "unavailable".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scenario {
    /// Guide ids already saved on the device.
    #[serde(default)]
    pub downloaded: Vec<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step {step}: no pending guides request to answer")]
    NoPendingRequest { step: usize },
    #[error("step {step}: no guide mark #{index} on the map")]
    NoSuchMark { step: usize, index: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkCounts {
    pub clusters: usize,
    pub guides: usize,
    pub selections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub states: Vec<GuidesState>,
    pub final_state: GuidesState,
    pub active_guide: Option<String>,
    pub shown_guides: usize,
    pub pending_requests: usize,
    pub marks: MarkCounts,
    pub gallery: GuidesGallery,
    pub stats: RefreshStats,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn run(&self, config: GuidesConfig) -> Result<Report, ScenarioError> {
        let api = QueuedApi::new();
        let store = Rc::new(RefCell::new(MemoryMarkStore::new()));
        for id in &self.downloaded {
            store.borrow_mut().add_downloaded(id.clone());
        }

        let shared: Rc<RefCell<dyn MarkStore>> = store.clone();
        let mut manager = GuidesManager::new(config, Box::new(api.clone()), shared);

        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        manager.set_state_listener(move |state| sink.borrow_mut().push(state));

        for (step_index, step) in self.steps.iter().enumerate() {
            info!(step = step_index, ?step, "replaying");
            match step {
                Step::Enable => manager.set_enabled(true),
                Step::Disable => manager.set_enabled(false),
                Step::Reconnect => manager.reconnect(),
                Step::Viewport { viewport, zoom } => manager.update_viewport(*viewport, *zoom),
                Step::Respond { guides } => {
                    let request = api
                        .pop_front()
                        .ok_or(ScenarioError::NoPendingRequest { step: step_index })?;
                    manager.handle_response(GuidesResponse::success(&request, guides.clone()));
                }
                Step::Fail { reason } => {
                    let request = api
                        .pop_front()
                        .ok_or(ScenarioError::NoPendingRequest { step: step_index })?;
                    manager.handle_response(GuidesResponse::failure(
                        &request,
                        FetchError::new(reason.as_str()),
                    ));
                }
                Step::SelectGuide { id } => manager.set_active_guide(id),
                Step::TapGuide { index } => {
                    let mark_id = store
                        .borrow()
                        .mark_ids(MarkKind::Guide)
                        .get(*index)
                        .copied()
                        .ok_or(ScenarioError::NoSuchMark {
                            step: step_index,
                            index: *index,
                        })?;
                    manager.on_guide_selected(mark_id);
                }
                Step::SetLocale { locale } => manager.set_locale(locale.as_str()),
            }
        }

        let marks = {
            let store = store.borrow();
            MarkCounts {
                clusters: store.mark_count(MarkKind::GuideCluster),
                guides: store.mark_count(MarkKind::Guide),
                selections: store.mark_count(MarkKind::GuideSelection),
            }
        };

        let report = Report {
            states: states.borrow().clone(),
            final_state: manager.state(),
            active_guide: manager.active_guide().map(str::to_string),
            shown_guides: manager.shown_guides_count(),
            pending_requests: api.len(),
            marks,
            gallery: manager.gallery(),
            stats: manager.stats(),
        };
        Ok(report)
    }
}
