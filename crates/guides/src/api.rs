use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use foundation::rect::AnyRect;

use crate::record::GuidesOnMap;

/// Failure reported by the guides service. The cause is only kept for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("guides request failed: {reason}")]
pub struct FetchError {
    reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// One logical guides request.
///
/// `generation` identifies the request chain; the answer must be handed back
/// with the same value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GuidesRequest {
    pub generation: u64,
    pub rect: AnyRect,
    pub zoom: u8,
}

/// Answer to a [`GuidesRequest`], delivered on the controller's thread.
#[derive(Debug, Clone, PartialEq)]
pub struct GuidesResponse {
    pub generation: u64,
    pub result: Result<GuidesOnMap, FetchError>,
}

impl GuidesResponse {
    pub fn success(request: &GuidesRequest, guides: GuidesOnMap) -> Self {
        Self {
            generation: request.generation,
            result: Ok(guides),
        }
    }

    pub fn failure(request: &GuidesRequest, error: FetchError) -> Self {
        Self {
            generation: request.generation,
            result: Err(error),
        }
    }
}

/// Client of the guides service.
///
/// `request_guides` must return immediately. Exactly one [`GuidesResponse`]
/// per request is later passed to `GuidesManager::handle_response` on the
/// thread that owns the manager.
pub trait GuidesApi {
    fn request_guides(&mut self, request: GuidesRequest);
}

/// [`GuidesApi`] that parks requests in a shared FIFO instead of sending
/// them. Clones share the queue, so a driver can keep one handle and answer
/// requests at its own pace.
#[derive(Debug, Clone, Default)]
pub struct QueuedApi {
    inner: Rc<RefCell<QueuedApiInner>>,
}

#[derive(Debug, Default)]
struct QueuedApiInner {
    pending: VecDeque<GuidesRequest>,
    issued: u64,
}

impl QueuedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest unanswered request.
    pub fn pop_front(&self) -> Option<GuidesRequest> {
        self.inner.borrow_mut().pending.pop_front()
    }

    /// Newest unanswered request.
    pub fn pop_back(&self) -> Option<GuidesRequest> {
        self.inner.borrow_mut().pending.pop_back()
    }

    pub fn pending(&self) -> Vec<GuidesRequest> {
        self.inner.borrow().pending.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().pending.is_empty()
    }

    /// Total number of requests ever received.
    pub fn issued(&self) -> u64 {
        self.inner.borrow().issued
    }
}

impl GuidesApi for QueuedApi {
    fn request_guides(&mut self, request: GuidesRequest) {
        let mut inner = self.inner.borrow_mut();
        inner.issued += 1;
        inner.pending.push_back(request);
    }
}
