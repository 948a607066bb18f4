use serde::Serialize;

/// Counters describing how the refresh controller spent its requests.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshStats {
    pub requests_issued: u64,
    /// Viewport changes absorbed by the similarity check.
    pub requests_suppressed: u64,
    pub retries: u64,
    pub successes: u64,
    pub failures: u64,
    /// Answers dropped because a newer request superseded them.
    pub stale_responses: u64,
}
