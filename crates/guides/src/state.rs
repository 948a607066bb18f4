use serde::Serialize;

/// Lifecycle of the guides layer as observers see it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GuidesState {
    Disabled,
    /// Enabled, waiting for the first answer.
    Enabled,
    HasData,
    NoData,
    /// A request failed; a retry is already on its way.
    NetworkError,
    /// The attempt budget is spent; only `reconnect` resumes requests.
    FatalNetworkError,
}

impl GuidesState {
    pub fn is_enabled(self) -> bool {
        self != GuidesState::Disabled
    }

    /// States in which viewport changes only get recorded.
    pub fn is_paused(self) -> bool {
        matches!(
            self,
            GuidesState::Disabled | GuidesState::FatalNetworkError
        )
    }
}

impl std::fmt::Display for GuidesState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GuidesState::Disabled => "Disabled",
            GuidesState::Enabled => "Enabled",
            GuidesState::HasData => "HasData",
            GuidesState::NoData => "NoData",
            GuidesState::NetworkError => "NetworkError",
            GuidesState::FatalNetworkError => "FatalNetworkError",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::GuidesState;

    #[test]
    fn only_disabled_is_not_enabled() {
        assert!(!GuidesState::Disabled.is_enabled());
        assert!(GuidesState::FatalNetworkError.is_enabled());
        assert!(GuidesState::NetworkError.is_enabled());
    }

    #[test]
    fn paused_states() {
        assert!(GuidesState::Disabled.is_paused());
        assert!(GuidesState::FatalNetworkError.is_paused());
        assert!(!GuidesState::HasData.is_paused());
    }

    #[test]
    fn display_names() {
        assert_eq!(GuidesState::FatalNetworkError.to_string(), "FatalNetworkError");
        assert_eq!(GuidesState::NoData.to_string(), "NoData");
    }
}
