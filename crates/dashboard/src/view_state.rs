use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::{DataOrigin, FallbackReason, LoadOutcome};
use crate::model::DashboardDataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Overview,
    Geographic,
    Analytics,
    Recommendations,
}

impl Tab {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Geographic,
        Self::Analytics,
        Self::Recommendations,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Geographic => "geographic",
            Self::Analytics => "analytics",
            Self::Recommendations => "recommendations",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Geographic => "Geographic",
            Self::Analytics => "Analytics",
            Self::Recommendations => "Recommendations",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Geographic => 1,
            Self::Analytics => 2,
            Self::Recommendations => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Overview),
            1 => Some(Self::Geographic),
            2 => Some(Self::Analytics),
            3 => Some(Self::Recommendations),
            _ => None,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Overview => Self::Geographic,
            Self::Geographic => Self::Analytics,
            Self::Analytics => Self::Recommendations,
            Self::Recommendations => Self::Overview,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Overview => Self::Recommendations,
            Self::Geographic => Self::Overview,
            Self::Analytics => Self::Geographic,
            Self::Recommendations => Self::Analytics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum LoadPhase {
    Loading,
    Loaded,
    LoadedFallback { reason: FallbackReason, detail: String },
}

impl LoadPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::LoadedFallback { .. } => "loaded-fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot finish loading: view state is already {from}")]
pub struct TransitionError {
    pub from: &'static str,
}

/// Everything the rendering surface needs between frames.
///
/// The only transitions are `loading -> loaded` and
/// `loading -> loaded-fallback`; a reload starts a fresh state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    tab: Tab,
    phase: LoadPhase,
    dataset: Option<DashboardDataset>,
}

impl ViewState {
    pub const fn loading() -> Self {
        Self {
            tab: Tab::Overview,
            phase: LoadPhase::Loading,
            dataset: None,
        }
    }

    /// A loading state that keeps the currently selected tab.
    pub const fn reloading(&self) -> Self {
        Self {
            tab: self.tab,
            phase: LoadPhase::Loading,
            dataset: None,
        }
    }

    pub fn finish_loading(&mut self, outcome: LoadOutcome) -> Result<(), TransitionError> {
        if self.phase != LoadPhase::Loading {
            return Err(TransitionError {
                from: self.phase.as_str(),
            });
        }

        self.phase = match outcome.origin {
            DataOrigin::Remote => LoadPhase::Loaded,
            DataOrigin::Fallback { reason, detail } => LoadPhase::LoadedFallback { reason, detail },
        };
        self.dataset = Some(outcome.dataset);
        Ok(())
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub const fn tab(&self) -> Tab {
        self.tab
    }

    pub const fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    pub const fn dataset(&self) -> Option<&DashboardDataset> {
        self.dataset.as_ref()
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self.phase, LoadPhase::LoadedFallback { .. })
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{resolve, LoadError};
    use crate::sample::sample_dataset;

    #[test]
    fn starts_loading_without_data() {
        let state = ViewState::loading();
        assert!(state.is_loading());
        assert!(state.dataset().is_none());
        assert_eq!(state.tab(), Tab::Overview);
    }

    #[test]
    fn remote_outcome_moves_to_loaded() -> Result<(), TransitionError> {
        let mut state = ViewState::loading();
        state.finish_loading(LoadOutcome::remote(sample_dataset()))?;
        assert_eq!(state.phase(), &LoadPhase::Loaded);
        assert!(!state.is_fallback());
        assert!(state.dataset().is_some());
        Ok(())
    }

    #[test]
    fn fallback_outcome_moves_to_loaded_fallback() -> Result<(), TransitionError> {
        let mut state = ViewState::loading();
        state.finish_loading(resolve(Err::<Vec<u8>, _>(LoadError::Status { status: 500 })))?;
        assert!(state.is_fallback());
        assert_eq!(state.phase().as_str(), "loaded-fallback");
        Ok(())
    }

    #[test]
    fn finishing_twice_is_rejected() -> Result<(), TransitionError> {
        let mut state = ViewState::loading();
        state.finish_loading(LoadOutcome::remote(sample_dataset()))?;

        let error = state.finish_loading(LoadOutcome::remote(sample_dataset()));
        assert_eq!(error, Err(TransitionError { from: "loaded" }));
        Ok(())
    }

    #[test]
    fn reload_keeps_tab_and_drops_data() -> Result<(), TransitionError> {
        let mut state = ViewState::loading();
        state.finish_loading(LoadOutcome::remote(sample_dataset()))?;
        state.select_tab(Tab::Analytics);

        let reloaded = state.reloading();
        assert!(reloaded.is_loading());
        assert!(reloaded.dataset().is_none());
        assert_eq!(reloaded.tab(), Tab::Analytics);
        Ok(())
    }

    #[test]
    fn tabs_cycle_both_ways() {
        assert_eq!(Tab::Recommendations.next(), Tab::Overview);
        assert_eq!(Tab::Overview.previous(), Tab::Recommendations);
        for tab in Tab::ALL {
            assert_eq!(Tab::from_index(tab.index()), Some(tab));
            assert_eq!(tab.next().previous(), tab);
        }
    }

    #[test]
    fn state_serializes_with_phase_tag() -> Result<(), serde_json::Error> {
        let state = ViewState::loading();
        let json = serde_json::to_value(&state)?;
        assert_eq!(json["tab"], "overview");
        assert_eq!(json["phase"]["status"], "loading");
        Ok(())
    }
}
