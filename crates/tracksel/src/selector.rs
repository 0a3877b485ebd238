use serde::{Deserialize, Serialize};

use crate::{
    adaptive::select_adaptive,
    capabilities::CapabilityMatrix,
    catalog::Catalog,
    fixed::select_fixed,
    format::VideoFormat,
    parameters::SelectionParameters,
    score::{DefaultScorer, TrackScorer},
};

/// Outcome of one selection request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Selection {
    /// At least two members of switchable set `group` to switch between.
    Adaptive { group: usize, tracks: Vec<usize> },
    /// Exactly one member of switchable set `group`.
    Fixed { group: usize, track: usize },
    /// Nothing playable. Playback stays without video until inputs change.
    #[default]
    None,
}

impl Selection {
    pub fn group(&self) -> Option<usize> {
        match self {
            Selection::Adaptive { group, .. } | Selection::Fixed { group, .. } => Some(*group),
            Selection::None => None,
        }
    }

    pub fn tracks(&self) -> &[usize] {
        match self {
            Selection::Adaptive { tracks, .. } => tracks,
            Selection::Fixed { track, .. } => std::slice::from_ref(track),
            Selection::None => &[],
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    /// The selected representations of `catalog`.
    pub fn formats<'a>(&self, catalog: &'a Catalog) -> Vec<&'a VideoFormat> {
        let Some(set) = self.group().and_then(|group| catalog.sets.get(group)) else {
            return Vec::new();
        };
        self.tracks()
            .iter()
            .filter_map(|&track| set.formats.get(track))
            .collect()
    }
}

/// Picks the video representation(s) to decode.
///
/// An adaptive group is tried first, unless adaptiveness is disabled or a
/// single extreme bitrate is forced; otherwise, or when no set yields a
/// group, the best single representation is picked.
#[derive(Debug, Clone)]
pub struct TrackSelector<S = DefaultScorer> {
    parameters: SelectionParameters,
    scorer: S,
    adaptive: bool,
}

impl TrackSelector<DefaultScorer> {
    pub fn new(parameters: SelectionParameters) -> Self {
        Self::with_scorer(parameters, DefaultScorer)
    }
}

impl Default for TrackSelector<DefaultScorer> {
    fn default() -> Self {
        Self::new(SelectionParameters::default())
    }
}

impl<S> TrackSelector<S>
where
    S: TrackScorer,
{
    pub fn with_scorer(parameters: SelectionParameters, scorer: S) -> Self {
        Self {
            parameters,
            scorer,
            adaptive: true,
        }
    }

    /// Enable or disable the adaptive attempt. Enabled by default.
    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn parameters(&self) -> &SelectionParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: SelectionParameters) {
        self.parameters = parameters;
    }

    pub fn select(&self, catalog: &Catalog, capabilities: &CapabilityMatrix) -> Selection {
        let parameters = &self.parameters;

        if self.adaptive && !parameters.forces_fixed_selection() {
            if let Some((group, tracks)) = select_adaptive(catalog, capabilities, parameters) {
                tracing::debug!(group, ?tracks, "Selected adaptive video tracks");
                return Selection::Adaptive { group, tracks };
            }
            tracing::debug!("No adaptive video group, falling back to a fixed track");
        }

        match select_fixed(catalog, capabilities, parameters, &self.scorer) {
            Some((group, track)) => {
                tracing::debug!(group, track, "Selected fixed video track");
                Selection::Fixed { group, track }
            }
            None => {
                tracing::debug!("No video track selected");
                Selection::None
            }
        }
    }
}

/// Select with the default scoring policy and adaptiveness enabled.
pub fn select(
    catalog: &Catalog,
    capabilities: &CapabilityMatrix,
    parameters: &SelectionParameters,
) -> Selection {
    TrackSelector::new(parameters.clone()).select(catalog, capabilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_selects_nothing() {
        let selection = select(
            &Catalog::default(),
            &CapabilityMatrix::default(),
            &SelectionParameters::default(),
        );
        assert!(selection.is_none());
        assert_eq!(selection.group(), None);
        assert!(selection.tracks().is_empty());
    }

    #[test]
    fn test_selection_serialization() {
        let selection = Selection::Adaptive {
            group: 1,
            tracks: vec![0, 2],
        };
        assert_eq!(
            serde_json::to_string(&selection).unwrap(),
            r#"{"type":"adaptive","group":1,"tracks":[0,2]}"#
        );
        assert_eq!(
            serde_json::to_string(&Selection::None).unwrap(),
            r#"{"type":"none"}"#
        );
    }
}
