//! Adaptive group construction.
//!
//! An adaptive group is a subset of one switchable set among which a
//! bitrate-switching policy may move freely at runtime. Only the eligible
//! set is built here; when to switch is not.

use std::collections::HashSet;

use crate::{
    capabilities::{CapabilityMatrix, CapabilityRow, RequiredAdaptiveSupport, TrackCapability},
    catalog::{Catalog, SwitchableSet},
    format::VideoFormat,
    parameters::SelectionParameters,
    viewport::viewport_filtered_indices,
};

/// Which mime type an adaptive candidate must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeTypeFilter<'a> {
    Any,
    /// Exact match, including a missing mime type only matching another one.
    Exact(Option<&'a str>),
}

impl MimeTypeFilter<'_> {
    pub fn matches(&self, format: &VideoFormat) -> bool {
        match self {
            MimeTypeFilter::Any => true,
            MimeTypeFilter::Exact(mime_type) => format.mime_type() == *mime_type,
        }
    }
}

/// Whether a single representation may join an adaptive group.
pub fn is_supported_adaptive_track(
    format: &VideoFormat,
    mime_type: MimeTypeFilter<'_>,
    capability: TrackCapability,
    required_adaptive_support: RequiredAdaptiveSupport,
    parameters: &SelectionParameters,
) -> bool {
    if format.is_trick_play() {
        return false;
    }

    capability
        .support
        .is_supported(parameters.adaptive_exceed_renderer_capabilities)
        && required_adaptive_support.accepts(capability.adaptive)
        && mime_type.matches(format)
        && parameters.width.contains(format.width)
        && parameters.height.contains(format.height)
        && parameters.frame_rate.contains(format.frame_rate)
        && parameters.bitrate.contains(format.bitrate)
}

/// Members of `set` that form an adaptive group, or an empty list when fewer
/// than two qualify.
pub fn adaptive_tracks_for_set(
    set: &SwitchableSet,
    capabilities: &CapabilityRow,
    allow_mixed_mime_types: bool,
    required_adaptive_support: RequiredAdaptiveSupport,
    parameters: &SelectionParameters,
) -> Vec<usize> {
    if set.len() < 2 {
        return Vec::new();
    }

    let mut selected = viewport_filtered_indices(set, &parameters.viewport);
    if selected.len() < 2 {
        return Vec::new();
    }

    let is_eligible = |index: usize, mime_type: MimeTypeFilter| {
        is_supported_adaptive_track(
            set.format(index),
            mime_type,
            capabilities.track(index),
            required_adaptive_support,
            parameters,
        )
    };

    let mut mime_type = MimeTypeFilter::Any;
    if !allow_mixed_mime_types {
        // pin the mime type with the most adaptive tracks, first seen wins ties
        let mut seen = HashSet::new();
        let mut selected_count = 0;
        for &index in &selected {
            let candidate = set.format(index).mime_type();
            if !seen.insert(candidate) {
                continue;
            }

            let filter = MimeTypeFilter::Exact(candidate);
            let count = selected.iter().filter(|&&i| is_eligible(i, filter)).count();
            if count > selected_count {
                mime_type = filter;
                selected_count = count;
            }
        }
        tracing::trace!(?mime_type, count = selected_count, "Pinned adaptive mime type");
    }

    selected.retain(|&index| is_eligible(index, mime_type));

    if selected.len() < 2 {
        Vec::new()
    } else {
        selected
    }
}

/// The first switchable set of `catalog` that yields an adaptive group.
pub fn select_adaptive(
    catalog: &Catalog,
    capabilities: &CapabilityMatrix,
    parameters: &SelectionParameters,
) -> Option<(usize, Vec<usize>)> {
    let required_adaptive_support =
        RequiredAdaptiveSupport::new(parameters.allow_non_seamless_adaptiveness);

    catalog.iter().enumerate().find_map(|(group, set)| {
        let row = capabilities.row(group);
        let allow_mixed_mime_types = parameters.allow_mixed_mime_type_adaptiveness
            && required_adaptive_support.accepts(row.mixed_mime_type_adaptation);

        let tracks = adaptive_tracks_for_set(
            set,
            row,
            allow_mixed_mime_types,
            required_adaptive_support,
            parameters,
        );
        (!tracks.is_empty()).then_some((group, tracks))
    })
}
