use std::cmp::Ordering;

use crate::{capabilities::FormatSupport, format::VideoFormat, parameters::SelectionParameters};

/// Score of one fixed-selection candidate. Greater is better.
pub trait TrackScore: Ord {
    /// `false` when the candidate breaks a max constraint or sits outside the
    /// viewport-relevant subset of its set.
    fn is_within_max_constraints(&self) -> bool;
}

/// Ranks candidates for the fixed selection.
pub trait TrackScorer {
    type Score: TrackScore;

    fn score(
        &self,
        format: &VideoFormat,
        parameters: &SelectionParameters,
        support: FormatSupport,
        selected_by_viewport: bool,
    ) -> Self::Score;
}

impl<F, S> TrackScorer for F
where
    F: Fn(&VideoFormat, &SelectionParameters, FormatSupport, bool) -> S,
    S: TrackScore,
{
    type Score = S;

    fn score(
        &self,
        format: &VideoFormat,
        parameters: &SelectionParameters,
        support: FormatSupport,
        selected_by_viewport: bool,
    ) -> Self::Score {
        self(format, parameters, support, selected_by_viewport)
    }
}

/// Scores with [`VideoTrackScore`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultScorer;

impl TrackScorer for DefaultScorer {
    type Score = VideoTrackScore;

    fn score(
        &self,
        format: &VideoFormat,
        parameters: &SelectionParameters,
        support: FormatSupport,
        selected_by_viewport: bool,
    ) -> VideoTrackScore {
        VideoTrackScore::new(format, parameters, support, selected_by_viewport)
    }
}

/// Prefers tracks the decoder handles, then tracks inside the max and min
/// constraints, then the highest quality. Among tracks that break a max
/// constraint or the decoder limits, the lowest quality wins instead.
#[derive(Debug, Clone, Copy)]
pub struct VideoTrackScore {
    within_renderer_capabilities: bool,
    within_max_constraints: bool,
    within_min_constraints: bool,
    force_lowest_bitrate: bool,
    pixel_count: Option<u64>,
    bitrate: Option<u32>,
}

impl VideoTrackScore {
    pub fn new(
        format: &VideoFormat,
        parameters: &SelectionParameters,
        support: FormatSupport,
        selected_by_viewport: bool,
    ) -> Self {
        Self {
            within_renderer_capabilities: support.is_supported(false),
            within_max_constraints: selected_by_viewport
                && parameters.width.within_max(format.width)
                && parameters.height.within_max(format.height)
                && parameters.frame_rate.within_max(format.frame_rate)
                && parameters.bitrate.within_max(format.bitrate),
            within_min_constraints: parameters.width.within_min(format.width)
                && parameters.height.within_min(format.height)
                && parameters.frame_rate.within_min(format.frame_rate)
                && parameters.bitrate.within_min(format.bitrate),
            force_lowest_bitrate: parameters.force_lowest_bitrate,
            pixel_count: format.pixel_count(),
            bitrate: format.bitrate,
        }
    }

    fn quality_ordering(&self, ordering: Ordering) -> Ordering {
        if self.within_max_constraints && self.within_renderer_capabilities {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

impl TrackScore for VideoTrackScore {
    fn is_within_max_constraints(&self) -> bool {
        self.within_max_constraints
    }
}

impl Ord for VideoTrackScore {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None` sorts below any known value before the direction is applied
        let lowest_bitrate = if self.force_lowest_bitrate {
            self.bitrate.cmp(&other.bitrate).reverse()
        } else {
            Ordering::Equal
        };

        self.within_renderer_capabilities
            .cmp(&other.within_renderer_capabilities)
            .then(self.within_max_constraints.cmp(&other.within_max_constraints))
            .then(self.within_min_constraints.cmp(&other.within_min_constraints))
            .then(lowest_bitrate)
            .then_with(|| self.quality_ordering(self.pixel_count.cmp(&other.pixel_count)))
            .then_with(|| self.quality_ordering(self.bitrate.cmp(&other.bitrate)))
    }
}

impl PartialOrd for VideoTrackScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VideoTrackScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VideoTrackScore {}
