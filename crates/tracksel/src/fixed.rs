use crate::{
    capabilities::CapabilityMatrix,
    catalog::Catalog,
    parameters::SelectionParameters,
    score::{TrackScore, TrackScorer},
    viewport::viewport_filtered_indices,
};

/// The single best representation across every switchable set, as
/// `(group, track)`.
///
/// Candidates are visited in catalog order then member order; a later one
/// replaces the incumbent only with a strictly greater score.
pub fn select_fixed<S>(
    catalog: &Catalog,
    capabilities: &CapabilityMatrix,
    parameters: &SelectionParameters,
    scorer: &S,
) -> Option<(usize, usize)>
where
    S: TrackScorer + ?Sized,
{
    let mut selected: Option<(usize, usize, S::Score)> = None;

    for (group, set) in catalog.iter().enumerate() {
        let viewport_filtered = viewport_filtered_indices(set, &parameters.viewport);
        let row = capabilities.row(group);

        for (track, format) in set.iter().enumerate() {
            if format.is_trick_play() {
                continue;
            }

            let support = row.track(track).support;
            if !support.is_supported(parameters.exceed_renderer_capabilities_if_necessary) {
                continue;
            }

            let score = scorer.score(
                format,
                parameters,
                support,
                viewport_filtered.contains(&track),
            );
            let within_max_constraints = score.is_within_max_constraints();
            if !within_max_constraints && !parameters.exceed_video_constraints_if_necessary {
                continue;
            }

            let replaces = match &selected {
                Some((_, _, incumbent)) => score > *incumbent,
                None => true,
            };
            if replaces {
                selected = Some((group, track, score));
            }
        }
    }

    selected.map(|(group, track, _)| (group, track))
}
