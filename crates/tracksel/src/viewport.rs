use crate::{catalog::SwitchableSet, parameters::Viewport};

/// A representation counts as filling the viewport above this share of its
/// maximum displayable size in both dimensions.
const FRACTION_TO_CONSIDER_FULLSCREEN: f32 = 0.98;

/// Indices of the members of `set` whose resolution is not needlessly above
/// what `viewport` can show, in their original order.
///
/// The smallest representation that nearly fills the viewport sets a pixel
/// ceiling; anything above it, or of unknown size, is dropped. Without a
/// viewport or without any known size nothing is filtered.
pub fn viewport_filtered_indices(set: &SwitchableSet, viewport: &Viewport) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..set.len()).collect();
    if !viewport.is_set() {
        return indices;
    }

    let mut max_pixels_to_retain: Option<u64> = None;
    for format in set.iter() {
        let (Some(width), Some(height)) = (format.width, format.height) else {
            continue;
        };
        if width == 0 || height == 0 {
            continue;
        }

        let (max_width, max_height) = max_video_size_in_viewport(
            viewport.orientation_may_change,
            viewport.width,
            viewport.height,
            width,
            height,
        );
        let pixels = width as u64 * height as u64;
        if width >= fullscreen_threshold(max_width)
            && height >= fullscreen_threshold(max_height)
            && max_pixels_to_retain.map_or(true, |max| pixels < max)
        {
            max_pixels_to_retain = Some(pixels);
        }
    }

    if let Some(max_pixels) = max_pixels_to_retain {
        indices.retain(|&index| {
            set.format(index)
                .pixel_count()
                .is_some_and(|pixels| pixels <= max_pixels)
        });
    }

    indices
}

/// Largest size a `video_width`x`video_height` picture takes when scaled to
/// fit the viewport with its aspect ratio kept.
///
/// With `orientation_may_change`, a viewport whose orientation differs from
/// the video is measured rotated.
pub fn max_video_size_in_viewport(
    orientation_may_change: bool,
    viewport_width: u32,
    viewport_height: u32,
    video_width: u32,
    video_height: u32,
) -> (u32, u32) {
    let (viewport_width, viewport_height) = if orientation_may_change
        && (video_width > video_height) != (viewport_width > viewport_height)
    {
        (viewport_height, viewport_width)
    } else {
        (viewport_width, viewport_height)
    };

    let (vw, vh) = (viewport_width as u64, viewport_height as u64);
    let (w, h) = (video_width as u64, video_height as u64);
    if w * vh >= h * vw {
        // letterboxed top and bottom
        (viewport_width, ceil_divide(vw * h, w))
    } else {
        // pillarboxed left and right
        (ceil_divide(vh * w, h), viewport_height)
    }
}

fn ceil_divide(numerator: u64, denominator: u64) -> u32 {
    let quotient = (numerator + denominator - 1) / denominator;
    u32::try_from(quotient).unwrap_or(u32::MAX)
}

fn fullscreen_threshold(size: u32) -> u32 {
    (size as f32 * FRACTION_TO_CONSIDER_FULLSCREEN) as u32
}
