use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TrackSelError, TrackSelResult};

/// Values that have a natural "no limit" on both ends.
pub trait Unbounded: Copy + PartialOrd {
    const LOWEST: Self;
    const HIGHEST: Self;
}

impl Unbounded for u32 {
    const LOWEST: Self = 0;
    const HIGHEST: Self = u32::MAX;
}

impl Unbounded for f32 {
    const LOWEST: Self = 0.0;
    const HIGHEST: Self = f32::MAX;
}

/// Inclusive `[min, max]` range. Unknown values always satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Unbounded"))]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: Unbounded> Default for Bounds<T> {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl<T: Unbounded> Bounds<T> {
    pub const UNBOUNDED: Bounds<T> = Bounds {
        min: T::LOWEST,
        max: T::HIGHEST,
    };

    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: Option<T>) -> bool {
        self.within_min(value) && self.within_max(value)
    }

    pub fn within_min(&self, value: Option<T>) -> bool {
        value.map_or(true, |value| self.min <= value)
    }

    pub fn within_max(&self, value: Option<T>) -> bool {
        value.map_or(true, |value| value <= self.max)
    }
}

/// On-screen area the video is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// `u32::MAX` when unset.
    pub width: u32,
    /// `u32::MAX` when unset.
    pub height: u32,
    /// Whether the device may rotate, swapping the viewport orientation.
    pub orientation_may_change: bool,
}

impl Viewport {
    pub const UNSET: Viewport = Viewport {
        width: u32::MAX,
        height: u32::MAX,
        orientation_may_change: true,
    };

    pub fn new(width: u32, height: u32, orientation_may_change: bool) -> Self {
        Self {
            width,
            height,
            orientation_may_change,
        }
    }

    pub fn is_set(&self) -> bool {
        self.width != u32::MAX && self.height != u32::MAX
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::UNSET
    }
}

impl FromStr for Viewport {
    type Err = TrackSelError;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`. Orientation is fixed.
    fn from_str(s: &str) -> TrackSelResult<Self> {
        let invalid = || TrackSelError::InvalidViewport(s.to_string());

        let (width, height) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(invalid)?;
        let width = width.trim().parse().map_err(|_| invalid())?;
        let height = height.trim().parse().map_err(|_| invalid())?;
        Ok(Self::new(width, height, false))
    }
}

/// Constraints and switches consulted by every selection request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionParameters {
    pub width: Bounds<u32>,
    pub height: Bounds<u32>,
    pub frame_rate: Bounds<f32>,
    pub bitrate: Bounds<u32>,

    pub viewport: Viewport,

    /// Allow an adaptive group to mix mime types, if the decoder can.
    pub allow_mixed_mime_type_adaptiveness: bool,
    /// Allow adaptive switching that is not seamless.
    pub allow_non_seamless_adaptiveness: bool,
    /// Fall back to a track violating max constraints when nothing else fits.
    pub exceed_video_constraints_if_necessary: bool,
    /// Let the fixed selection pick tracks above decoder capabilities.
    pub exceed_renderer_capabilities_if_necessary: bool,
    /// Let adaptive groups contain tracks above decoder capabilities.
    ///
    /// Some devices under-report what their decoder handles; deployments turn
    /// this on per device model through the config file.
    pub adaptive_exceed_renderer_capabilities: bool,

    pub force_highest_supported_bitrate: bool,
    pub force_lowest_bitrate: bool,
}

impl Default for SelectionParameters {
    fn default() -> Self {
        Self {
            width: Bounds::UNBOUNDED,
            height: Bounds::UNBOUNDED,
            frame_rate: Bounds::UNBOUNDED,
            bitrate: Bounds::UNBOUNDED,
            viewport: Viewport::UNSET,
            allow_mixed_mime_type_adaptiveness: false,
            allow_non_seamless_adaptiveness: true,
            exceed_video_constraints_if_necessary: true,
            exceed_renderer_capabilities_if_necessary: true,
            adaptive_exceed_renderer_capabilities: false,
            force_highest_supported_bitrate: false,
            force_lowest_bitrate: false,
        }
    }
}

impl SelectionParameters {
    pub fn builder() -> SelectionParametersBuilder {
        SelectionParametersBuilder::new()
    }

    pub fn to_builder(&self) -> SelectionParametersBuilder {
        SelectionParametersBuilder {
            parameters: self.clone(),
        }
    }

    /// Adaptive selection is skipped when a single extreme bitrate is forced.
    pub fn forces_fixed_selection(&self) -> bool {
        self.force_highest_supported_bitrate || self.force_lowest_bitrate
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectionParametersBuilder {
    parameters: SelectionParameters,
}

impl SelectionParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_video_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.parameters.width.max = max_width;
        self.parameters.height.max = max_height;
        self
    }

    /// Limit to standard definition, i.e. anything below 1280x720.
    pub fn max_video_size_sd(self) -> Self {
        self.max_video_size(1279, 719)
    }

    pub fn clear_video_size_constraints(self) -> Self {
        self.max_video_size(u32::MAX, u32::MAX)
    }

    pub fn min_video_size(mut self, min_width: u32, min_height: u32) -> Self {
        self.parameters.width.min = min_width;
        self.parameters.height.min = min_height;
        self
    }

    pub fn max_video_frame_rate(mut self, max_frame_rate: f32) -> Self {
        self.parameters.frame_rate.max = max_frame_rate;
        self
    }

    pub fn min_video_frame_rate(mut self, min_frame_rate: f32) -> Self {
        self.parameters.frame_rate.min = min_frame_rate;
        self
    }

    pub fn max_video_bitrate(mut self, max_bitrate: u32) -> Self {
        self.parameters.bitrate.max = max_bitrate;
        self
    }

    pub fn min_video_bitrate(mut self, min_bitrate: u32) -> Self {
        self.parameters.bitrate.min = min_bitrate;
        self
    }

    pub fn viewport_size(mut self, width: u32, height: u32, orientation_may_change: bool) -> Self {
        self.parameters.viewport = Viewport::new(width, height, orientation_may_change);
        self
    }

    pub fn clear_viewport_size(mut self) -> Self {
        self.parameters.viewport = Viewport::UNSET;
        self
    }

    pub fn allow_mixed_mime_type_adaptiveness(mut self, allow: bool) -> Self {
        self.parameters.allow_mixed_mime_type_adaptiveness = allow;
        self
    }

    pub fn allow_non_seamless_adaptiveness(mut self, allow: bool) -> Self {
        self.parameters.allow_non_seamless_adaptiveness = allow;
        self
    }

    pub fn exceed_video_constraints_if_necessary(mut self, exceed: bool) -> Self {
        self.parameters.exceed_video_constraints_if_necessary = exceed;
        self
    }

    pub fn exceed_renderer_capabilities_if_necessary(mut self, exceed: bool) -> Self {
        self.parameters.exceed_renderer_capabilities_if_necessary = exceed;
        self
    }

    pub fn adaptive_exceed_renderer_capabilities(mut self, exceed: bool) -> Self {
        self.parameters.adaptive_exceed_renderer_capabilities = exceed;
        self
    }

    pub fn force_highest_supported_bitrate(mut self, force: bool) -> Self {
        self.parameters.force_highest_supported_bitrate = force;
        self
    }

    pub fn force_lowest_bitrate(mut self, force: bool) -> Self {
        self.parameters.force_lowest_bitrate = force;
        self
    }

    pub fn build(self) -> SelectionParameters {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(100u32, 200);
        assert!(bounds.contains(Some(100)));
        assert!(bounds.contains(Some(200)));
        assert!(!bounds.contains(Some(99)));
        assert!(!bounds.contains(Some(201)));
        assert!(bounds.contains(None));

        assert!(Bounds::<f32>::UNBOUNDED.contains(Some(240.0)));
    }

    #[test]
    fn test_viewport_from_str() {
        let viewport: Viewport = "1920x1080".parse().unwrap();
        assert_eq!(viewport, Viewport::new(1920, 1080, false));
        assert!(viewport.is_set());

        assert!("1920".parse::<Viewport>().is_err());
        assert!("axb".parse::<Viewport>().is_err());
        assert!(!Viewport::UNSET.is_set());
    }

    #[test]
    fn test_partial_bounds_from_toml() {
        let parameters: SelectionParameters = toml::from_str(
            r#"
            allow_mixed_mime_type_adaptiveness = true

            [width]
            max = 1920

            [viewport]
            width = 1280
            height = 720
            "#,
        )
        .unwrap();

        assert_eq!(parameters.width, Bounds::new(0, 1920));
        assert_eq!(parameters.height, Bounds::UNBOUNDED);
        assert_eq!(parameters.viewport, Viewport::new(1280, 720, true));
        assert!(parameters.allow_mixed_mime_type_adaptiveness);
        assert!(parameters.allow_non_seamless_adaptiveness);
    }

    #[test]
    fn test_builder() {
        let parameters = SelectionParameters::builder()
            .max_video_size_sd()
            .max_video_bitrate(2_000_000)
            .force_lowest_bitrate(true)
            .build();

        assert_eq!(parameters.width.max, 1279);
        assert_eq!(parameters.height.max, 719);
        assert_eq!(parameters.bitrate.max, 2_000_000);
        assert!(parameters.forces_fixed_selection());

        let cleared = parameters.to_builder().clear_video_size_constraints().build();
        assert_eq!(cleared.width, Bounds::UNBOUNDED);
        assert_eq!(cleared.bitrate.max, 2_000_000);
    }
}
