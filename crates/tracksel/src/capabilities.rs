//! Decoder capability snapshot consumed by the selector.
//!
//! Capability reporting itself lives outside this crate: a player hands in a
//! [`CapabilityMatrix`], either filled directly or produced from any
//! [`CapabilityProvider`] such as the config driven [`DecoderProfile`].

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, SwitchableSet},
    format::VideoFormat,
};

/// Serialized support level. Anything but a string is kept only to be
/// read as the unsupported level.
#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Name(String),
    Other(serde::de::IgnoredAny),
}

/// How well the device decoder handles a representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Label")]
pub enum FormatSupport {
    #[default]
    Unsupported,
    Handled,
    /// The decoder claims support but the format is above its advertised limits.
    ExceedsCapabilities,
}

impl FormatSupport {
    pub fn is_supported(self, allow_exceeds_capabilities: bool) -> bool {
        match self {
            FormatSupport::Handled => true,
            FormatSupport::ExceedsCapabilities => allow_exceeds_capabilities,
            FormatSupport::Unsupported => false,
        }
    }
}

impl From<&str> for FormatSupport {
    fn from(value: &str) -> Self {
        match value {
            "handled" | "supported" => FormatSupport::Handled,
            "exceeds_capabilities" => FormatSupport::ExceedsCapabilities,
            // unknown or contradictory labels read as unsupported
            _ => FormatSupport::Unsupported,
        }
    }
}

impl From<Label> for FormatSupport {
    fn from(value: Label) -> Self {
        match value {
            Label::Name(name) => FormatSupport::from(name.as_str()),
            Label::Other(_) => FormatSupport::Unsupported,
        }
    }
}

/// Whether the decoder can switch between representations without a reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Label")]
pub enum AdaptiveSupport {
    #[default]
    NotSupported,
    NotSeamless,
    Seamless,
}

impl From<&str> for AdaptiveSupport {
    fn from(value: &str) -> Self {
        match value {
            "seamless" => AdaptiveSupport::Seamless,
            "not_seamless" => AdaptiveSupport::NotSeamless,
            _ => AdaptiveSupport::NotSupported,
        }
    }
}

impl From<Label> for AdaptiveSupport {
    fn from(value: Label) -> Self {
        match value {
            Label::Name(name) => AdaptiveSupport::from(name.as_str()),
            Label::Other(_) => AdaptiveSupport::NotSupported,
        }
    }
}

/// The set of [`AdaptiveSupport`] levels a track must report to join an
/// adaptive group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredAdaptiveSupport {
    allow_not_seamless: bool,
}

impl RequiredAdaptiveSupport {
    pub fn new(allow_not_seamless: bool) -> Self {
        Self { allow_not_seamless }
    }

    pub fn accepts(self, support: AdaptiveSupport) -> bool {
        match support {
            AdaptiveSupport::Seamless => true,
            AdaptiveSupport::NotSeamless => self.allow_not_seamless,
            AdaptiveSupport::NotSupported => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCapability {
    #[serde(default)]
    pub support: FormatSupport,
    #[serde(default)]
    pub adaptive: AdaptiveSupport,
}

impl TrackCapability {
    pub const UNSUPPORTED: TrackCapability = TrackCapability {
        support: FormatSupport::Unsupported,
        adaptive: AdaptiveSupport::NotSupported,
    };

    pub fn new(support: FormatSupport, adaptive: AdaptiveSupport) -> Self {
        Self { support, adaptive }
    }
}

/// Capabilities for the members of one switchable set, by member index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRow {
    #[serde(default)]
    pub tracks: Vec<TrackCapability>,
    /// Adaptiveness the decoder offers when members differ in mime type.
    #[serde(default)]
    pub mixed_mime_type_adaptation: AdaptiveSupport,
}

impl CapabilityRow {
    pub fn new(tracks: Vec<TrackCapability>, mixed_mime_type_adaptation: AdaptiveSupport) -> Self {
        Self {
            tracks,
            mixed_mime_type_adaptation,
        }
    }

    pub fn track(&self, index: usize) -> TrackCapability {
        self.tracks
            .get(index)
            .copied()
            .unwrap_or(TrackCapability::UNSUPPORTED)
    }
}

static EMPTY_ROW: CapabilityRow = CapabilityRow {
    tracks: Vec::new(),
    mixed_mime_type_adaptation: AdaptiveSupport::NotSupported,
};

/// Capability rows, one per switchable set of the catalog they describe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMatrix {
    pub rows: Vec<CapabilityRow>,
}

impl CapabilityMatrix {
    pub fn new(rows: Vec<CapabilityRow>) -> Self {
        Self { rows }
    }

    /// Snapshot `provider` over every representation of `catalog`.
    pub fn from_provider<P>(catalog: &Catalog, provider: &P) -> Self
    where
        P: CapabilityProvider + ?Sized,
    {
        let rows = catalog
            .iter()
            .map(|set| CapabilityRow {
                tracks: set.iter().map(|f| provider.track_capability(f)).collect(),
                mixed_mime_type_adaptation: provider.mixed_mime_type_adaptation(set),
            })
            .collect();
        Self { rows }
    }

    /// Row of set `group`. Missing rows read as unsupported.
    pub fn row(&self, group: usize) -> &CapabilityRow {
        self.rows.get(group).unwrap_or(&EMPTY_ROW)
    }

    pub fn track(&self, group: usize, track: usize) -> TrackCapability {
        self.row(group).track(track)
    }

    /// Whether the matrix has an entry for every member of `catalog`.
    pub fn covers(&self, catalog: &Catalog) -> bool {
        self.rows.len() == catalog.len()
            && self
                .rows
                .iter()
                .zip(catalog.iter())
                .all(|(row, set)| row.tracks.len() == set.len())
    }
}

/// Source of decoder capabilities.
pub trait CapabilityProvider {
    fn track_capability(&self, format: &VideoFormat) -> TrackCapability;

    fn mixed_mime_type_adaptation(&self, set: &SwitchableSet) -> AdaptiveSupport;
}

/// Static description of a decoder, usually read from the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderProfile {
    /// Decodable mime types. Empty accepts any.
    pub mime_types: Vec<String>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub max_frame_rate: Option<f32>,
    pub max_bitrate: Option<u32>,
    pub adaptive: AdaptiveSupport,
    pub mixed_mime_type_adaptation: AdaptiveSupport,
}

impl Default for DecoderProfile {
    fn default() -> Self {
        Self {
            mime_types: Vec::new(),
            max_width: None,
            max_height: None,
            max_frame_rate: None,
            max_bitrate: None,
            adaptive: AdaptiveSupport::Seamless,
            mixed_mime_type_adaptation: AdaptiveSupport::NotSupported,
        }
    }
}

impl DecoderProfile {
    fn decodes(&self, mime_type: Option<&str>) -> bool {
        if self.mime_types.is_empty() {
            return true;
        }
        mime_type.is_some_and(|mime| self.mime_types.iter().any(|m| m == mime))
    }

    fn exceeds(&self, format: &VideoFormat) -> bool {
        fn above<T: PartialOrd>(value: Option<T>, max: Option<T>) -> bool {
            matches!((value, max), (Some(value), Some(max)) if value > max)
        }

        above(format.width, self.max_width)
            || above(format.height, self.max_height)
            || above(format.frame_rate, self.max_frame_rate)
            || above(format.bitrate, self.max_bitrate)
    }
}

impl CapabilityProvider for DecoderProfile {
    fn track_capability(&self, format: &VideoFormat) -> TrackCapability {
        if !self.decodes(format.mime_type()) {
            return TrackCapability::UNSUPPORTED;
        }

        let support = if self.exceeds(format) {
            FormatSupport::ExceedsCapabilities
        } else {
            FormatSupport::Handled
        };
        TrackCapability::new(support, self.adaptive)
    }

    fn mixed_mime_type_adaptation(&self, _set: &SwitchableSet) -> AdaptiveSupport {
        self.mixed_mime_type_adaptation
    }
}
