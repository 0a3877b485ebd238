#![allow(dead_code)]

use tracksel::{
    AdaptiveSupport, CapabilityMatrix, CapabilityRow, Catalog, FormatSupport, SwitchableSet,
    TrackCapability, VideoFormat,
};

pub trait AssertResult<T> {
    fn assert_success(self) -> T;
    fn assert_error(self);
}

impl<T, E: std::fmt::Debug> AssertResult<T> for Result<T, E> {
    fn assert_success(self) -> T {
        match self {
            Ok(value) => value,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    fn assert_error(self) {
        assert!(self.is_err());
    }
}

pub const HANDLED: TrackCapability = TrackCapability {
    support: FormatSupport::Handled,
    adaptive: AdaptiveSupport::Seamless,
};

pub fn avc(width: u32, height: u32, bitrate: u32) -> VideoFormat {
    VideoFormat::new("video/avc")
        .with_size(width, height)
        .with_bitrate(bitrate)
}

pub fn hevc(width: u32, height: u32, bitrate: u32) -> VideoFormat {
    VideoFormat::new("video/hevc")
        .with_size(width, height)
        .with_bitrate(bitrate)
}

pub fn catalog(sets: Vec<Vec<VideoFormat>>) -> Catalog {
    Catalog::new(sets.into_iter().map(SwitchableSet::new).collect())
}

/// Every member handled with seamless adaptiveness.
pub fn handled(catalog: &Catalog) -> CapabilityMatrix {
    with_mixed_mime_types(catalog, AdaptiveSupport::NotSupported)
}

pub fn with_mixed_mime_types(catalog: &Catalog, mixed: AdaptiveSupport) -> CapabilityMatrix {
    CapabilityMatrix::new(
        catalog
            .iter()
            .map(|set| CapabilityRow::new(vec![HANDLED; set.len()], mixed))
            .collect(),
    )
}
