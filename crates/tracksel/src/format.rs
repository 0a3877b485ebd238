use serde::{Deserialize, Serialize};

/// Role bits attached to a representation.
///
/// Bit values follow the usual DASH role mapping so catalogs produced by
/// manifest parsers can be passed through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleFlags(pub u32);

impl RoleFlags {
    pub const NONE: RoleFlags = RoleFlags(0);
    pub const MAIN: RoleFlags = RoleFlags(1);
    /// Representation only meant for fast-forward / rewind scrubbing.
    pub const TRICK_PLAY: RoleFlags = RoleFlags(1 << 14);

    pub fn contains(self, other: RoleFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for RoleFlags {
    type Output = RoleFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        RoleFlags(self.0 | rhs.0)
    }
}

/// One concrete encoding of the content.
///
/// Every numeric attribute is optional: `None` means the manifest did not
/// declare it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub frame_rate: Option<f32>,
    #[serde(default)]
    pub bitrate: Option<u32>,
    #[serde(default)]
    pub role_flags: RoleFlags,
}

impl VideoFormat {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: Some(mime_type.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f32) -> Self {
        self.frame_rate = Some(frame_rate);
        self
    }

    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    pub fn with_role_flags(mut self, role_flags: RoleFlags) -> Self {
        self.role_flags = role_flags;
        self
    }

    /// `width * height`, or `None` when either dimension is unknown.
    pub fn pixel_count(&self) -> Option<u64> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(width as u64 * height as u64),
            _ => None,
        }
    }

    pub fn is_trick_play(&self) -> bool {
        self.role_flags.contains(RoleFlags::TRICK_PLAY)
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        let format = VideoFormat::new("video/avc").with_size(1280, 720);
        assert_eq!(format.pixel_count(), Some(921_600));

        let format = VideoFormat {
            width: Some(1280),
            ..Default::default()
        };
        assert_eq!(format.pixel_count(), None);
    }

    #[test]
    fn test_trick_play_flag() {
        let format = VideoFormat::new("video/avc")
            .with_role_flags(RoleFlags::MAIN | RoleFlags::TRICK_PLAY);
        assert!(format.is_trick_play());
        assert!(!VideoFormat::new("video/avc").is_trick_play());
        assert!(!RoleFlags::MAIN.contains(RoleFlags::NONE));
    }

    #[test]
    fn test_deserialize_sparse_format() {
        let format: VideoFormat =
            serde_json::from_str(r#"{ "mime_type": "video/hevc", "bitrate": 800000 }"#).unwrap();
        assert_eq!(format.mime_type(), Some("video/hevc"));
        assert_eq!(format.bitrate, Some(800_000));
        assert_eq!(format.width, None);
        assert_eq!(format.role_flags, RoleFlags::NONE);
    }
}
