//! Video track selection for adaptive streaming playback.
//!
//! Given the switchable sets of a stream, what the device decoder reports for
//! each representation, and the viewer's constraints, [`select`] decides
//! which representations the player should decode:
//!
//! 1. an adaptive group of two or more members of one switchable set, among
//!    which a bitrate policy may switch at runtime, or
//! 2. a single fixed representation when adaptiveness is off or impossible, or
//! 3. nothing, when no representation qualifies.
//!
//! ```
//! use tracksel::{
//!     select, CapabilityMatrix, Catalog, DecoderProfile, SelectionParameters, Selection,
//!     SwitchableSet, VideoFormat,
//! };
//!
//! let catalog = Catalog::new(vec![SwitchableSet::new(vec![
//!     VideoFormat::new("video/avc").with_size(640, 360).with_bitrate(800_000),
//!     VideoFormat::new("video/avc").with_size(1280, 720).with_bitrate(2_500_000),
//!     VideoFormat::new("video/avc").with_size(1920, 1080).with_bitrate(5_000_000),
//! ])]);
//! let capabilities = CapabilityMatrix::from_provider(&catalog, &DecoderProfile::default());
//! let parameters = SelectionParameters::builder()
//!     .viewport_size(1280, 720, false)
//!     .build();
//!
//! let selection = select(&catalog, &capabilities, &parameters);
//! assert_eq!(selection, Selection::Adaptive { group: 0, tracks: vec![0, 1] });
//! ```

pub mod adaptive;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fixed;
pub mod format;
pub mod parameters;
pub mod score;
pub mod selector;
pub mod viewport;

pub use capabilities::{
    AdaptiveSupport, CapabilityMatrix, CapabilityProvider, CapabilityRow, DecoderProfile,
    FormatSupport, TrackCapability,
};
pub use catalog::{Catalog, SwitchableSet};
pub use config::Config;
pub use error::{TrackSelError, TrackSelResult};
pub use format::{RoleFlags, VideoFormat};
pub use parameters::{Bounds, SelectionParameters, SelectionParametersBuilder, Viewport};
pub use score::{DefaultScorer, TrackScore, TrackScorer, VideoTrackScore};
pub use selector::{select, Selection, TrackSelector};
