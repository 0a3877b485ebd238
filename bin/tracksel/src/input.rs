use std::path::Path;

use serde::{Deserialize, Serialize};
use tracksel::{CapabilityMatrix, CapabilityProvider, Catalog, Selection, VideoFormat};

/// Catalog document read from disk. Capabilities are optional and derived
/// from the configured decoder profile when absent.
#[derive(Debug)]
pub struct CatalogDocument {
    pub catalog: Catalog,
    pub capabilities: Option<CapabilityMatrix>,
}

#[derive(Deserialize)]
struct CapabilitiesSection {
    #[serde(default)]
    capabilities: Option<CapabilityMatrix>,
}

impl CatalogDocument {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> anyhow::Result<Self> {
        let catalog = Catalog::from_json(data)?;
        let CapabilitiesSection { capabilities } = serde_json::from_str(data)?;
        Ok(Self {
            catalog,
            capabilities,
        })
    }

    pub fn capabilities(&self, provider: &impl CapabilityProvider) -> CapabilityMatrix {
        match &self.capabilities {
            Some(capabilities) => {
                if !capabilities.covers(&self.catalog) {
                    log::warn!(
                        "Capability matrix does not cover every representation, missing entries are unsupported."
                    );
                }
                capabilities.clone()
            }
            None => CapabilityMatrix::from_provider(&self.catalog, provider),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionReport<'a> {
    pub selection: &'a Selection,
    pub formats: Vec<&'a VideoFormat>,
}

impl<'a> SelectionReport<'a> {
    pub fn new(selection: &'a Selection, catalog: &'a Catalog) -> Self {
        Self {
            selection,
            formats: selection.formats(catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracksel::{AdaptiveSupport, DecoderProfile, FormatSupport, TrackCapability};

    const CATALOG: &str = r#"{
        "sets": [
            {
                "formats": [
                    { "id": "sd", "mime_type": "video/avc", "width": 640, "height": 360 },
                    { "id": "hd", "mime_type": "video/hevc", "width": 1280, "height": 720 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_inline_capabilities() {
        let document = CatalogDocument::from_json(
            r#"{
                "sets": [
                    { "formats": [ { "mime_type": "video/avc" }, { "mime_type": "video/avc" } ] }
                ],
                "capabilities": [
                    { "tracks": [ { "support": "handled", "adaptive": "seamless" } ] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(document.catalog.len(), 1);

        // the inline matrix wins over the decoder profile, even when short
        let capabilities = document.capabilities(&DecoderProfile::default());
        assert_eq!(
            capabilities.track(0, 0),
            TrackCapability::new(FormatSupport::Handled, AdaptiveSupport::Seamless)
        );
        assert_eq!(capabilities.track(0, 1), TrackCapability::UNSUPPORTED);
    }

    #[test]
    fn test_capabilities_from_decoder_profile() {
        let document = CatalogDocument::from_json(CATALOG).unwrap();
        assert!(document.capabilities.is_none());

        let profile = DecoderProfile {
            mime_types: vec!["video/avc".to_string()],
            ..Default::default()
        };
        let capabilities = document.capabilities(&profile);
        assert_eq!(capabilities.track(0, 0).support, FormatSupport::Handled);
        assert_eq!(capabilities.track(0, 1), TrackCapability::UNSUPPORTED);
    }

    #[test]
    fn test_malformed_document() {
        assert!(CatalogDocument::from_json(r#"{ "capabilities": [] }"#).is_err());
        assert!(CatalogDocument::from_json(r#"{ "sets": [], "capabilities": 1 }"#).is_err());
    }

    #[test]
    fn test_report_shape() {
        let document = CatalogDocument::from_json(CATALOG).unwrap();
        let selection = Selection::Fixed { group: 0, track: 1 };
        let report = serde_json::to_value(SelectionReport::new(&selection, &document.catalog))
            .unwrap();

        assert_eq!(
            report["selection"],
            serde_json::json!({ "type": "fixed", "group": 0, "track": 1 })
        );
        let formats = report["formats"].as_array().unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0]["id"], "hd");
        assert_eq!(formats[0]["width"], 1280);

        let report = serde_json::to_value(SelectionReport::new(&Selection::None, &document.catalog))
            .unwrap();
        assert_eq!(
            report,
            serde_json::json!({ "selection": { "type": "none" }, "formats": [] })
        );
    }
}
