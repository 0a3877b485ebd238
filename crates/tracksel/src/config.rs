use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    capabilities::DecoderProfile, error::TrackSelResult, parameters::SelectionParameters,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parameters: SelectionParameters,
    pub decoder: DecoderProfile,
    pub device_overrides: Vec<DeviceOverride>,
}

/// Parameter adjustments for specific hardware models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceOverride {
    pub models: Vec<String>,
    #[serde(default = "default_true")]
    pub adaptive_exceed_renderer_capabilities: bool,
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> TrackSelResult<Self> {
        let path = path.as_ref();
        log::info!("Loading selection config from {}", path.display());

        let data = std::fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    pub fn from_toml(data: &str) -> TrackSelResult<Self> {
        let config = toml::from_str(data)?;
        Ok(config)
    }

    /// The configured parameters with the override of `model` applied.
    pub fn parameters_for_device(&self, model: Option<&str>) -> SelectionParameters {
        let mut parameters = self.parameters.clone();
        let Some(model) = model else {
            return parameters;
        };

        if let Some(device) = self
            .device_overrides
            .iter()
            .find(|device| device.models.iter().any(|m| m == model))
        {
            log::info!("Applying device override for {model}");
            parameters.adaptive_exceed_renderer_capabilities =
                device.adaptive_exceed_renderer_capabilities;
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{capabilities::AdaptiveSupport, parameters::Viewport};

    const CONFIG: &str = r#"
        [parameters]
        allow_non_seamless_adaptiveness = false

        [parameters.viewport]
        width = 1920
        height = 1080
        orientation_may_change = false

        [decoder]
        mime_types = ["video/avc", "video/hevc"]
        max_width = 1920
        max_height = 1080
        mixed_mime_type_adaptation = "not_seamless"

        [[device_overrides]]
        models = ["SRT412"]
    "#;

    #[test]
    fn test_parse_config() {
        let config = Config::from_toml(CONFIG).unwrap();

        assert_eq!(
            config.parameters.viewport,
            Viewport::new(1920, 1080, false)
        );
        assert!(!config.parameters.allow_non_seamless_adaptiveness);
        assert_eq!(config.decoder.mime_types.len(), 2);
        assert_eq!(config.decoder.max_width, Some(1920));
        assert_eq!(config.decoder.adaptive, AdaptiveSupport::Seamless);
        assert_eq!(
            config.decoder.mixed_mime_type_adaptation,
            AdaptiveSupport::NotSeamless
        );
        assert_eq!(config.device_overrides.len(), 1);
    }

    #[test]
    fn test_device_override() {
        let config = Config::from_toml(CONFIG).unwrap();

        assert!(
            config
                .parameters_for_device(Some("SRT412"))
                .adaptive_exceed_renderer_capabilities
        );
        assert!(
            !config
                .parameters_for_device(Some("Pixel 8"))
                .adaptive_exceed_renderer_capabilities
        );
        assert!(
            !config
                .parameters_for_device(None)
                .adaptive_exceed_renderer_capabilities
        );
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("[parameters]\nviewport = 12").is_err());
    }
}
