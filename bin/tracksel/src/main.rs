use std::path::PathBuf;

use clap::Parser;
use tracksel::{Config, TrackSelector, Viewport};

mod input;

use input::{CatalogDocument, SelectionReport};

#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct TrackSelArgs {
    /// Debug output
    #[clap(long, alias = "debug")]
    verbose: bool,

    /// Configuration file
    ///
    /// TOML file with [parameters], [decoder] and [[device_overrides]] sections.
    #[clap(short, long, env = "TRACKSEL_CONFIG")]
    config: Option<PathBuf>,

    /// Device model, used to apply device overrides from the config
    #[clap(long, env = "TRACKSEL_DEVICE_MODEL")]
    device_model: Option<String>,

    /// Viewport size
    ///
    /// Set viewport in [<width>x<height>] format. eg. --viewport 1920x1080
    /// Replaces the configured size and keeps its rotation setting.
    #[clap(long)]
    viewport: Option<Viewport>,

    /// Allow the viewport to rotate, given here or in the config
    #[clap(long)]
    rotate: bool,

    /// Only select a single fixed track
    #[clap(long)]
    no_adaptive: bool,

    /// Allow adaptive groups mixing mime types
    #[clap(long)]
    allow_mixed_mime_types: bool,

    /// Always select the highest supported bitrate
    #[clap(long, conflicts_with = "force_lowest_bitrate")]
    force_highest_bitrate: bool,

    /// Always select the lowest bitrate
    #[clap(long)]
    force_lowest_bitrate: bool,

    /// Catalog JSON file
    catalog: PathBuf,
}

impl TrackSelArgs {
    fn config(&self) -> anyhow::Result<Config> {
        Ok(match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        })
    }

    fn selector(&self, config: &Config) -> TrackSelector {
        let parameters = config.parameters_for_device(self.device_model.as_deref());
        let mut builder = parameters.to_builder();

        let mut viewport = parameters.viewport;
        if let Some(size) = self.viewport {
            viewport.width = size.width;
            viewport.height = size.height;
        }
        if self.rotate {
            viewport.orientation_may_change = true;
        }
        builder = builder.viewport_size(
            viewport.width,
            viewport.height,
            viewport.orientation_may_change,
        );
        if self.allow_mixed_mime_types {
            builder = builder.allow_mixed_mime_type_adaptiveness(true);
        }
        if self.force_highest_bitrate {
            builder = builder.force_highest_supported_bitrate(true);
        }
        if self.force_lowest_bitrate {
            builder = builder.force_lowest_bitrate(true);
        }

        TrackSelector::new(builder.build()).adaptive(!self.no_adaptive)
    }
}

fn main() -> anyhow::Result<()> {
    let args = TrackSelArgs::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .try_from_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.config()?;
    let document = CatalogDocument::load(&args.catalog)?;
    let capabilities = document.capabilities(&config.decoder);

    let selector = args.selector(&config);
    let selection = selector.select(&document.catalog, &capabilities);
    if selection.is_none() {
        log::warn!("No video track can be selected.");
    }

    let report = SelectionReport::new(&selection, &document.catalog);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = TrackSelArgs::try_parse_from([
            "tracksel",
            "--viewport",
            "1280x720",
            "--rotate",
            "--device-model",
            "SRT412",
            "catalog.json",
        ])
        .unwrap();

        assert_eq!(args.viewport, Some(Viewport::new(1280, 720, false)));
        assert_eq!(args.catalog, PathBuf::from("catalog.json"));

        let selector = args.selector(&Config::default());
        assert_eq!(
            selector.parameters().viewport,
            Viewport::new(1280, 720, true)
        );
    }

    #[test]
    fn test_viewport_flags_over_config() {
        let config = Config::from_toml(
            r#"
            [parameters.viewport]
            width = 1920
            height = 1080
            orientation_may_change = false
            "#,
        )
        .unwrap();

        let args = TrackSelArgs::try_parse_from(["tracksel", "--rotate", "catalog.json"]).unwrap();
        assert_eq!(
            args.selector(&config).parameters().viewport,
            Viewport::new(1920, 1080, true)
        );

        let args =
            TrackSelArgs::try_parse_from(["tracksel", "--viewport", "1280x720", "catalog.json"])
                .unwrap();
        assert_eq!(
            args.selector(&config).parameters().viewport,
            Viewport::new(1280, 720, false)
        );

        let args = TrackSelArgs::try_parse_from(["tracksel", "catalog.json"]).unwrap();
        assert_eq!(
            args.selector(&config).parameters().viewport,
            Viewport::new(1920, 1080, false)
        );
    }

    #[test]
    fn test_conflicting_force_flags() {
        assert!(TrackSelArgs::try_parse_from([
            "tracksel",
            "--force-highest-bitrate",
            "--force-lowest-bitrate",
            "catalog.json",
        ])
        .is_err());
        let bad_viewport = ["tracksel", "--viewport", "wide", "catalog.json"];
        assert!(TrackSelArgs::try_parse_from(bad_viewport).is_err());
    }
}
