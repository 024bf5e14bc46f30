// cli.rs - Command-line interface configuration
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "classroom-scene")]
#[command(about = "Interactive 3D classroom", long_about = None)]
pub struct Cli {
    /// Scene configuration JSON; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Window width in logical pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Disable the HUD overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Image for every poster, replacing the configured textures
    #[arg(long)]
    pub poster: Option<PathBuf>,
}

impl Cli {
    /// Load the config file (or defaults) and apply command-line overrides
    pub fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut SceneConfig) {
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(poster) = &self.poster {
            for entry in &mut config.posters {
                entry.texture = poster.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["classroom-scene"]).unwrap();
        assert!(!cli.no_ui);
        assert!(cli.config.is_none());

        let config = cli.scene_config().unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn test_overrides_apply() {
        let cli = Cli::try_parse_from([
            "classroom-scene",
            "--width",
            "800",
            "--height",
            "600",
            "--no-ui",
            "--poster",
            "art/map.jpg",
        ])
        .unwrap();
        assert!(cli.no_ui);

        let config = cli.scene_config().unwrap();
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert!(config.posters.iter().all(|p| p.texture == PathBuf::from("art/map.jpg")));
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let cli = Cli::try_parse_from(["classroom-scene", "--config", "missing.json"]).unwrap();
        assert!(cli.scene_config().is_err());
    }

    #[test]
    fn test_rejects_bad_width() {
        assert!(Cli::try_parse_from(["classroom-scene", "--width", "wide"]).is_err());
    }
}
