//! Defines [EngineConfig], the settings file for everything that isn't part of
//! a node's own controls.

use std::path::{Path, PathBuf};
use std::time::Duration;

use media::frame::screen_data::SURFACE_SCALE_FACTOR;
use serde::{Deserialize, Serialize};
use util::saved_file::{SavedFile, SavedFileError};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Root of the asset library (games, BIOS images, cores).
    pub assets_dir: PathBuf,

    /// Where the extension's web assets are served from.
    pub extension_base_path: String,

    /// The page (under [EngineConfig::extension_base_path]) that boots an
    /// emulator from its query parameters.
    pub runner_page: String,

    /// How long the message-passing capture waits for an answer.
    pub capture_timeout_ms: u64,

    /// How much smaller than the requested size the emulator renders.
    pub surface_scale_factor: u32,

    pub panel_width: f32,
    pub panel_height: f32,

    /// Used when a node's size controls are missing.
    pub default_width: u32,
    pub default_height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            extension_base_path: "/extensions/ComfyUI-RetroEngine".to_string(),
            runner_page: "emulator_runner.html".to_string(),
            capture_timeout_ms: 5000,
            surface_scale_factor: SURFACE_SCALE_FACTOR,
            panel_width: 800.0,
            panel_height: 600.0,
            default_width: 640,
            default_height: 480,
        }
    }
}

impl EngineConfig {
    /// Read the config at `path`, writing the defaults there first if it
    /// doesn't exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SavedFileError> {
        Self::read_from_path_or_default(path)
    }

    pub fn capture_timeout(&self) -> Duration {
        Duration::from_millis(self.capture_timeout_ms)
    }

    /// The loader page URL, without a query.
    pub fn runner_url(&self) -> String {
        format!(
            "{}/{}",
            self.extension_base_path.trim_end_matches('/'),
            self.runner_page.trim_start_matches('/')
        )
    }
}
