//! Running a compiled Retro Engine record on the backend: check the inputs
//! against the asset library and turn the captured frame into an image.

use std::path::{Path, PathBuf};

use image::RgbImage;
use media::frame::{Dimensions, decode_screen_data, placeholder};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use util::{debug_log_error, debug_log_info};

use crate::assets::AssetLibrary;
use crate::prompt::NodeRecord;
use crate::sentinels;
use crate::systems;

/// The inputs of one record, as the backend receives them.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RunInputs {
    pub system: String,
    pub game_rom_path: String,
    pub core: String,
    #[serde(default)]
    pub bios_path: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub screen_data: Option<String>,
}

impl RunInputs {
    pub fn from_record(record: &NodeRecord) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(record.inputs.clone()))
    }

    fn rom_name(&self) -> &str {
        self.game_rom_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.game_rom_path)
    }
}

/// Why a record's inputs can't be run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Error: No valid ROM file selected for '{system}'. Current ROM: '{rom}'")]
    NoRom { system: String, rom: String },

    #[error("Error: ROM file '{rom}' not found at '{}'", path.display())]
    RomNotFound { rom: String, path: PathBuf },

    #[error("Error: Core '{core}' is invalid or missing for system '{system}'")]
    InvalidCore { system: String, core: String },

    #[error("Error: BIOS file is required for '{system}' but none is selected/valid (current: '{bios}')")]
    NoBios { system: String, bios: String },

    #[error("Error: Selected BIOS file '{bios}' not found at '{}'", path.display())]
    BiosNotFound { bios: String, path: PathBuf },

    #[error("Error: Invalid output size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// What a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub status: String,
    pub image: RgbImage,
}

#[derive(Debug)]
struct CachedFrame {
    screen_data: String,
    image: RgbImage,
}

/// Runs records, remembering the last frame it decoded.
#[derive(Debug)]
pub struct Executor {
    library: AssetLibrary,
    raw_scale_factor: u32,
    cache: Option<CachedFrame>,
}

impl Executor {
    pub fn new(library: AssetLibrary, raw_scale_factor: u32) -> Self {
        Self {
            library,
            raw_scale_factor,
            cache: None,
        }
    }

    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    /// Check `inputs` can be run, returning a status line if so.
    pub fn validate(&self, inputs: &RunInputs) -> Result<String, InputError> {
        let system = &inputs.system;
        let rom = &inputs.game_rom_path;

        if sentinels::is_invalid_rom(rom) {
            return Err(InputError::NoRom {
                system: system.clone(),
                rom: rom.clone(),
            });
        }
        let rom_path = self.library.resolve(rom);
        if !rom_path.exists() {
            return Err(InputError::RomNotFound {
                rom: rom.clone(),
                path: rom_path,
            });
        }

        let core = &inputs.core;
        let has_core = systems::system(system).is_some_and(|config| !config.core_stem.is_empty());
        if has_core && (sentinels::is_core_error(core) || sentinels::is_selection_prompt(core)) {
            return Err(InputError::InvalidCore {
                system: system.clone(),
                core: core.clone(),
            });
        }

        if systems::requires_bios(system) {
            let bios = &inputs.bios_path;
            if sentinels::is_invalid_bios(bios) {
                return Err(InputError::NoBios {
                    system: system.clone(),
                    bios: bios.clone(),
                });
            }
            let bios_path = self.library.resolve(bios);
            if !bios_path.exists() {
                return Err(InputError::BiosNotFound {
                    bios: bios.clone(),
                    path: bios_path,
                });
            }
        }

        Ok(format!("Inputs validated for {system}. ROM: {}", inputs.rom_name()))
    }

    /// Validate, then decode the captured frame (or reuse the last one if it
    /// hasn't changed). A black image of the requested size stands in for any
    /// frame that can't be produced.
    pub fn run(&mut self, inputs: &RunInputs) -> RunOutput {
        let Some(dimensions) = Dimensions::new(inputs.width, inputs.height) else {
            let e = InputError::InvalidSize {
                width: inputs.width,
                height: inputs.height,
            };
            debug_log_error!("{e}");
            return RunOutput {
                status: e.to_string(),
                image: placeholder(Dimensions::MIN),
            };
        };

        if let Err(e) = self.validate(inputs) {
            debug_log_error!("{e}");
            return RunOutput {
                status: e.to_string(),
                image: placeholder(dimensions),
            };
        }

        if let Some(cached) = self.cached(inputs.screen_data.as_deref()) {
            debug_log_info!("Screen data unchanged, returning cached image.");
            return RunOutput {
                status: format!(
                    "Cached screen capture: {} - {}",
                    inputs.system,
                    inputs.rom_name()
                ),
                image: cached.clone(),
            };
        }

        self.process_screen_data(inputs, dimensions)
    }

    fn cached(&self, screen_data: Option<&str>) -> Option<&RgbImage> {
        self.cache
            .as_ref()
            .filter(|cache| Some(cache.screen_data.as_str()) == screen_data)
            .map(|cache| &cache.image)
    }

    fn process_screen_data(&mut self, inputs: &RunInputs, dimensions: Dimensions) -> RunOutput {
        let screen_data = inputs.screen_data.as_deref().unwrap_or_default();
        if screen_data.is_empty() {
            let status = format!(
                "Emulator for '{}' is ready. No new screen capture data provided.",
                inputs.system
            );
            debug_log_info!("{status}");
            return RunOutput {
                status,
                image: placeholder(dimensions),
            };
        }

        debug_log_info!("Processing new screen data. Length: {}", screen_data.len());
        match decode_screen_data(screen_data, dimensions, self.raw_scale_factor) {
            Ok(image) => {
                self.cache = Some(CachedFrame {
                    screen_data: screen_data.to_string(),
                    image: image.clone(),
                });
                RunOutput {
                    status: format!(
                        "Screen capture processed: {} - {}",
                        inputs.system,
                        inputs.rom_name()
                    ),
                    image,
                }
            }
            Err(e) => {
                debug_log_error!("Error processing screen capture: {e}");
                RunOutput {
                    status: format!("Error processing screen capture: {e}"),
                    image: placeholder(dimensions),
                }
            }
        }
    }
}

/// Write `image` as a PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), image::ImageError> {
    image.save_with_format(path, image::ImageFormat::Png)
}
