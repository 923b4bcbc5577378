//! Starting and stopping a node's emulator session.
//!
//! ```text
//! Closed --toggle on (valid)--> Open
//! Open   --toggle off---------> Closed
//! Open   --toggle on----------> Open (old session torn down first)
//! ```

use media::frame::Dimensions;
use util::{debug_log_error, debug_log_info, debug_log_warning};

use crate::controls::{Controls, names};
use crate::errors::ConfigurationError;
use crate::host::NodeHost;
use crate::node::RetroEngineNode;
use crate::sentinels;
use crate::session::{SessionHandle, SessionParams};
use crate::systems::{self, DEFAULT_SYSTEM};

/// The raw control values a session would be started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionValues {
    pub category: String,
    pub rom: String,
    pub core: String,
    pub bios: String,
    pub width: i64,
    pub height: i64,
}

impl SessionValues {
    /// Read the values, substituting defaults for missing controls.
    pub fn read(controls: &Controls, default_width: u32, default_height: u32) -> Self {
        let text = |name: &str, default: &str| controls.text(name).unwrap_or(default).to_string();

        Self {
            category: text(names::SYSTEM, DEFAULT_SYSTEM),
            rom: text(names::ROM, ""),
            core: text(names::CORE, ""),
            bios: text(names::BIOS, ""),
            width: controls.int(names::WIDTH).unwrap_or(default_width.into()),
            height: controls.int(names::HEIGHT).unwrap_or(default_height.into()),
        }
    }

    /// Check the values can start a session.
    pub fn validate(self) -> Result<SessionParams, ConfigurationError> {
        let Self {
            category,
            rom,
            core,
            bios,
            width,
            height,
        } = self;

        if sentinels::is_invalid_rom(&rom) {
            return Err(ConfigurationError::InvalidRom {
                category,
                value: rom,
            });
        }

        let core = if core == sentinels::NOT_APPLICABLE {
            String::new()
        } else {
            if sentinels::is_no_cores_found(&core) {
                return Err(ConfigurationError::NoCore { category });
            }
            if sentinels::is_invalid_core(&core) {
                return Err(ConfigurationError::InvalidCore {
                    category,
                    value: core,
                });
            }
            core
        };

        let bios = if systems::requires_bios(&category) {
            if sentinels::is_invalid_bios(&bios) {
                return Err(ConfigurationError::InvalidBios {
                    category,
                    value: bios,
                });
            }
            Some(bios)
        } else {
            None
        };

        let Some(dimensions) = Dimensions::from_signed(width, height) else {
            return Err(ConfigurationError::InvalidDimensions {
                category,
                width,
                height,
            });
        };

        Ok(SessionParams {
            category,
            rom,
            core,
            bios,
            dimensions,
        })
    }
}

impl RetroEngineNode {
    /// Follow the power state: start a session when on, stop when off.
    pub fn toggle(&mut self, host: &mut dyn NodeHost) {
        if self.power.is_on {
            // Already reported to the user.
            let _ = self.start(host);
        } else {
            self.stop(host);
        }
    }

    /// Close any running session, then open a new one from the current
    /// control values. Invalid values are shown to the user and switch the
    /// power back off.
    pub fn start(&mut self, host: &mut dyn NodeHost) -> Result<(), ConfigurationError> {
        self.close_session();

        let values = SessionValues::read(
            &self.controls,
            self.config.default_width,
            self.config.default_height,
        );
        match values.validate() {
            Ok(params) => {
                if params.core.is_empty() {
                    debug_log_warning!(
                        "[Retro Engine Node {}] Starting {} without a core.",
                        self.id,
                        params.category
                    );
                }
                self.open_session(params, host);
                Ok(())
            }
            Err(e) => {
                debug_log_error!("[Retro Engine Node {}] {e}", self.id);
                host.alert(&format!("[Retro Engine Node Error]: {e}"));
                self.power.is_on = false;
                host.set_dirty_canvas(true, true);
                Err(e)
            }
        }
    }

    /// Open a panel running `params`. Any existing session is torn down first.
    pub fn open_session(&mut self, params: SessionParams, host: &mut dyn NodeHost) {
        self.close_session();

        self.sessions_opened += 1;
        debug_log_info!(
            "[Retro Engine Node {}] Opening {} session #{}: {}",
            self.id,
            params.category,
            self.sessions_opened,
            params.rom
        );
        self.session = Some(SessionHandle::open(
            host,
            params,
            &self.config,
            self.sessions_opened,
        ));
    }

    /// The session's frame finished loading.
    pub fn on_session_loaded(&mut self) {
        let (id, scale_factor) = (self.id, self.config.surface_scale_factor);
        if let Some(session) = &mut self.session {
            session.on_frame_loaded(id, scale_factor);
        }
    }

    /// Stop the emulator and remove its panel, leaving the power state alone.
    pub fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            debug_log_info!(
                "[Retro Engine Node {}] Closing session #{}.",
                self.id,
                session.generation()
            );
            session.close();
        }
    }

    /// Close the session and switch the power off.
    pub fn stop(&mut self, host: &mut dyn NodeHost) {
        self.close_session();

        if self.power.is_on {
            self.power.is_on = false;
            host.set_dirty_canvas(true, true);
        }
    }

    /// The panel's close button.
    pub fn on_panel_close_requested(&mut self, host: &mut dyn NodeHost) {
        self.stop(host);
    }
}
