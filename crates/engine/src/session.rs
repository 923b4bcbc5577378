//! Defines [SessionHandle], the live panel/frame pair of a running emulator
//! session, and [SessionParams], what it was started with.

use media::frame::Dimensions;
use url::form_urlencoded;
use util::debug_log_warning;

use crate::config::EngineConfig;
use crate::host::{
    EmbeddedFrame, NodeHost, OpenedPanel, PanelRequest, Position, SessionPanel, SessionPort, Size,
    SurfaceScaling,
};
use crate::node::NodeId;

/// Text shown in the panel until the frame finishes loading.
pub const LOADING_STATUS: &str = "Loading emulator...";

/// Where a panel goes when it can't be centered.
pub const FALLBACK_PANEL_POSITION: Position = Position { x: 0.0, y: 0.0 };

/// Validated values a session is started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub category: String,
    pub rom: String,
    pub core: String,
    /// Only set for categories that need one.
    pub bios: Option<String>,
    pub dimensions: Dimensions,
}

impl SessionParams {
    /// The loader page URL, with everything the emulator needs to boot in its
    /// query.
    pub fn loader_url(&self, config: &EngineConfig) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if !self.core.is_empty() {
            query.append_pair("core", &self.core);
        }
        if !self.rom.is_empty() {
            query.append_pair("rom", &self.rom);
        }
        if let Some(bios) = &self.bios {
            query.append_pair("bios", bios);
        }
        query.append_pair("width", &self.dimensions.width().to_string());
        query.append_pair("height", &self.dimensions.height().to_string());

        format!("{}?{}", config.runner_url(), query.finish())
    }

    pub fn panel_title(&self) -> String {
        format!("{} Emulator", self.category)
    }
}

/// Center a panel of `panel` size in `viewport`, never past the top-left edge.
/// Falls back to [FALLBACK_PANEL_POSITION] when either size is unknown.
pub fn centered_position(viewport: Option<Size>, panel: Option<Size>) -> Position {
    match (viewport, panel) {
        (Some(viewport), Some(panel)) if panel.is_measurable() => Position {
            x: ((viewport.width - panel.width) / 2.0).max(0.0),
            y: ((viewport.height - panel.height) / 2.0).max(0.0),
        },
        _ => FALLBACK_PANEL_POSITION,
    }
}

/// A running session. Dropping the handle without [SessionHandle::close]
/// leaves the panel on screen.
pub struct SessionHandle {
    panel: Box<dyn SessionPanel>,
    frame: Box<dyn EmbeddedFrame>,
    port: SessionPort,
    params: SessionParams,
    generation: u64,
    next_request_id: u64,
}

impl SessionHandle {
    /// Open a panel for `params`, place it and point its frame at the loader.
    pub(crate) fn open(
        host: &mut dyn NodeHost,
        params: SessionParams,
        config: &EngineConfig,
        generation: u64,
    ) -> Self {
        let request = PanelRequest {
            title: params.panel_title(),
            status_text: LOADING_STATUS.to_string(),
            size: Size::new(config.panel_width, config.panel_height),
        };
        let OpenedPanel { panel, frame, port } = host.open_panel(&request);

        let mut session = Self::from_parts(panel, frame, port, params, generation);
        session
            .panel
            .set_position(centered_position(host.viewport(), session.panel.measured_size()));
        session.frame.navigate(&session.params.loader_url(config));
        session
    }

    pub(crate) fn from_parts(
        panel: Box<dyn SessionPanel>,
        frame: Box<dyn EmbeddedFrame>,
        port: SessionPort,
        params: SessionParams,
        generation: u64,
    ) -> Self {
        Self {
            panel,
            frame,
            port,
            params,
            generation,
            next_request_id: 0,
        }
    }

    /// Reveal the frame and shrink its rendering surface to `1 / scale_factor`
    /// of the session size, stretched back up for display. A surface that
    /// can't be reached is only worth a warning.
    pub(crate) fn on_frame_loaded(&mut self, node: NodeId, scale_factor: u32) {
        self.panel.set_status_visible(false);
        self.panel.set_frame_opacity(1.0);

        let display = self.params.dimensions;
        let Some(internal) = display.scaled_down(scale_factor) else {
            debug_log_warning!(
                "[Retro Engine Node {node}] Canvas scaling failed: {display} can't be scaled down by {scale_factor}."
            );
            return;
        };

        let scaling = SurfaceScaling {
            internal,
            display,
            pixelated: true,
        };
        if let Err(e) = self.frame.resize_surface(&scaling) {
            debug_log_warning!("[Retro Engine Node {node}] Canvas scaling failed: {e}");
        }
    }

    /// Stop the emulator and take the panel away.
    pub(crate) fn close(mut self) {
        self.frame.blank();
        self.panel.remove();
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// Which session (counting from 1) of its node this is.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn frame_mut(&mut self) -> &mut dyn EmbeddedFrame {
        self.frame.as_mut()
    }

    pub(crate) fn port(&self) -> &SessionPort {
        &self.port
    }

    /// A request id unique within this session.
    pub(crate) fn next_request_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("params", &self.params)
            .field("generation", &self.generation)
            .field("next_request_id", &self.next_request_id)
            .finish_non_exhaustive()
    }
}
