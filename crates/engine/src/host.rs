//! The seams between a node and the editor hosting it: the canvas, modal
//! alerts, and the floating panel an emulator session lives in.

use media::frame::{Dimensions, SurfaceSnapshot};
use serde_json::Value;
use thiserror::Error;
use util::channels::duplex::Port;

/// A size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether both sides are strictly positive.
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// A top-left corner in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// The node's end of the message channel to a session's frame. Messages are
/// plain JSON objects with a `type` field.
pub type SessionPort = Port<Value, Value>;

/// What a node needs from the editor.
pub trait NodeHost {
    /// Show a blocking message to the user.
    fn alert(&mut self, message: &str);

    /// Ask for the node's foreground and/or background to be redrawn.
    fn set_dirty_canvas(&mut self, foreground: bool, background: bool);

    /// Ask for the whole graph to be redrawn (after a node resized).
    fn set_graph_dirty(&mut self) {}

    /// The size of the visible area panels are placed in, if known.
    fn viewport(&self) -> Option<Size>;

    /// Create (and show) a floating panel with an embedded frame in it.
    fn open_panel(&mut self, request: &PanelRequest) -> OpenedPanel;
}

/// What kind of panel to open.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRequest {
    pub title: String,
    pub status_text: String,
    pub size: Size,
}

/// A freshly created panel, the frame inside it, and the channel to whatever
/// runs in that frame.
pub struct OpenedPanel {
    pub panel: Box<dyn SessionPanel>,
    pub frame: Box<dyn EmbeddedFrame>,
    pub port: SessionPort,
}

/// The floating, draggable container a session is shown in.
#[cfg_attr(test, mockall::automock)]
pub trait SessionPanel {
    /// The panel's laid out size, if it has been laid out yet.
    fn measured_size(&self) -> Option<Size>;

    fn set_position(&mut self, position: Position);

    /// Show or hide the "loading" status text.
    fn set_status_visible(&mut self, visible: bool);

    fn set_frame_opacity(&mut self, opacity: f32);

    /// Take the panel out of the document.
    fn remove(&mut self);
}

/// The isolated browsing context an emulator runs in.
#[cfg_attr(test, mockall::automock)]
pub trait EmbeddedFrame {
    /// Load `url`.
    fn navigate(&mut self, url: &str);

    /// Load an empty document, stopping whatever was running.
    fn blank(&mut self);

    /// Read the rendering surface's pixels directly. Fails when the frame's
    /// content can't be reached from the node (different origin, not loaded).
    fn read_surface(&mut self) -> Result<SurfaceSnapshot, SurfaceAccessError>;

    /// Change the rendering surface's resolution and displayed size.
    fn resize_surface(&mut self, scaling: &SurfaceScaling) -> Result<(), SurfaceAccessError>;
}

/// Render at `internal`, display at `display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceScaling {
    pub internal: Dimensions,
    pub display: Dimensions,
    pub pixelated: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceAccessError {
    #[error("The frame's content belongs to another origin.")]
    CrossOrigin,
    #[error("The frame has no rendering surface.")]
    NoSurface,
    #[error("{0}")]
    Other(String),
}
