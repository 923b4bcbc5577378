//! Hand-written fakes of the editor side, shared by the node's tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::thread::{self, JoinHandle};

use media::frame::SurfaceSnapshot;
use serde_json::Value;
use util::channels::duplex;

use crate::config::EngineConfig;
use crate::controls::{Control, Controls, names};
use crate::host::{
    EmbeddedFrame, NodeHost, OpenedPanel, PanelRequest, Position, SessionPanel, SessionPort, Size,
    SurfaceAccessError, SurfaceScaling,
};
use crate::node::RetroEngineNode;
use crate::systems;

/// Everything that happened to the panels and frames a [RecordingHost]
/// handed out.
#[derive(Debug, Default)]
pub struct PanelLog {
    pub navigated: Vec<String>,
    pub blanked: usize,
    pub removed: usize,
    pub positions: Vec<Position>,
    pub status_visible: Vec<bool>,
    pub opacity: Vec<f32>,
    pub resized: Vec<SurfaceScaling>,
    pub surface_reads: usize,
}

#[derive(Default)]
pub struct RecordingHost {
    pub alerts: Vec<String>,
    pub dirty: Vec<(bool, bool)>,
    pub graph_dirty: usize,
    pub viewport: Option<Size>,
    /// What opened panels report as their laid out size.
    pub panel_size: Option<Size>,
    /// What opened frames return from a direct surface read.
    pub surface: Option<SurfaceSnapshot>,
    pub panels: Vec<PanelRequest>,
    pub log: Rc<RefCell<PanelLog>>,
    /// The emulator's end of every session's channel, oldest first.
    pub emulators: Vec<SessionPort>,
}

impl RecordingHost {
    pub fn take_emulator(&mut self) -> SessionPort {
        self.emulators.remove(0)
    }
}

impl NodeHost for RecordingHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_dirty_canvas(&mut self, foreground: bool, background: bool) {
        self.dirty.push((foreground, background));
    }

    fn set_graph_dirty(&mut self) {
        self.graph_dirty += 1;
    }

    fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    fn open_panel(&mut self, request: &PanelRequest) -> OpenedPanel {
        self.panels.push(request.clone());

        let (port, emulator) = duplex::pair();
        self.emulators.push(emulator);

        OpenedPanel {
            panel: Box::new(FakePanel {
                log: Rc::clone(&self.log),
                size: self.panel_size,
            }),
            frame: Box::new(FakeFrame {
                log: Rc::clone(&self.log),
                surface: self.surface.clone(),
            }),
            port,
        }
    }
}

struct FakePanel {
    log: Rc<RefCell<PanelLog>>,
    size: Option<Size>,
}

impl SessionPanel for FakePanel {
    fn measured_size(&self) -> Option<Size> {
        self.size
    }

    fn set_position(&mut self, position: Position) {
        self.log.borrow_mut().positions.push(position);
    }

    fn set_status_visible(&mut self, visible: bool) {
        self.log.borrow_mut().status_visible.push(visible);
    }

    fn set_frame_opacity(&mut self, opacity: f32) {
        self.log.borrow_mut().opacity.push(opacity);
    }

    fn remove(&mut self) {
        self.log.borrow_mut().removed += 1;
    }
}

struct FakeFrame {
    log: Rc<RefCell<PanelLog>>,
    surface: Option<SurfaceSnapshot>,
}

impl EmbeddedFrame for FakeFrame {
    fn navigate(&mut self, url: &str) {
        self.log.borrow_mut().navigated.push(url.to_string());
    }

    fn blank(&mut self) {
        self.log.borrow_mut().blanked += 1;
    }

    fn read_surface(&mut self) -> Result<SurfaceSnapshot, SurfaceAccessError> {
        self.log.borrow_mut().surface_reads += 1;
        self.surface.clone().ok_or(SurfaceAccessError::CrossOrigin)
    }

    fn resize_surface(&mut self, scaling: &SurfaceScaling) -> Result<(), SurfaceAccessError> {
        self.log.borrow_mut().resized.push(*scaling);
        Ok(())
    }
}

/// A node with every control the backend declares, `blob` in its hidden
/// catalog control and `category` selected. `on_create` hasn't run yet.
pub fn node_with_catalog(blob: &str, category: &str) -> RetroEngineNode {
    let systems = systems::system_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let controls: Controls = [
        Control::combo(names::SYSTEM, systems, category),
        Control::combo(names::ROM, Vec::new(), ""),
        Control::combo(names::CORE, Vec::new(), ""),
        Control::combo(names::BIOS, vec!["bios.bin".into(), "N/A".into()], "bios.bin"),
        Control::number(names::WIDTH, 640),
        Control::number(names::HEIGHT, 480),
        Control::text(names::ALL_OPTIONS, blob),
        Control::text(names::SCREEN_DATA, ""),
    ]
    .into_iter()
    .collect();

    RetroEngineNode::new(1, controls, EngineConfig::default())
}

/// Play the emulator's side of one exchange: wait for a single message and
/// answer it with whatever `respond` returns.
pub fn answer_once<F>(emulator: SessionPort, respond: F) -> JoinHandle<SessionPort>
where
    F: FnOnce(Value) -> Vec<Value> + Send + 'static,
{
    thread::spawn(move || {
        if let Ok(request) = emulator.wait() {
            for reply in respond(request) {
                let _ = emulator.send(reply);
            }
        }
        emulator
    })
}
