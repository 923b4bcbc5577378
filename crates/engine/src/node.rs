//! Defines [RetroEngineNode], one emulator node instance, and [NodeHooks], the
//! callbacks the editor drives it through.
//!
//! The node's behavior is split over several files: control synchronization
//! lives in [crate::sync], the session lifecycle in [crate::lifecycle] and
//! frame capture in [crate::capture].

pub mod power_button;

use util::debug_log_error;

use crate::catalog::OptionCatalog;
use crate::config::EngineConfig;
use crate::controls::{Controls, DynamicControlSet, names};
use crate::host::NodeHost;
use crate::session::SessionHandle;
use power_button::{PowerButtonDraw, PowerState, Rect};

/// A node's id within its graph.
pub type NodeId = u64;

/// The node class name the backend registers (and records carry).
pub const NODE_CLASS: &str = "RetroEngineNode";

pub const MIN_WIDTH: f32 = 350.0;
pub const MIN_HEIGHT: f32 = 150.0;

/// Layout constants provided by the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub title_height: f32,
    pub slot_height: f32,
    pub widget_margin: f32,
    /// Distance from the top of the node body to the power button.
    pub button_top: f32,
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self {
            title_height: 20.0,
            slot_height: 20.0,
            widget_margin: 4.0,
            button_top: 8.0,
        }
    }
}

/// The lifecycle callbacks an editor calls on a node.
pub trait NodeHooks {
    /// Called once, after the node's controls exist.
    fn on_create(&mut self, host: &mut dyn NodeHost);

    /// Paint the node's foreground. Returns what to draw, if anything.
    fn on_draw(&mut self) -> Option<PowerButtonDraw>;

    /// Returns whether the event was consumed.
    fn on_pointer_down(&mut self, pos: [f32; 2], host: &mut dyn NodeHost) -> bool;

    fn on_pointer_move(&mut self, pos: [f32; 2], host: &mut dyn NodeHost);

    /// The node's natural `[width, height]`.
    fn compute_size(&self) -> [f32; 2];
}

#[derive(Debug)]
pub struct RetroEngineNode {
    pub(crate) id: NodeId,
    pub(crate) controls: Controls,
    pub(crate) dynamic: Option<DynamicControlSet>,
    pub(crate) catalog: Option<OptionCatalog>,
    pub(crate) power: PowerState,
    pub(crate) session: Option<SessionHandle>,
    pub(crate) sessions_opened: u64,
    pub(crate) size: Option<[f32; 2]>,
    pub(crate) collapsed: bool,
    pub(crate) metrics: NodeMetrics,
    pub(crate) config: EngineConfig,
    pub(crate) power_button_bounds: Option<Rect>,
}

impl RetroEngineNode {
    pub fn new(id: NodeId, controls: Controls, config: EngineConfig) -> Self {
        Self {
            id,
            controls,
            dynamic: None,
            catalog: None,
            power: PowerState::default(),
            session: None,
            sessions_opened: 0,
            size: None,
            collapsed: false,
            metrics: NodeMetrics::default(),
            config,
            power_button_bounds: None,
        }
    }

    pub fn with_metrics(mut self, metrics: NodeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    /// Editing controls directly doesn't re-synchronize anything; use
    /// [RetroEngineNode::select_category] for the category.
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn catalog(&self) -> Option<&OptionCatalog> {
        self.catalog.as_ref()
    }

    pub fn dynamic_controls(&self) -> Option<DynamicControlSet> {
        self.dynamic
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn size(&self) -> Option<[f32; 2]> {
        self.size
    }

    pub fn set_size(&mut self, size: [f32; 2]) {
        self.size = Some(size);
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        self.session.as_ref()
    }

    pub fn is_session_open(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `pos` is on the power button as it was last drawn.
    pub fn is_power_button_hit(&self, pos: [f32; 2]) -> bool {
        self.power_button_bounds
            .is_some_and(|bounds| bounds.contains(pos))
    }

    /// Resize to the natural size if it changed.
    pub(crate) fn fit_to_contents(&mut self) {
        let natural = self.compute_size();
        if self.size != Some(natural) {
            self.size = Some(natural);
        }
    }
}

impl NodeHooks for RetroEngineNode {
    fn on_create(&mut self, host: &mut dyn NodeHost) {
        let Some(all_options) = self.controls.find(names::ALL_OPTIONS) else {
            debug_log_error!(
                "[Retro Engine Node {}] Critical widgets (system, rom, core, all_options, bios) not found! Cannot initialize.",
                self.id
            );
            return;
        };
        let Some(dynamic) = DynamicControlSet::bind(&self.controls) else {
            debug_log_error!(
                "[Retro Engine Node {}] Critical widgets (system, rom, core, all_options, bios) not found! Cannot initialize.",
                self.id
            );
            return;
        };

        if let Some(control) = self.controls.get_mut(all_options) {
            control.hide();
        }
        if let Some(control) = self.controls.by_name_mut(names::SCREEN_DATA) {
            control.hide();
        }
        self.dynamic.get_or_insert(dynamic);

        let blob = self
            .controls
            .get(all_options)
            .map(|control| control.text_value().to_string())
            .unwrap_or_default();
        self.catalog = OptionCatalog::from_blob(&blob);
        if self.catalog.is_none() {
            return;
        }

        let category = self
            .controls
            .get(dynamic.category)
            .map(|control| control.text_value().to_string())
            .unwrap_or_default();
        self.synchronize(&category, host);
    }

    fn on_draw(&mut self) -> Option<PowerButtonDraw> {
        if self.collapsed || self.size.is_none() {
            self.power_button_bounds = None;
            return None;
        }

        let draw = PowerButtonDraw::new(self.metrics.button_top, self.power);
        self.power_button_bounds = Some(draw.bounds);
        Some(draw)
    }

    fn on_pointer_down(&mut self, pos: [f32; 2], host: &mut dyn NodeHost) -> bool {
        if self.collapsed || !self.is_power_button_hit(pos) {
            return false;
        }

        self.power.is_on = !self.power.is_on;
        self.toggle(host);
        host.set_dirty_canvas(true, true);
        true
    }

    fn on_pointer_move(&mut self, pos: [f32; 2], host: &mut dyn NodeHost) {
        if self.collapsed {
            return;
        }

        let hovered = self.is_power_button_hit(pos);
        if hovered != self.power.is_hovered {
            self.power.is_hovered = hovered;
            host.set_dirty_canvas(true, false);
        }
    }

    fn compute_size(&self) -> [f32; 2] {
        let metrics = &self.metrics;

        let controls_height: f32 = self
            .controls
            .iter()
            .filter(|control| control.name() != names::ALL_OPTIONS)
            .map(|control| control.layout_height(metrics) + metrics.widget_margin)
            .sum();
        let height = metrics.title_height
            + 5.0
            + controls_height
            + power_button::HEIGHT
            + power_button::MARGIN * 2.0;

        let width = self.size.map_or(MIN_WIDTH, |[width, _]| width).max(MIN_WIDTH);
        [width, height.max(MIN_HEIGHT)]
    }
}
