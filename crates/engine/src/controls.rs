//! The node's input controls (widgets) and the handles it keeps to the ones
//! that change when the category changes.

use serde_json::Value;

use crate::node::NodeMetrics;

/// Control names, shared with the backend's input declaration.
pub mod names {
    pub const SYSTEM: &str = "system";
    pub const ROM: &str = "game_rom_path";
    pub const CORE: &str = "core";
    pub const BIOS: &str = "bios_path";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const ALL_OPTIONS: &str = "all_options";
    pub const SCREEN_DATA: &str = "screen_data";
}

/// Index of a control within a node's [Controls].
pub type ControlId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Text(String),
    Int(i64),
}

impl ControlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ControlValue::Text(text) => Some(text),
            ControlValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ControlValue::Int(value) => Some(*value),
            ControlValue::Text(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ControlValue::Text(text) => Value::String(text.clone()),
            ControlValue::Int(value) => Value::from(*value),
        }
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        ControlValue::Text(value.to_string())
    }
}

impl From<String> for ControlValue {
    fn from(value: String) -> Self {
        ControlValue::Text(value)
    }
}

impl From<i64> for ControlValue {
    fn from(value: i64) -> Self {
        ControlValue::Int(value)
    }
}

/// How a control is rendered. [ControlKind::Hidden] takes up no space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Combo,
    Number,
    Text,
    Hidden,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    name: String,
    kind: ControlKind,
    original_kind: ControlKind,
    options: Vec<String>,
    value: ControlValue,
}

impl Control {
    fn new(name: impl Into<String>, kind: ControlKind, value: ControlValue) -> Self {
        Self {
            name: name.into(),
            kind,
            original_kind: kind,
            options: Vec::new(),
            value,
        }
    }

    pub fn combo(name: impl Into<String>, options: Vec<String>, value: impl Into<String>) -> Self {
        Self {
            options,
            ..Self::new(name, ControlKind::Combo, ControlValue::Text(value.into()))
        }
    }

    pub fn number(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, ControlKind::Number, ControlValue::Int(value))
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, ControlKind::Text, ControlValue::Text(value.into()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    /// The kind the control was created with (what [Control::show] restores).
    pub fn original_kind(&self) -> ControlKind {
        self.original_kind
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    pub fn value(&self) -> &ControlValue {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<ControlValue>) {
        self.value = value.into();
    }

    /// The value as text, or an empty string for a number.
    pub fn text_value(&self) -> &str {
        self.value.as_text().unwrap_or_default()
    }

    pub fn hide(&mut self) {
        self.kind = ControlKind::Hidden;
    }

    pub fn show(&mut self) {
        self.kind = self.original_kind;
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == ControlKind::Hidden
    }

    /// The vertical space the control claims. A hidden control cancels out
    /// the margin that follows it.
    pub fn layout_height(&self, metrics: &NodeMetrics) -> f32 {
        if self.is_hidden() {
            -metrics.widget_margin
        } else {
            metrics.slot_height
        }
    }
}

/// A node's controls, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls(Vec<Control>);

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, control: Control) -> ControlId {
        self.0.push(control);
        self.0.len() - 1
    }

    pub fn find(&self, name: &str) -> Option<ControlId> {
        self.0.iter().position(|control| control.name == name)
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.0.get(id)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.0.get_mut(id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Control> {
        self.0.iter().find(|control| control.name == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.0.iter_mut().find(|control| control.name == name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.by_name(name).and_then(|control| control.value.as_text())
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.by_name(name).and_then(|control| control.value.as_int())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Control> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Control> for Controls {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Handles to the controls that follow the category. Bound once, when the
/// node is created, and never re-resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DynamicControlSet {
    pub category: ControlId,
    pub rom: ControlId,
    pub core: ControlId,
    pub bios: ControlId,
}

impl DynamicControlSet {
    /// Resolve the handles by name. `None` if any of them is missing.
    pub fn bind(controls: &Controls) -> Option<Self> {
        Some(Self {
            category: controls.find(names::SYSTEM)?,
            rom: controls.find(names::ROM)?,
            core: controls.find(names::CORE)?,
            bios: controls.find(names::BIOS)?,
        })
    }
}
