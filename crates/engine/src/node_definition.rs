//! Defines [NodeDefinition], the node's declared inputs and outputs as the
//! backend registers them with the editor.

use serde::Serialize;
use util::debug_log_error;

use crate::assets::AssetLibrary;
use crate::catalog::OptionCatalog;
use crate::config::EngineConfig;
use crate::controls::{Control, Controls, names};
use crate::node::{NODE_CLASS, NodeId, RetroEngineNode};
use crate::sentinels;
use crate::systems::{self, DEFAULT_SYSTEM};

pub const DISPLAY_NAME: &str = "Retro Engine";
pub const CATEGORY: &str = "Retro Engine";

/// `(min, max, step)` of the size inputs.
pub const WIDTH_RANGE: (i64, i64, i64) = (320, 1920, 8);
pub const HEIGHT_RANGE: (i64, i64, i64) = (240, 1080, 8);

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NodeDefinition {
    pub class_type: String,
    pub display_name: String,
    pub category: String,
    pub inputs: Vec<InputDefinition>,
    pub outputs: Vec<OutputDefinition>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InputDefinition {
    pub name: String,
    pub required: bool,
    #[serde(flatten)]
    pub kind: InputKind,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Combo {
        choices: Vec<String>,
        default: String,
    },
    Int {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    String {
        default: String,
        hidden: bool,
        multiline: bool,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OutputDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl InputDefinition {
    fn required(name: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            kind,
        }
    }

    fn hidden_text(name: &str, default: String) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            kind: InputKind::String {
                default,
                hidden: true,
                multiline: true,
            },
        }
    }

    fn combo(name: &str, choices: Vec<String>, default: String) -> Self {
        Self::required(name, InputKind::Combo { choices, default })
    }

    fn int(name: &str, default: i64, (min, max, step): (i64, i64, i64)) -> Self {
        Self::required(
            name,
            InputKind::Int {
                default,
                min,
                max,
                step,
            },
        )
    }

    /// The control this input shows up as on a node.
    pub fn to_control(&self) -> Control {
        match &self.kind {
            InputKind::Combo { choices, default } => {
                Control::combo(&self.name, choices.clone(), default.clone())
            }
            InputKind::Int { default, .. } => Control::number(&self.name, *default),
            InputKind::String { default, .. } => Control::text(&self.name, default.clone()),
        }
    }
}

impl NodeDefinition {
    /// Scan `library` and describe the node.
    pub fn from_library(library: &AssetLibrary, config: &EngineConfig) -> Self {
        Self::from_parts(
            &systems::system_names(),
            &library.gather_catalog(),
            library.bios_files(),
            config,
        )
    }

    /// Describe the node for the given systems, catalog and BIOS files.
    pub fn from_parts(
        systems: &[&str],
        catalog: &OptionCatalog,
        bios_files: Vec<String>,
        config: &EngineConfig,
    ) -> Self {
        let Some(first_system) = systems.first() else {
            debug_log_error!(
                "CRITICAL: No systems defined. RetroEngineNode will be non-functional."
            );
            return Self::disabled(config);
        };
        let default_system = if systems.contains(&DEFAULT_SYSTEM) {
            DEFAULT_SYSTEM
        } else {
            *first_system
        };

        let mut all_roms = catalog.all_roms();
        if all_roms.is_empty() {
            all_roms.push(sentinels::SELECT_ROM.to_string());
        }
        let mut all_cores = catalog.all_cores();
        if all_cores.is_empty() {
            all_cores.push(sentinels::SELECT_CORE.to_string());
        }

        let system_options = catalog.get(default_system);
        let default_rom = system_options
            .and_then(|options| first_or_qualifying(&options.roms, sentinels::is_selectable_rom))
            .unwrap_or_else(|| all_roms[0].clone());
        let default_core = system_options
            .and_then(|options| default_core(&options.cores))
            .unwrap_or_else(|| all_cores[0].clone());

        let mut bios_options = bios_files;
        bios_options.sort();
        bios_options.dedup();
        bios_options.push(sentinels::NOT_APPLICABLE.to_string());
        let default_bios = bios_options[0].clone();

        Self::with_inputs(vec![
            InputDefinition::combo(
                names::SYSTEM,
                systems.iter().map(|s| s.to_string()).collect(),
                default_system.to_string(),
            ),
            InputDefinition::combo(names::ROM, all_roms, default_rom),
            InputDefinition::combo(names::CORE, all_cores, default_core),
            InputDefinition::combo(names::BIOS, bios_options, default_bios),
            InputDefinition::int(names::WIDTH, config.default_width.into(), WIDTH_RANGE),
            InputDefinition::int(names::HEIGHT, config.default_height.into(), HEIGHT_RANGE),
            InputDefinition::hidden_text(names::ALL_OPTIONS, catalog.to_blob()),
            InputDefinition::hidden_text(names::SCREEN_DATA, String::new()),
        ])
    }

    /// The definition of a node that can't do anything (no systems known).
    pub fn disabled(config: &EngineConfig) -> Self {
        let not_applicable = || vec![sentinels::NOT_APPLICABLE.to_string()];
        let disabled = || vec![sentinels::NODE_DISABLED.to_string()];

        Self::with_inputs(vec![
            InputDefinition::combo(names::SYSTEM, not_applicable(), sentinels::NOT_APPLICABLE.into()),
            InputDefinition::combo(names::ROM, disabled(), sentinels::NODE_DISABLED.into()),
            InputDefinition::combo(names::CORE, disabled(), sentinels::NODE_DISABLED.into()),
            InputDefinition::combo(names::BIOS, not_applicable(), sentinels::NOT_APPLICABLE.into()),
            InputDefinition::int(names::WIDTH, config.default_width.into(), WIDTH_RANGE),
            InputDefinition::int(names::HEIGHT, config.default_height.into(), HEIGHT_RANGE),
            InputDefinition::hidden_text(names::ALL_OPTIONS, "{}".to_string()),
            InputDefinition::hidden_text(names::SCREEN_DATA, String::new()),
        ])
    }

    fn with_inputs(inputs: Vec<InputDefinition>) -> Self {
        Self {
            class_type: NODE_CLASS.to_string(),
            display_name: DISPLAY_NAME.to_string(),
            category: CATEGORY.to_string(),
            inputs,
            outputs: vec![
                OutputDefinition {
                    name: "status".to_string(),
                    kind: "STRING".to_string(),
                },
                OutputDefinition {
                    name: "screen_capture".to_string(),
                    kind: "IMAGE".to_string(),
                },
            ],
        }
    }

    pub fn input(&self, name: &str) -> Option<&InputDefinition> {
        self.inputs.iter().find(|input| input.name == name)
    }

    /// Create a node instance with one control per input.
    pub fn instantiate(&self, id: NodeId, config: EngineConfig) -> RetroEngineNode {
        let controls: Controls = self.inputs.iter().map(InputDefinition::to_control).collect();
        RetroEngineNode::new(id, controls, config)
    }
}

fn first_or_qualifying(list: &[String], qualifies: fn(&str) -> bool) -> Option<String> {
    list.iter()
        .find(|value| qualifies(value))
        .or_else(|| list.first())
        .cloned()
}

/// The first real core, else the first non-error entry, else the first entry.
fn default_core(cores: &[String]) -> Option<String> {
    let usable: Vec<&String> = cores
        .iter()
        .filter(|core| !sentinels::is_core_error(core))
        .collect();

    usable
        .iter()
        .find(|core| core.as_str() != sentinels::NOT_APPLICABLE)
        .or_else(|| usable.first())
        .map(|core| core.to_string())
        .or_else(|| cores.first().cloned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::catalog::CategoryOptions;
    use crate::node::NodeHooks;
    use crate::testing::RecordingHost;

    fn default_of<'a>(definition: &'a NodeDefinition, name: &str) -> &'a str {
        match &definition.input(name).unwrap().kind {
            InputKind::Combo { default, .. } | InputKind::String { default, .. } => default.as_str(),
            InputKind::Int { .. } => panic!("{name} is a number"),
        }
    }

    fn catalog() -> OptionCatalog {
        [
            (
                "PlayStation".to_string(),
                CategoryOptions {
                    roms: vec!["roms/ps1/placeholder_select_a_rom.cue".into(), "roms/ps1/ff7.cue".into()],
                    cores: vec!["ERROR_CORE_DATA_MISSING_FOR_PLAYSTATION_(pcsx_rearmed)".into()],
                },
            ),
            (
                "NES".to_string(),
                CategoryOptions {
                    roms: vec!["roms/nes/mario.nes".into()],
                    cores: vec!["fceumm".into()],
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn defaults_come_from_the_default_system() {
        let definition = NodeDefinition::from_parts(
            &["NES", "PlayStation"],
            &catalog(),
            vec!["bios/scph5501.bin".into()],
            &EngineConfig::default(),
        );

        assert_eq!(default_of(&definition, names::SYSTEM), "PlayStation");
        assert_eq!(default_of(&definition, names::ROM), "roms/ps1/ff7.cue");
        assert_eq!(
            default_of(&definition, names::CORE),
            "ERROR_CORE_DATA_MISSING_FOR_PLAYSTATION_(pcsx_rearmed)"
        );
        assert_eq!(default_of(&definition, names::BIOS), "bios/scph5501.bin");
        assert_eq!(
            OptionCatalog::parse(default_of(&definition, names::ALL_OPTIONS)).unwrap(),
            catalog()
        );
        assert_eq!(
            definition.input(names::WIDTH).unwrap().kind,
            InputKind::Int {
                default: 640,
                min: 320,
                max: 1920,
                step: 8
            }
        );
    }

    #[test]
    fn default_core_prefers_real_cores() {
        let cores = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(default_core(&cores(&["N/A", "fceumm"])).as_deref(), Some("fceumm"));
        assert_eq!(default_core(&cores(&["ERROR_X", "N/A"])).as_deref(), Some("N/A"));
        assert_eq!(default_core(&cores(&["ERROR_X"])).as_deref(), Some("ERROR_X"));
        assert_eq!(default_core(&[]), None);
    }

    #[test]
    fn no_systems_disables_the_node() {
        let definition =
            NodeDefinition::from_parts(&[], &catalog(), Vec::new(), &EngineConfig::default());

        assert_eq!(definition, NodeDefinition::disabled(&EngineConfig::default()));
        assert_eq!(default_of(&definition, names::ROM), sentinels::NODE_DISABLED);
    }

    #[test]
    fn serialized_definition_is_tagged() {
        let definition = NodeDefinition::disabled(&EngineConfig::default());
        let json = serde_json::to_value(&definition).unwrap();

        assert_eq!(json["class_type"], "RetroEngineNode");
        assert_eq!(json["inputs"][4]["type"], "int");
        assert_eq!(json["inputs"][6]["hidden"], true);
        assert_eq!(json["outputs"][1]["type"], "IMAGE");
    }

    #[test]
    fn instantiated_node_comes_alive() {
        let dir = tempfile::tempdir().unwrap();
        let library = AssetLibrary::new(dir.path());
        library.ensure_directories().unwrap();
        fs::write(dir.path().join("roms/nes/zelda.nes"), b"").unwrap();
        fs::write(dir.path().join("emulator_core/data/cores/fceumm-wasm.data"), b"").unwrap();

        let config = EngineConfig::default();
        let definition = NodeDefinition::from_library(&library, &config);
        let mut node = definition.instantiate(7, config);
        let mut host = RecordingHost::default();
        node.on_create(&mut host);

        assert!(node.catalog().is_some());
        assert!(node.controls().by_name(names::ALL_OPTIONS).unwrap().is_hidden());

        node.select_category("NES", &mut host);
        assert_eq!(node.controls().text(names::ROM), Some("roms/nes/zelda.nes"));
        assert_eq!(node.controls().text(names::CORE), Some("fceumm"));
        assert!(node.controls().by_name(names::BIOS).unwrap().is_hidden());
    }
}
