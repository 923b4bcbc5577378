//! Hooking into the editor's graph compilation: every compiled record of a
//! Retro Engine node gets the node's live game/core values and a fresh frame.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use util::debug_log_error;

use crate::controls::names;
use crate::host::NodeHost;
use crate::node::{NODE_CLASS, NodeId, RetroEngineNode};

/// A compiled graph, as sent to the backend.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    /// Node id (as a string) to record.
    #[serde(default)]
    pub output: BTreeMap<String, NodeRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of a compiled graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeRecord {
    pub class_type: String,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lets the hook find the live node behind a record.
pub trait LiveNodes {
    fn node_mut(&mut self, id: NodeId) -> Option<&mut RetroEngineNode>;
}

impl LiveNodes for HashMap<NodeId, RetroEngineNode> {
    fn node_mut(&mut self, id: NodeId) -> Option<&mut RetroEngineNode> {
        self.get_mut(&id)
    }
}

impl LiveNodes for BTreeMap<NodeId, RetroEngineNode> {
    fn node_mut(&mut self, id: NodeId) -> Option<&mut RetroEngineNode> {
        self.get_mut(&id)
    }
}

impl LiveNodes for [RetroEngineNode] {
    fn node_mut(&mut self, id: NodeId) -> Option<&mut RetroEngineNode> {
        self.iter_mut().find(|node| node.id() == id)
    }
}

/// Write the live values of every Retro Engine node into its record. A frame
/// that can't be captured never fails compilation; the stored frame is used
/// instead.
pub fn augment_prompt<N>(
    mut prompt: Prompt,
    nodes: &mut N,
    host: &mut dyn NodeHost,
    timeout: Duration,
) -> Prompt
where
    N: LiveNodes + ?Sized,
{
    for (key, record) in prompt.output.iter_mut() {
        if record.class_type != NODE_CLASS {
            continue;
        }
        let Some(node) = key.parse().ok().and_then(|id| nodes.node_mut(id)) else {
            continue;
        };

        augment_record(record, node, host, timeout);
    }
    prompt
}

fn augment_record(
    record: &mut NodeRecord,
    node: &mut RetroEngineNode,
    host: &mut dyn NodeHost,
    timeout: Duration,
) {
    for name in [names::ROM, names::CORE] {
        if let Some(control) = node.controls().by_name(name) {
            record.inputs.insert(name.to_string(), control.value().to_json());
        }
    }

    if node.controls().by_name(names::SCREEN_DATA).is_none() {
        return;
    }

    let frame = if node.is_session_open() {
        node.capture_frame(timeout, host)
            .inspect_err(|e| debug_log_error!("Node {}: capture failed: {e}", node.id()))
            .ok()
    } else {
        None
    };
    let frame = frame.unwrap_or_else(|| {
        node.controls()
            .text(names::SCREEN_DATA)
            .unwrap_or_default()
            .to_string()
    });

    record
        .inputs
        .insert(names::SCREEN_DATA.to_string(), Value::String(frame));
}

/// Run the editor's `compile` step, then [augment_prompt] its result. An
/// empty result or an error passes through untouched.
pub fn compile_with<F, E, N>(
    compile: F,
    nodes: &mut N,
    host: &mut dyn NodeHost,
    timeout: Duration,
) -> Result<Option<Prompt>, E>
where
    F: FnOnce() -> Result<Option<Prompt>, E>,
    N: LiveNodes + ?Sized,
{
    Ok(compile()?.map(|prompt| augment_prompt(prompt, nodes, host, timeout)))
}
