//! Loading the record the `run` command executes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine::node::NODE_CLASS;
use engine::prompt::{NodeRecord, Prompt};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} isn't a record or a prompt: {source}", path.display())]
    BadJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No node {0} in the prompt.")]
    NoSuchNode(String),
    #[error("The prompt has no {NODE_CLASS} node.")]
    NoRetroEngineNode,
    #[error("Node {0} is a {1}, not a {NODE_CLASS}.")]
    WrongClass(String, String),
}

/// Read `path`, which holds either a single [NodeRecord] or a whole [Prompt].
/// For a prompt, the record of node `node` (or of the first Retro Engine node)
/// is picked.
pub fn load(path: &Path, node: Option<&str>) -> Result<(String, NodeRecord), RecordError> {
    let text = fs::read_to_string(path).map_err(|source| RecordError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bad_json = |source| RecordError::BadJson {
        path: path.to_path_buf(),
        source,
    };

    let value: Value = serde_json::from_str(&text).map_err(bad_json)?;
    if value.get("output").is_none() {
        let record: NodeRecord = serde_json::from_value(value).map_err(bad_json)?;
        return checked(node.unwrap_or("record").to_string(), record);
    }

    let mut prompt: Prompt = serde_json::from_value(value).map_err(bad_json)?;
    match node {
        Some(id) => {
            let record = prompt
                .output
                .remove(id)
                .ok_or_else(|| RecordError::NoSuchNode(id.to_string()))?;
            checked(id.to_string(), record)
        }
        None => prompt
            .output
            .into_iter()
            .find(|(_, record)| record.class_type == NODE_CLASS)
            .ok_or(RecordError::NoRetroEngineNode),
    }
}

fn checked(id: String, record: NodeRecord) -> Result<(String, NodeRecord), RecordError> {
    if record.class_type == NODE_CLASS {
        Ok((id, record))
    } else {
        Err(RecordError::WrongClass(id, record.class_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        fs::write(&path, json).unwrap();
        (dir, path)
    }

    const PROMPT: &str = r#"{"output": {
        "3": {"class_type": "SaveImage", "inputs": {}},
        "5": {"class_type": "RetroEngineNode", "inputs": {"system": "NES"}}
    }}"#;

    #[test]
    fn first_retro_engine_node_of_a_prompt() {
        let (_dir, path) = write(PROMPT);

        let (id, record) = load(&path, None).unwrap();
        assert_eq!(id, "5");
        assert_eq!(record.inputs["system"], "NES");
    }

    #[test]
    fn chosen_node_must_be_a_retro_engine_node() {
        let (_dir, path) = write(PROMPT);

        assert!(matches!(load(&path, Some("3")), Err(RecordError::WrongClass(..))));
        assert!(matches!(load(&path, Some("9")), Err(RecordError::NoSuchNode(_))));
    }

    #[test]
    fn bare_records_are_accepted() {
        let (_dir, path) = write(r#"{"class_type": "RetroEngineNode", "inputs": {"width": 640}}"#);

        let (id, record) = load(&path, None).unwrap();
        assert_eq!(id, "record");
        assert_eq!(record.inputs["width"], 640);
    }

    #[test]
    fn garbage_is_bad_json() {
        let (_dir, path) = write("[");
        assert!(matches!(load(&path, None), Err(RecordError::BadJson { .. })));
    }
}
