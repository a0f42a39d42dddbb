//! Tree <-> record conversion
//!
//! Records mirror the node model one to one. Folder contents use an ordered
//! map so the listing order survives a round trip.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::filesystem::FileSystem;
use crate::node::{File, Folder, Node};
use crate::utils::validation::is_valid_name;

/// One serialized node. `password` is always written, as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeRecord {
    File {
        name: String,
        password: Option<String>,
        value: Vec<String>,
    },
    Folder {
        name: String,
        password: Option<String>,
        contents: IndexMap<String, NodeRecord>,
    },
}

/// The whole persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub root: NodeRecord,
    pub path: String,
}

pub fn serialize(node: &Node) -> NodeRecord {
    match node {
        Node::File(file) => NodeRecord::File {
            name: file.name.clone(),
            password: file.password.clone(),
            value: file.lines().to_vec(),
        },
        Node::Folder(folder) => serialize_folder(folder),
    }
}

fn serialize_folder(folder: &Folder) -> NodeRecord {
    NodeRecord::Folder {
        name: folder.name.clone(),
        password: folder.password.clone(),
        contents: folder
            .contents()
            .iter()
            .map(|(key, child)| (key.clone(), serialize(child)))
            .collect(),
    }
}

pub fn deserialize(record: NodeRecord) -> Node {
    match record {
        NodeRecord::File {
            name,
            password,
            value,
        } => Node::from(File::new(name, value).with_password(password)),
        NodeRecord::Folder {
            name,
            password,
            contents,
        } => {
            let mut folder = Folder::new(name).with_password(password);
            for (key, child) in contents {
                if !is_valid_name(&key) {
                    warn!("Dropping entry with unusable name {:?}", key);
                    continue;
                }
                let mut node = deserialize(child);
                if node.name() != key {
                    warn!(
                        "Record name '{}' disagrees with its key '{}'; using the key",
                        node.name(),
                        key
                    );
                    node.set_name(key.clone());
                }
                folder.contents_mut().insert(key, node);
            }
            Node::from(folder)
        }
    }
}

pub fn serialize_state(session: &FileSystem) -> StateRecord {
    StateRecord {
        root: serialize_folder(session.root()),
        path: session.current_path().to_string(),
    }
}

/// Rebuilds a session from its record.
///
/// Returns the session and whether the saved path could not be restored as is.
pub fn deserialize_state(record: StateRecord) -> Result<(FileSystem, bool), PersistenceError> {
    match deserialize(record.root) {
        Node::Folder(root) => Ok(FileSystem::from_parts(root, &record.path)),
        Node::File(_) => Err(PersistenceError::InvalidRoot),
    }
}
