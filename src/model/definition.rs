use super::value::{Slots, Value};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A directed data dependency from one node's output slots to another node's input slots.
///
/// Edges are stored on both endpoints of a [`Graph`] document: once in the source's
/// `paths_out` and once, value-equal, in the target's `paths_in`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "src_node")]
    pub source: String,
    #[serde(rename = "dst_node")]
    pub target: String,
    /// Maps `data_out` keys of the source onto `data_in` keys of the target.
    #[serde(rename = "src_to_dst_data_keys", default)]
    pub key_map: BTreeMap<String, String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            key_map: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, source_key: impl Into<String>, target_key: impl Into<String>) -> Self {
        self.key_map.insert(source_key.into(), target_key.into());
        self
    }

    /// Renders the provenance descriptor for one key pair carried by this edge.
    pub fn describe(&self, source_key: &str, target_key: &str) -> String {
        format!(
            "{} -> {} ({} -> {})",
            self.source, self.target, source_key, target_key
        )
    }

    /// Returns a target key that more than one source key maps onto, if any.
    pub fn shared_target_key(&self) -> Option<&str> {
        self.key_map
            .values()
            .duplicates()
            .next()
            .map(String::as_str)
    }
}

/// A unit of computation with named input and output slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "node_id")]
    pub id: String,
    /// Selects the executor; `None` runs the default executor.
    #[serde(default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub data_in: Slots,
    #[serde(default)]
    pub data_out: Slots,
    #[serde(default)]
    pub paths_in: Vec<Edge>,
    #[serde(default)]
    pub paths_out: Vec<Edge>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: None,
            data_in: Slots::new(),
            data_out: Slots::new(),
            paths_in: Vec::new(),
            paths_out: Vec::new(),
            enabled: None,
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data_in.insert(key.into(), value.into());
        self
    }

    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data_out.insert(key.into(), value.into());
        self
    }

    pub fn with_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// A root node has no incoming edges.
    pub fn is_root(&self) -> bool {
        self.paths_in.is_empty()
    }

    /// A leaf node has no outgoing edges.
    pub fn is_leaf(&self) -> bool {
        self.paths_out.is_empty()
    }
}

/// A stored graph document: an ordered collection of nodes with mirrored edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Assigned by the graph store on creation.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { id: None, nodes }
    }

    /// Parses a graph document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    /// Adds `edge` to the source's `paths_out` and the target's `paths_in`.
    ///
    /// Endpoints that are not part of the graph are skipped, so the document
    /// may end up with a dangling reference that validation will report.
    pub fn connect(&mut self, edge: Edge) -> &mut Self {
        for node in &mut self.nodes {
            if node.id == edge.source {
                node.paths_out.push(edge.clone());
            }
            if node.id == edge.target {
                node.paths_in.push(edge.clone());
            }
        }
        self
    }

    /// Structural equality: same nodes, slots and edges, ignoring the store id.
    pub fn same_structure(&self, other: &Graph) -> bool {
        self.nodes == other.nodes
    }

    pub fn root_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.is_root())
            .map(|n| n.id.clone())
            .collect()
    }

    pub fn leaf_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.id.clone())
            .collect()
    }
}
