use super::config::RunConfig;
use super::value::Slots;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provenance recorded for inputs that came from [`RunConfig::data_overwrites`].
pub const OVERWRITE_SOURCE: &str = "data_overwrite";
/// Provenance recorded for inputs that came from [`RunConfig::root_inputs`].
pub const ROOT_INPUT_SOURCE: &str = "root_input";

/// The immutable record of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub graph_id: String,
    pub config: RunConfig,
    /// [`RunConfig::fingerprint`] of `config`, used for replay lookups.
    pub config_fingerprint: String,
    pub created_at: DateTime<Utc>,
    /// Node ids in the order they were executed.
    pub order: Vec<String>,
    /// Resolved inputs per node.
    pub inputs: BTreeMap<String, Slots>,
    /// Produced outputs per node.
    pub outputs: BTreeMap<String, Slots>,
    /// For every node, the source of each resolved input key.
    pub provenance: BTreeMap<String, BTreeMap<String, String>>,
    /// Outputs of the nodes without outgoing edges in the configured graph.
    pub leaf_outputs: BTreeMap<String, Slots>,
}

impl RunResult {
    pub fn node_output(&self, node_id: &str) -> Option<&Slots> {
        self.outputs.get(node_id)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            run_id: self.run_id.clone(),
            created_at: self.created_at,
        }
    }
}

/// Listing entry for the runs of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub created_at: DateTime<Utc>,
}
