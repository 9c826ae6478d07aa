use super::value::{Slots, Value};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Caller-supplied overrides for a single run of a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input values for root nodes, keyed by node id.
    #[serde(default)]
    pub root_inputs: BTreeMap<String, Slots>,
    /// Input overwrites for non-root nodes, keyed by node id.
    #[serde(default)]
    pub data_overwrites: BTreeMap<String, Slots>,
    #[serde(default)]
    pub enable_list: Vec<String>,
    #[serde(default)]
    pub disable_list: Vec<String>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable<I, S>(mut self, node_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enable_list.extend(node_ids.into_iter().map(Into::into));
        self
    }

    pub fn disable<I, S>(mut self, node_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disable_list.extend(node_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_root_input(
        mut self,
        node_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.root_inputs
            .entry(node_id.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn with_overwrite(
        mut self,
        node_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.data_overwrites
            .entry(node_id.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Returns a copy with the node selection lists sorted and deduplicated.
    pub fn normalized(&self) -> Self {
        Self {
            root_inputs: self.root_inputs.clone(),
            data_overwrites: self.data_overwrites.clone(),
            enable_list: self.enable_list.iter().sorted().dedup().cloned().collect(),
            disable_list: self.disable_list.iter().sorted().dedup().cloned().collect(),
        }
    }

    /// Hex-encoded SHA-256 of the normalized configuration.
    ///
    /// Two configurations with the same fingerprint describe the same run, which
    /// is what the run store uses for idempotent replay.
    pub fn fingerprint(&self) -> String {
        let normalized = self.normalized();
        let mut hasher = Sha256::new();
        for (section, entries) in [
            ("root_inputs", &normalized.root_inputs),
            ("data_overwrites", &normalized.data_overwrites),
        ] {
            for (node_id, slots) in entries {
                let rendered = slots
                    .iter()
                    .map(|(k, v)| format!("{:?}={}", k, v))
                    .join(",");
                hasher.update(format!("{}:{:?}:{}\n", section, node_id, rendered));
            }
        }
        for (section, ids) in [
            ("enable_list", &normalized.enable_list),
            ("disable_list", &normalized.disable_list),
        ] {
            hasher.update(format!("{}:{:?}\n", section, ids));
        }
        format!("{:x}", hasher.finalize())
    }
}
