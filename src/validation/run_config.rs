use crate::error::ConfigError;
use crate::model::{Graph, Node, RunConfig, Slots};
use ahash::AHashSet;
use itertools::Itertools;

/// Checks a run configuration against the stored graph it will run on.
///
/// Node selection lists must be disjoint and name existing nodes; when both lists
/// are given they must together cover every node. Root inputs may only target
/// root nodes and must provide exactly the declared `data_in` keys with matching
/// value kinds. Overwrites may only target non-root nodes and declared keys.
pub fn validate_run_config(graph: &Graph, config: &RunConfig) -> Result<(), ConfigError> {
    let ids: AHashSet<&str> = graph.node_ids().collect();

    let unknown = config
        .enable_list
        .iter()
        .chain(&config.disable_list)
        .filter(|id| !ids.contains(id.as_str()))
        .unique()
        .join(", ");
    if !unknown.is_empty() {
        return Err(ConfigError::InvalidNodeSelection(format!(
            "unknown nodes in enable/disable list: {}",
            unknown
        )));
    }
    check_node_selection(graph.node_ids(), config)?;

    for (node_id, inputs) in &config.root_inputs {
        let root = graph
            .node(node_id)
            .filter(|n| n.is_root())
            .ok_or_else(|| ConfigError::InvalidRootInput {
                node_id: node_id.clone(),
                message: "target must be a root node (without incoming edges)".to_string(),
            })?;

        let missing = root
            .data_in
            .keys()
            .filter(|k| !inputs.contains_key(*k))
            .join(", ");
        if !missing.is_empty() {
            return Err(ConfigError::InvalidRootInput {
                node_id: node_id.clone(),
                message: format!("missing required data_in keys: {}", missing),
            });
        }
        check_slots(root, inputs).map_err(|message| ConfigError::InvalidRootInput {
            node_id: node_id.clone(),
            message,
        })?;
    }

    for (node_id, overwrites) in &config.data_overwrites {
        let node = graph
            .node(node_id)
            .filter(|n| !n.is_root())
            .ok_or_else(|| ConfigError::InvalidOverwrite {
                node_id: node_id.clone(),
                message: "target must be a non-root node (with incoming edges)".to_string(),
            })?;
        check_slots(node, overwrites).map_err(|message| ConfigError::InvalidOverwrite {
            node_id: node_id.clone(),
            message,
        })?;
    }

    Ok(())
}

/// Every supplied key must be declared in the node's `data_in` with the same value kind.
fn check_slots(node: &Node, supplied: &Slots) -> Result<(), String> {
    let undeclared = supplied
        .keys()
        .filter(|k| !node.data_in.contains_key(*k))
        .join(", ");
    if !undeclared.is_empty() {
        return Err(format!("keys not declared in data_in: {}", undeclared));
    }

    for (key, value) in supplied {
        if let Some(declared) = node.data_in.get(key) {
            if !declared.same_kind(value) {
                return Err(format!(
                    "expected '{}' to be of type {}, but got {}",
                    key,
                    declared.kind(),
                    value.kind()
                ));
            }
        }
    }
    Ok(())
}

/// Enable and disable lists must be disjoint and, when both are given, partition
/// `node_ids`. Ids that are not in `node_ids` are ignored here so that applying a
/// configuration to an already reduced graph stays valid.
pub(crate) fn check_node_selection<'a>(
    node_ids: impl Iterator<Item = &'a str>,
    config: &RunConfig,
) -> Result<(), ConfigError> {
    let enabled: AHashSet<&str> = config.enable_list.iter().map(String::as_str).collect();
    let disabled: AHashSet<&str> = config.disable_list.iter().map(String::as_str).collect();

    let overlap = enabled.intersection(&disabled).sorted().join(", ");
    if !overlap.is_empty() {
        return Err(ConfigError::InvalidNodeSelection(format!(
            "nodes cannot appear in both enable and disable lists: {}",
            overlap
        )));
    }

    if !enabled.is_empty() && !disabled.is_empty() {
        let missing = node_ids
            .filter(|id| !enabled.contains(id) && !disabled.contains(id))
            .join(", ");
        if !missing.is_empty() {
            return Err(ConfigError::InvalidNodeSelection(format!(
                "every node must be in either the enable or the disable list, missing: {}",
                missing
            )));
        }
    }
    Ok(())
}
