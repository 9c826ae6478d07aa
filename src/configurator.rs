use crate::error::ConfigError;
use crate::graph::ExecutionGraph;
use crate::model::RunConfig;
use crate::validation::check_node_selection;
use ahash::AHashSet;

/// Applies a run configuration to a graph, returning a new, independent graph.
///
/// The input is never mutated. Node selection works as follows:
/// * a non-empty `enable_list` keeps exactly the listed nodes;
/// * otherwise nodes in `disable_list`, and nodes whose `enabled` flag is
///   `false`, are removed.
///
/// Edges touching a removed node disappear from both endpoints. Root inputs and
/// then data overwrites are merged into the surviving nodes' `data_in`, with the
/// configured value winning on key collisions.
///
/// Key and type checks for root inputs and overwrites belong to
/// [`validate_run_config`](crate::validation::validate_run_config), which runs
/// against the stored graph before this is called.
pub fn apply_run_config(
    graph: &ExecutionGraph,
    config: &RunConfig,
) -> Result<ExecutionGraph, ConfigError> {
    check_node_selection(graph.node_ids(), config)?;

    let mut configured = graph.clone();
    if !config.enable_list.is_empty() {
        let keep: AHashSet<&str> = config.enable_list.iter().map(String::as_str).collect();
        configured.retain_nodes(|node| keep.contains(node.id.as_str()));
    } else {
        let removed: AHashSet<&str> = config.disable_list.iter().map(String::as_str).collect();
        configured.retain_nodes(|node| {
            !removed.contains(node.id.as_str()) && node.enabled != Some(false)
        });
    }

    for (node_id, inputs) in config.root_inputs.iter().chain(&config.data_overwrites) {
        if let Some(node) = configured.node_mut(node_id) {
            node.data_in
                .extend(inputs.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    Ok(configured)
}
