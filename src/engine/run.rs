use crate::error::ExecutionError;
use crate::executor::ExecutorRegistry;
use crate::graph::ExecutionGraph;
use crate::model::{RunConfig, Slots};
use crate::resolver::resolve;
use crate::scheduler::topological_order;
use std::collections::BTreeMap;
use tracing::debug;

/// Everything a run produced, before it is stamped with ids and stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execution {
    pub order: Vec<String>,
    pub inputs: BTreeMap<String, Slots>,
    pub outputs: BTreeMap<String, Slots>,
    pub provenance: BTreeMap<String, BTreeMap<String, String>>,
    pub leaf_outputs: BTreeMap<String, Slots>,
}

/// Executes a configured graph node by node in dependency order.
///
/// Each node is resolved against the outputs of the nodes before it and then run
/// through its executor, which also records the resolved inputs and produced
/// outputs on the node in `graph`. Any failure aborts the whole run; nothing is
/// returned for a partially executed graph.
pub fn execute_graph(
    graph: &mut ExecutionGraph,
    config: &RunConfig,
    executors: &ExecutorRegistry,
) -> Result<Execution, ExecutionError> {
    let order = topological_order(graph).map_err(ExecutionError::Scheduling)?;

    let mut execution = Execution {
        order: order.clone(),
        ..Execution::default()
    };

    for node_id in order {
        let resolution = resolve(graph, &node_id, &execution.outputs, config);
        let node = graph
            .node_mut(&node_id)
            .ok_or_else(|| ExecutionError::MissingNode(node_id.clone()))?;
        let produced = executors.execute(node, &resolution.inputs)?;

        debug!(
            node_id = %node_id,
            inputs = resolution.inputs.len(),
            outputs = produced.len(),
            "executed node"
        );

        execution
            .inputs
            .insert(node_id.clone(), resolution.inputs);
        execution
            .provenance
            .insert(node_id.clone(), resolution.provenance);
        execution.outputs.insert(node_id, produced);
    }

    execution.leaf_outputs = graph
        .leaf_ids()
        .into_iter()
        .filter_map(|id| execution.outputs.get(&id).cloned().map(|out| (id, out)))
        .collect();

    Ok(execution)
}
