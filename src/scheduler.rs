use crate::error::StructuralError;
use crate::graph::ExecutionGraph;
use std::collections::VecDeque;

/// Computes a dependency-respecting execution order with Kahn's algorithm.
///
/// Zero in-degree nodes are released in FIFO order, seeded in arena order, so the
/// result is deterministic for a given graph. If some nodes can never be released
/// the graph has a cycle (or a node only reachable through one) and the call fails
/// with `CycleOrIsland`, reporting how far the order got.
pub fn topological_order(graph: &ExecutionGraph) -> Result<Vec<String>, StructuralError> {
    let total = graph.len();
    let mut in_degree: Vec<usize> = (0..total).map(|p| graph.in_degree_at(p)).collect();

    let mut queue: VecDeque<usize> = (0..total).filter(|&p| in_degree[p] == 0).collect();
    let mut order = Vec::with_capacity(total);
    let mut emitted = vec![false; total];

    while let Some(position) = queue.pop_front() {
        order.push(position);
        emitted[position] = true;

        for successor in graph.successors_at(position) {
            in_degree[successor] -= 1;
            if in_degree[successor] == 0 {
                queue.push_back(successor);
            }
        }
    }

    if order.len() != total {
        let unordered = (0..total)
            .filter(|&p| !emitted[p])
            .map(|p| graph.node_at(p).id.clone())
            .collect();
        return Err(StructuralError::CycleOrIsland {
            ordered: order.len(),
            total,
            unordered,
        });
    }

    Ok(order
        .into_iter()
        .map(|p| graph.node_at(p).id.clone())
        .collect())
}
