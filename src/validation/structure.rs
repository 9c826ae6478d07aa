use crate::analysis::find_islands;
use crate::error::{MismatchDetail, StructuralError};
use crate::graph::ExecutionGraph;
use crate::model::{Edge, Graph, Node};
use crate::scheduler::topological_order;
use ahash::{AHashMap, AHashSet};

/// Proves that `graph` is a valid, executable DAG.
///
/// Checks run in this order and stop at the first failure: unique node ids and
/// referential integrity, edge parity, edge uniqueness, acyclicity, a single
/// island, and finally key and type compatibility along every edge.
pub fn validate_graph(graph: &Graph) -> Result<(), StructuralError> {
    // Rejects duplicate ids and dangling references before anything indexes by id.
    let exec = ExecutionGraph::from_graph(graph)?;
    let nodes: AHashMap<&str, &Node> = graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    check_edge_parity(graph, &nodes)?;
    check_unique_edges(graph)?;
    topological_order(&exec)?;

    let islands = find_islands(&exec);
    if islands.len() > 1 {
        return Err(StructuralError::DisconnectedGraph {
            count: islands.len(),
        });
    }

    check_type_compatibility(graph, &nodes)
}

fn asymmetric(edge: &Edge, message: impl Into<String>) -> StructuralError {
    StructuralError::AsymmetricEdge {
        source_node_id: edge.source.clone(),
        target_node_id: edge.target.clone(),
        message: message.into(),
    }
}

fn check_edge_parity(graph: &Graph, nodes: &AHashMap<&str, &Node>) -> Result<(), StructuralError> {
    for node in &graph.nodes {
        for edge in &node.paths_out {
            if edge.source != node.id {
                return Err(asymmetric(
                    edge,
                    format!("listed in paths_out of unrelated node '{}'", node.id),
                ));
            }
            let mirrored = nodes
                .get(edge.target.as_str())
                .is_some_and(|target| target.paths_in.contains(edge));
            if !mirrored {
                return Err(asymmetric(edge, "missing from the target's paths_in"));
            }
        }
        for edge in &node.paths_in {
            if edge.target != node.id {
                return Err(asymmetric(
                    edge,
                    format!("listed in paths_in of unrelated node '{}'", node.id),
                ));
            }
            let mirrored = nodes
                .get(edge.source.as_str())
                .is_some_and(|source| source.paths_out.contains(edge));
            if !mirrored {
                return Err(asymmetric(edge, "missing from the source's paths_out"));
            }
        }
    }
    Ok(())
}

fn check_unique_edges(graph: &Graph) -> Result<(), StructuralError> {
    let mut seen: AHashSet<&Edge> = AHashSet::new();
    for edge in graph.nodes.iter().flat_map(|n| &n.paths_out) {
        if let Some(target_key) = edge.shared_target_key() {
            return Err(StructuralError::NonUniqueKeyMapping {
                source_node_id: edge.source.clone(),
                target_node_id: edge.target.clone(),
                target_key: target_key.to_string(),
            });
        }
        if !seen.insert(edge) {
            return Err(StructuralError::DuplicateEdge {
                source_node_id: edge.source.clone(),
                target_node_id: edge.target.clone(),
            });
        }
    }
    Ok(())
}

fn check_type_compatibility(
    graph: &Graph,
    nodes: &AHashMap<&str, &Node>,
) -> Result<(), StructuralError> {
    for edge in graph.nodes.iter().flat_map(|n| &n.paths_out) {
        let (Some(source), Some(target)) = (
            nodes.get(edge.source.as_str()),
            nodes.get(edge.target.as_str()),
        ) else {
            continue;
        };

        for (source_key, target_key) in &edge.key_map {
            let mismatch = |detail| StructuralError::TypeMismatch {
                source_node_id: edge.source.clone(),
                source_key: source_key.clone(),
                target_node_id: edge.target.clone(),
                target_key: target_key.clone(),
                detail,
            };
            let output = source
                .data_out
                .get(source_key)
                .ok_or_else(|| mismatch(MismatchDetail::MissingOutput))?;
            let input = target
                .data_in
                .get(target_key)
                .ok_or_else(|| mismatch(MismatchDetail::MissingInput))?;
            if !output.same_kind(input) {
                return Err(mismatch(MismatchDetail::Kinds {
                    output: output.kind(),
                    input: input.kind(),
                }));
            }
        }
    }
    Ok(())
}
