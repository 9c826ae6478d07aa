//! Structural analyses that do not execute anything.

use crate::graph::ExecutionGraph;
use std::collections::VecDeque;

/// Breadth-first layering starting from every node without incoming edges.
///
/// Roots form level 0. A node is placed one level below the node it was first
/// discovered from and is never enqueued twice, so each node appears exactly once
/// (nodes only reachable through a cycle do not appear at all).
pub fn level_wise(graph: &ExecutionGraph) -> Vec<Vec<String>> {
    let mut levels: Vec<Vec<String>> = Vec::new();
    let mut discovered = vec![false; graph.len()];
    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();

    for position in 0..graph.len() {
        if graph.in_degree_at(position) == 0 {
            discovered[position] = true;
            queue.push_back((position, 0));
        }
    }

    while let Some((position, level)) = queue.pop_front() {
        if levels.len() <= level {
            levels.resize_with(level + 1, Vec::new);
        }
        levels[level].push(graph.node_at(position).id.clone());

        for successor in graph.successors_at(position) {
            if !discovered[successor] {
                discovered[successor] = true;
                queue.push_back((successor, level + 1));
            }
        }
    }

    levels
}

/// Partitions the graph into islands: maximal components under undirected adjacency.
///
/// Islands are listed in the order their first node appears in the graph, and the
/// members of each island in depth-first discovery order.
pub fn find_islands(graph: &ExecutionGraph) -> Vec<Vec<String>> {
    let mut visited = vec![false; graph.len()];
    let mut islands = Vec::new();

    for start in 0..graph.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut island = Vec::new();
        let mut stack = vec![start];

        while let Some(position) = stack.pop() {
            island.push(graph.node_at(position).id.clone());
            for neighbor in graph
                .successors_at(position)
                .chain(graph.predecessors_at(position))
            {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    stack.push(neighbor);
                }
            }
        }
        islands.push(island);
    }

    islands
}

/// True when the graph falls apart into more than one island.
pub fn has_islands(graph: &ExecutionGraph) -> bool {
    find_islands(graph).len() > 1
}
