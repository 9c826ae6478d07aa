//! The arena representation a run executes against.
//!
//! A stored [`Graph`] keeps every edge twice, once per endpoint. The
//! [`ExecutionGraph`] keeps a single authoritative edge list instead and derives
//! both adjacency views from an index, so removing nodes can never leave the two
//! sides out of sync.

use crate::error::StructuralError;
use crate::model::{Edge, Graph, Node, Slots};
use ahash::AHashMap;

/// A node inside an [`ExecutionGraph`]. Owned, so each run mutates its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecNode {
    pub id: String,
    pub node_type: Option<String>,
    pub enabled: Option<bool>,
    pub data_in: Slots,
    pub data_out: Slots,
}

impl From<&Node> for ExecNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            enabled: node.enabled,
            data_in: node.data_in.clone(),
            data_out: node.data_out.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionGraph {
    nodes: Vec<ExecNode>,
    index: AHashMap<String, usize>,
    edges: Vec<Edge>,
    /// `(source position, target position)` for every entry of `edges`.
    ends: Vec<(usize, usize)>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl ExecutionGraph {
    /// Builds a private deep copy of `graph`.
    ///
    /// Each node's `paths_out` is the authoritative edge source. Any edge, on either
    /// side, whose endpoint is missing fails with `DanglingReference`.
    pub fn from_graph(graph: &Graph) -> Result<Self, StructuralError> {
        let mut index = AHashMap::with_capacity(graph.nodes.len());
        for (position, node) in graph.nodes.iter().enumerate() {
            if index.insert(node.id.clone(), position).is_some() {
                return Err(StructuralError::DuplicateNodeId(node.id.clone()));
            }
        }

        let mut edges = Vec::new();
        for node in &graph.nodes {
            for edge in node.paths_in.iter().chain(&node.paths_out) {
                for endpoint in [&edge.source, &edge.target] {
                    if !index.contains_key(endpoint) {
                        return Err(StructuralError::DanglingReference {
                            source_node_id: edge.source.clone(),
                            target_node_id: edge.target.clone(),
                            missing_node_id: endpoint.clone(),
                        });
                    }
                }
            }
            edges.extend(node.paths_out.iter().cloned());
        }

        let mut built = Self {
            nodes: graph.nodes.iter().map(ExecNode::from).collect(),
            index,
            edges,
            ..Self::default()
        };
        built.rebuild_adjacency();
        Ok(built)
    }

    fn rebuild_adjacency(&mut self) {
        let index = &self.index;
        self.edges
            .retain(|edge| index.contains_key(&edge.source) && index.contains_key(&edge.target));
        self.outgoing = vec![Vec::new(); self.nodes.len()];
        self.incoming = vec![Vec::new(); self.nodes.len()];
        self.ends = Vec::with_capacity(self.edges.len());
        for (edge_idx, edge) in self.edges.iter().enumerate() {
            let (Some(&source), Some(&target)) =
                (self.index.get(&edge.source), self.index.get(&edge.target))
            else {
                continue;
            };
            self.outgoing[source].push(edge_idx);
            self.incoming[target].push(edge_idx);
            self.ends.push((source, target));
        }
    }

    /// Keeps only the nodes matching `keep`, dropping every edge that touches a removed node.
    pub fn retain_nodes<F>(&mut self, mut keep: F)
    where
        F: FnMut(&ExecNode) -> bool,
    {
        self.nodes.retain(|node| keep(node));
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id.clone(), position))
            .collect();
        self.rebuild_adjacency();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.index.contains_key(node_id)
    }

    pub fn position(&self, node_id: &str) -> Option<usize> {
        self.index.get(node_id).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ExecNode> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node(&self, node_id: &str) -> Option<&ExecNode> {
        self.position(node_id).map(|p| &self.nodes[p])
    }

    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut ExecNode> {
        self.position(node_id).map(move |p| &mut self.nodes[p])
    }

    pub fn node_at(&self, position: usize) -> &ExecNode {
        &self.nodes[position]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn outgoing(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.position(node_id)
            .into_iter()
            .flat_map(|p| self.outgoing[p].iter().map(|&e| &self.edges[e]))
    }

    pub fn incoming(&self, node_id: &str) -> impl Iterator<Item = &Edge> {
        self.position(node_id)
            .into_iter()
            .flat_map(|p| self.incoming[p].iter().map(|&e| &self.edges[e]))
    }

    /// Positions of the direct successors of the node at `position`, one per edge.
    pub fn successors_at(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[position].iter().map(|&e| self.ends[e].1)
    }

    /// Positions of the direct predecessors of the node at `position`, one per edge.
    pub fn predecessors_at(&self, position: usize) -> impl Iterator<Item = usize> + '_ {
        self.incoming[position].iter().map(|&e| self.ends[e].0)
    }

    pub fn in_degree_at(&self, position: usize) -> usize {
        self.incoming[position].len()
    }

    pub fn is_root(&self, node_id: &str) -> bool {
        self.position(node_id)
            .is_some_and(|p| self.incoming[p].is_empty())
    }

    pub fn is_leaf(&self, node_id: &str) -> bool {
        self.position(node_id)
            .is_some_and(|p| self.outgoing[p].is_empty())
    }

    pub fn leaf_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(p, _)| self.outgoing[*p].is_empty())
            .map(|(_, n)| n.id.clone())
            .collect()
    }

    pub fn root_ids(&self) -> Vec<String> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(p, _)| self.incoming[*p].is_empty())
            .map(|(_, n)| n.id.clone())
            .collect()
    }

    /// Renders the graph back into the mirrored document form.
    pub fn to_graph(&self) -> Graph {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(p, n)| Node {
                id: n.id.clone(),
                node_type: n.node_type.clone(),
                data_in: n.data_in.clone(),
                data_out: n.data_out.clone(),
                paths_in: self.incoming[p]
                    .iter()
                    .map(|&e| self.edges[e].clone())
                    .collect(),
                paths_out: self.outgoing[p]
                    .iter()
                    .map(|&e| self.edges[e].clone())
                    .collect(),
                enabled: n.enabled,
            })
            .collect();
        Graph::new(nodes)
    }
}
