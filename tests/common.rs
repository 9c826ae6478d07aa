//! Common test utilities for building graph documents and run configurations.
use graphrun::prelude::*;

/// `root -> leaf` carrying `x` into `y`.
///
/// Execution order is `[root, leaf]`; leaf's resolved input is `{y: 1}`.
#[allow(dead_code)]
pub fn create_root_leaf_graph() -> Graph {
    let mut graph = Graph::new(vec![
        Node::new("root").with_output("x", 1),
        Node::new("leaf").with_input("y", 0).with_output("y", 1),
    ]);
    graph.connect(Edge::new("root", "leaf").with_key("x", "y"));
    graph
}

/// A linear chain `n0 -> n1 -> ... -> n{len-1}` passing `v` along every edge.
#[allow(dead_code)]
pub fn create_chain_graph(len: usize) -> Graph {
    let ids: Vec<String> = (0..len).map(|i| format!("n{}", i)).collect();
    let mut graph = Graph::new(
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                Node::new(id.as_str())
                    .with_input("v", 0)
                    .with_output("v", i as i64)
            })
            .collect(),
    );
    for pair in ids.windows(2) {
        graph.connect(Edge::new(pair[0].as_str(), pair[1].as_str()).with_key("v", "v"));
    }
    graph
}

/// `src` fans out to `A` and `B`, both of which feed key `k` of `sink`.
///
/// `A` outputs `"from A"` and `B` outputs `"from B"`. The edge from `B` is listed
/// before the edge from `A` on `sink`, so a last-writer-wins rule would pick `A`
/// and a first-writer-wins rule would pick `B`.
#[allow(dead_code)]
pub fn create_diamond_graph() -> Graph {
    let mut graph = Graph::new(vec![
        Node::new("src").with_input("seed", 0).with_output("seed", 7),
        Node::new("B").with_input("seed", 0).with_output("k", "from B"),
        Node::new("A").with_input("seed", 0).with_output("k", "from A"),
        Node::new("sink").with_input("k", "").with_output("done", true),
    ]);
    graph
        .connect(Edge::new("src", "B").with_key("seed", "seed"))
        .connect(Edge::new("src", "A").with_key("seed", "seed"))
        .connect(Edge::new("B", "sink").with_key("k", "k"))
        .connect(Edge::new("A", "sink").with_key("k", "k"));
    graph
}

/// The diamond with `A` listed, connected and executed before `B`.
///
/// Here a last-writer-wins rule would pick `B`, so only the smaller source id
/// rule resolves `k` to `"from A"` in both diamonds.
#[allow(dead_code)]
pub fn create_reversed_diamond_graph() -> Graph {
    let mut graph = Graph::new(vec![
        Node::new("src").with_input("seed", 0).with_output("seed", 7),
        Node::new("A").with_input("seed", 0).with_output("k", "from A"),
        Node::new("B").with_input("seed", 0).with_output("k", "from B"),
        Node::new("sink").with_input("k", "").with_output("done", true),
    ]);
    graph
        .connect(Edge::new("src", "A").with_key("seed", "seed"))
        .connect(Edge::new("src", "B").with_key("seed", "seed"))
        .connect(Edge::new("A", "sink").with_key("k", "k"))
        .connect(Edge::new("B", "sink").with_key("k", "k"));
    graph
}

/// Two independent two-node components: `a1 -> a2` and `b1 -> b2`.
#[allow(dead_code)]
pub fn create_split_graph() -> Graph {
    let mut graph = Graph::new(vec![
        Node::new("a1").with_output("v", 1),
        Node::new("a2").with_input("v", 0),
        Node::new("b1").with_output("v", 2),
        Node::new("b2").with_input("v", 0),
    ]);
    graph
        .connect(Edge::new("a1", "a2").with_key("v", "v"))
        .connect(Edge::new("b1", "b2").with_key("v", "v"));
    graph
}

/// `A -> B`, used for node selection tests.
#[allow(dead_code)]
pub fn create_pair_graph() -> Graph {
    let mut graph = Graph::new(vec![
        Node::new("A").with_input("v", 0).with_output("v", 10),
        Node::new("B").with_input("v", 0).with_output("v", 20),
    ]);
    graph.connect(Edge::new("A", "B").with_key("v", "v"));
    graph
}

/// Stores `graph` in `engine` and returns its id.
#[allow(dead_code)]
pub fn store(engine: &Engine, graph: Graph) -> String {
    engine
        .create_graph(graph)
        .expect("Failed to store graph")
        .id
        .expect("Stored graph has no id")
}

#[allow(dead_code)]
pub const ROOT_LEAF_JSON: &str = r#"{
    "nodes": [
        {
            "node_id": "root",
            "data_in": {},
            "data_out": {"x": 1},
            "paths_in": [],
            "paths_out": [{"src_node": "root", "dst_node": "leaf", "src_to_dst_data_keys": {"x": "y"}}]
        },
        {
            "node_id": "leaf",
            "data_in": {"y": 0},
            "data_out": {"y": 1},
            "paths_in": [{"src_node": "root", "dst_node": "leaf", "src_to_dst_data_keys": {"x": "y"}}],
            "paths_out": []
        }
    ]
}"#;
