//! Unit tests for the document model, configuration and execution building blocks.
mod common;
use common::*;
use graphrun::configurator::apply_run_config;
use graphrun::executor::{EchoExecutor, PassThroughExecutor, create_executor_by_name};
use graphrun::model::{OVERWRITE_SOURCE, ROOT_INPUT_SOURCE};
use graphrun::prelude::*;
use graphrun::resolver::resolve;
use std::collections::BTreeMap;

#[test]
fn test_value_kinds_are_strict() {
    assert!(Value::from(1).same_kind(&Value::from(2)));
    assert!(!Value::from(1).same_kind(&Value::from(1.0)));
    assert!(!Value::from("1").same_kind(&Value::from(1)));
    assert_eq!(Value::from(vec![Value::from(1)]).kind(), ValueKind::List);
    assert_eq!(ValueKind::Map.to_string(), "mapping");
}

#[test]
fn test_value_display() {
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from(2.0).to_string(), "2.0");
    assert_eq!(Value::from("hi").to_string(), "\"hi\"");
    assert_eq!(
        Value::from(vec![Value::from(1), Value::from(false)]).to_string(),
        "[1, false]"
    );
}

#[test]
fn test_value_json_is_untagged() {
    let value: Value = serde_json::from_str(r#"{"a": [1, 2.5, "x", true]}"#).unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(
        "a".to_string(),
        Value::List(vec![
            Value::Integer(1),
            Value::Real(2.5),
            Value::Text("x".to_string()),
            Value::Boolean(true),
        ]),
    );
    assert_eq!(value, Value::Map(expected));
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"a":[1,2.5,"x",true]}"#
    );
}

#[test]
fn test_value_json_rejects_null() {
    assert!(serde_json::from_str::<Value>("null").is_err());
}

#[test]
fn test_graph_from_json_mirrors_builder() {
    let parsed = Graph::from_json(ROOT_LEAF_JSON).expect("Failed to parse graph JSON");
    assert_eq!(parsed.id, None);
    assert!(parsed.same_structure(&create_root_leaf_graph()));
    assert_eq!(parsed.root_ids(), vec!["root".to_string()]);
    assert_eq!(parsed.leaf_ids(), vec!["leaf".to_string()]);
}

#[test]
fn test_graph_accepts_store_id_alias() {
    let graph = Graph::from_json(r#"{"_id": "g1", "nodes": []}"#).unwrap();
    assert_eq!(graph.id.as_deref(), Some("g1"));
}

#[test]
fn test_edge_describe_and_shared_target_key() {
    let edge = Edge::new("root", "leaf").with_key("x", "y");
    assert_eq!(edge.describe("x", "y"), "root -> leaf (x -> y)");
    assert_eq!(edge.shared_target_key(), None);

    let clashing = edge.with_key("z", "y");
    assert_eq!(clashing.shared_target_key(), Some("y"));
}

#[test]
fn test_fingerprint_ignores_list_order_and_duplicates() {
    let a = RunConfig::new().disable(["n2", "n1"]);
    let b = RunConfig::new().disable(["n1", "n2", "n1"]);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_eq!(a.fingerprint().len(), 64);
}

#[test]
fn test_fingerprint_distinguishes_values_and_kinds() {
    let int = RunConfig::new().with_root_input("root", "x", 1);
    let real = RunConfig::new().with_root_input("root", "x", 1.0);
    let text = RunConfig::new().with_root_input("root", "x", "1");
    assert_ne!(int.fingerprint(), real.fingerprint());
    assert_ne!(int.fingerprint(), text.fingerprint());
    assert_ne!(
        RunConfig::new().enable(["a"]).fingerprint(),
        RunConfig::new().disable(["a"]).fingerprint()
    );
}

#[test]
fn test_run_config_json_defaults() {
    let config: RunConfig = serde_json::from_str(r#"{"disable_list": ["n1"]}"#).unwrap();
    assert_eq!(config, RunConfig::new().disable(["n1"]));
}

#[test]
fn test_execution_graph_single_edge_list() {
    let exec = ExecutionGraph::from_graph(&create_diamond_graph()).unwrap();
    assert_eq!(exec.len(), 4);
    assert_eq!(exec.edges().len(), 4);
    assert_eq!(exec.incoming("sink").count(), 2);
    assert_eq!(exec.outgoing("src").count(), 2);
    assert!(exec.is_root("src"));
    assert!(exec.is_leaf("sink"));
}

#[test]
fn test_execution_graph_round_trips_document() {
    let graph = create_diamond_graph();
    let exec = ExecutionGraph::from_graph(&graph).unwrap();
    assert!(exec.to_graph().same_structure(&graph));
}

#[test]
fn test_retain_nodes_drops_incident_edges() {
    let mut exec = ExecutionGraph::from_graph(&create_diamond_graph()).unwrap();
    exec.retain_nodes(|node| node.id != "A");

    assert!(!exec.contains("A"));
    assert_eq!(exec.edges().len(), 2);
    assert!(exec.edges().iter().all(|e| e.source != "A" && e.target != "A"));
    let sink = exec.to_graph();
    assert_eq!(sink.node("sink").unwrap().paths_in.len(), 1);
}

#[test]
fn test_apply_disable_removes_node_and_edges() {
    let exec = ExecutionGraph::from_graph(&create_chain_graph(3)).unwrap();
    let configured = apply_run_config(&exec, &RunConfig::new().disable(["n1"])).unwrap();

    assert_eq!(configured.node_ids().collect::<Vec<_>>(), vec!["n0", "n2"]);
    assert!(configured.edges().is_empty());
    // input untouched
    assert_eq!(exec.len(), 3);
    assert_eq!(exec.edges().len(), 2);
}

#[test]
fn test_apply_is_idempotent() {
    let exec = ExecutionGraph::from_graph(&create_chain_graph(4)).unwrap();
    let config = RunConfig::new().disable(["n3"]);
    let once = apply_run_config(&exec, &config).unwrap();
    let twice = apply_run_config(&once, &config).unwrap();
    assert!(once.to_graph().same_structure(&twice.to_graph()));
}

#[test]
fn test_apply_skips_nodes_disabled_in_document() {
    let mut graph = create_chain_graph(3);
    graph.nodes[2].enabled = Some(false);
    let exec = ExecutionGraph::from_graph(&graph).unwrap();

    let configured = apply_run_config(&exec, &RunConfig::default()).unwrap();
    assert!(!configured.contains("n2"));

    let forced = apply_run_config(&exec, &RunConfig::new().enable(["n0", "n2"])).unwrap();
    assert!(forced.contains("n2"));
}

#[test]
fn test_apply_merges_overwrites_into_data_in() {
    let exec = ExecutionGraph::from_graph(&create_chain_graph(2)).unwrap();
    let config = RunConfig::new()
        .with_root_input("n0", "v", 5)
        .with_overwrite("n1", "v", 9);
    let configured = apply_run_config(&exec, &config).unwrap();

    assert_eq!(configured.node("n0").unwrap().data_in["v"], Value::from(5));
    assert_eq!(configured.node("n1").unwrap().data_in["v"], Value::from(9));
}

#[test]
fn test_apply_rejects_overlapping_lists() {
    let exec = ExecutionGraph::from_graph(&create_pair_graph()).unwrap();
    let config = RunConfig::new().enable(["A"]).disable(["A", "B"]);
    assert!(matches!(
        apply_run_config(&exec, &config),
        Err(ConfigError::InvalidNodeSelection(_))
    ));
}

#[test]
fn test_resolve_prefers_lexicographically_smaller_source() {
    let exec = ExecutionGraph::from_graph(&create_diamond_graph()).unwrap();
    let mut produced = BTreeMap::new();
    produced.insert("B".to_string(), exec.node("B").unwrap().data_out.clone());
    produced.insert("A".to_string(), exec.node("A").unwrap().data_out.clone());

    let resolution = resolve(&exec, "sink", &produced, &RunConfig::default());
    assert_eq!(resolution.inputs["k"], Value::from("from A"));
    assert_eq!(resolution.provenance["k"], "A -> sink (k -> k)");
}

#[test]
fn test_resolve_tie_break_ignores_edge_order() {
    let exec = ExecutionGraph::from_graph(&create_reversed_diamond_graph()).unwrap();
    let incoming: Vec<&str> = exec.incoming("sink").map(|e| e.source.as_str()).collect();
    assert_eq!(incoming, vec!["A", "B"]);

    let mut produced = BTreeMap::new();
    produced.insert("A".to_string(), exec.node("A").unwrap().data_out.clone());
    produced.insert("B".to_string(), exec.node("B").unwrap().data_out.clone());

    let resolution = resolve(&exec, "sink", &produced, &RunConfig::default());
    assert_eq!(resolution.inputs["k"], Value::from("from A"));
    assert_eq!(resolution.provenance["k"], "A -> sink (k -> k)");
}

#[test]
fn test_resolve_skips_missing_outputs() {
    let exec = ExecutionGraph::from_graph(&create_root_leaf_graph()).unwrap();
    let resolution = resolve(&exec, "leaf", &BTreeMap::new(), &RunConfig::default());
    assert!(resolution.inputs.is_empty());
    assert!(resolution.provenance.is_empty());
}

#[test]
fn test_resolve_applies_config_last() {
    let exec = ExecutionGraph::from_graph(&create_chain_graph(2)).unwrap();
    let mut produced = BTreeMap::new();
    produced.insert("n0".to_string(), exec.node("n0").unwrap().data_out.clone());

    let config = RunConfig::new().with_overwrite("n1", "v", 99);
    let resolution = resolve(&exec, "n1", &produced, &config);
    assert_eq!(resolution.inputs["v"], Value::from(99));
    assert_eq!(resolution.provenance["v"], OVERWRITE_SOURCE);

    let root = resolve(
        &exec,
        "n0",
        &produced,
        &RunConfig::new().with_root_input("n0", "v", 3),
    );
    assert_eq!(root.provenance["v"], ROOT_INPUT_SOURCE);
}

#[test]
fn test_builtin_executors() {
    let node = ExecNode::from(
        &Node::new("n")
            .with_input("a", 0)
            .with_output("a", 1)
            .with_output("b", 2),
    );
    let mut inputs = Slots::new();
    inputs.insert("a".to_string(), Value::from(42));

    let echoed = EchoExecutor.execute(&node, &inputs).unwrap();
    assert_eq!(echoed, node.data_out);

    let passed = PassThroughExecutor.execute(&node, &inputs).unwrap();
    assert_eq!(passed["a"], Value::from(42));
    assert_eq!(passed["b"], Value::from(2));

    assert!(create_executor_by_name("echo").is_some());
    assert!(create_executor_by_name("nope").is_none());
}

#[test]
fn test_registry_records_results_on_node() {
    let registry = ExecutorRegistry::new();
    let mut node = ExecNode::from(&Node::new("n").with_input("a", 0).with_output("a", 1));
    let mut inputs = Slots::new();
    inputs.insert("a".to_string(), Value::from(5));

    let outputs = registry.execute(&mut node, &inputs).unwrap();
    assert_eq!(outputs["a"], Value::from(1));
    assert_eq!(node.data_in["a"], Value::from(5));
    assert_eq!(node.data_out, outputs);
}

#[test]
fn test_registry_rejects_unknown_type() {
    let registry = ExecutorRegistry::new();
    let mut node = ExecNode::from(&Node::new("n").with_type("matrix-multiply"));
    let result = registry.execute(&mut node, &Slots::new());
    assert_eq!(
        result,
        Err(ExecutionError::UnknownNodeType {
            node_id: "n".to_string(),
            type_name: "matrix-multiply".to_string(),
        })
    );
}

#[test]
fn test_registry_type_mapping() {
    let mut registry = ExecutorRegistry::new();
    registry.map_type("forward", "passthrough");
    registry.map_type("ignored", "does-not-exist");
    assert!(registry.contains("forward"));
    assert!(!registry.contains("ignored"));
}

#[test]
fn test_run_formatter_lists_provenance() {
    let engine = Engine::in_memory();
    let graph_id = store(&engine, create_root_leaf_graph());
    let run = engine.run_graph(&graph_id, &RunConfig::default()).unwrap();

    let report = RunFormatter::format_run(&run);
    assert!(report.contains("Order: root -> leaf"));
    assert!(report.contains("in  y = 1 (from root -> leaf (x -> y))"));
    assert!(report.contains("Leaf outputs:"));
}

#[test]
fn test_builder_replaces_default_executor() {
    let engine = Engine::builder(MemoryGraphStore::new(), MemoryRunStore::new())
        .with_default_executor(Box::new(PassThroughExecutor))
        .build();
    let graph_id = store(&engine, create_chain_graph(3));

    let run = engine
        .run_graph(&graph_id, &RunConfig::new().with_root_input("n0", "v", 5))
        .unwrap();
    // untyped nodes now forward the root input instead of echoing data_out
    assert_eq!(run.outputs["n0"]["v"], Value::from(5));
    assert_eq!(run.outputs["n2"]["v"], Value::from(5));

    let echoing = Engine::in_memory();
    let graph_id = store(&echoing, create_chain_graph(3));
    let run = echoing.run_graph(&graph_id, &RunConfig::default()).unwrap();
    assert_eq!(run.outputs["n2"]["v"], Value::from(2));
}
