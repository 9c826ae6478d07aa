//! # graphrun - Graph Validation and Execution Engine
//!
//! **graphrun** stores node-based dependency graphs, validates them, and executes
//! them under per-run configurations. Every completed run is recorded with the
//! inputs, outputs and input provenance of each node, and re-running a graph with
//! an equivalent configuration replays the stored record instead of executing again.
//!
//! ## Core Workflow
//!
//! 1.  **Describe the graph**: Build a [`model::Graph`] directly, parse one from JSON
//!     with [`model::Graph::from_json`], or implement [`model::IntoGraph`] for your own format.
//! 2.  **Store it**: [`engine::Engine::create_graph`] validates the structure (unique ids,
//!     mirrored edges, acyclicity, connectivity, slot types) and assigns a graph id.
//! 3.  **Run it**: [`engine::Engine::run_graph`] validates a [`model::RunConfig`], derives
//!     the configured graph, executes it in topological order and stores the result.
//! 4.  **Inspect**: query outputs per node or per leaf, or print a run with [`report::RunFormatter`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphrun::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::new(vec![
//!         Node::new("root").with_input("x", 1).with_output("x", 1),
//!         Node::new("leaf").with_input("y", 0).with_output("y", 0).with_type("passthrough"),
//!     ]);
//!     graph.connect(Edge::new("root", "leaf").with_key("x", "y"));
//!
//!     let engine = Engine::in_memory();
//!     let stored = engine.create_graph(graph)?;
//!     let graph_id = stored.id.clone().unwrap_or_default();
//!
//!     let config = RunConfig::new().with_root_input("root", "x", 42);
//!     let run = engine.run_graph(&graph_id, &config)?;
//!
//!     // leaf received root's "x" under its own key "y"
//!     println!("{}", RunFormatter::format_run(&run));
//!     assert_eq!(run.provenance["leaf"]["y"], "root -> leaf (x -> y)");
//!
//!     // Same configuration again: the stored run is replayed.
//!     let replay = engine.run_graph(&graph_id, &config)?;
//!     assert_eq!(replay.run_id, run.run_id);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod configurator;
pub mod engine;
pub mod error;
pub mod executor;
pub mod graph;
pub mod model;
pub mod prelude;
pub mod report;
pub mod resolver;
pub mod scheduler;
pub mod store;
pub mod validation;
