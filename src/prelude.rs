//! Prelude module for convenient imports
//!
//! Re-exports the types most programs need to build, store and run graphs.
//!
//! # Example
//!
//! ```rust,no_run
//! use graphrun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph = Graph::from_json(&json)?;
//!
//! let engine = Engine::in_memory();
//! let stored = engine.create_graph(graph)?;
//! let graph_id = stored.id.unwrap_or_default();
//!
//! println!("Order: {:?}", engine.topological_sort(&graph_id, None)?);
//! let run = engine.run_graph(&graph_id, &RunConfig::default())?;
//! println!("{}", RunFormatter::format_run(&run));
//! # Ok(())
//! # }
//! ```

// Engine and storage
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::store::{GraphStore, MemoryGraphStore, MemoryRunStore, RunStore};

// Document and run model
pub use crate::model::{
    Edge, Graph, IntoGraph, Node, RunConfig, RunResult, RunSummary, Slots, Value, ValueKind,
};

// Execution
pub use crate::executor::{ExecutorRegistry, NodeExecutor};
pub use crate::graph::{ExecNode, ExecutionGraph};

// Error types
pub use crate::error::{
    ConfigError, EngineError, ExecutionError, NotFoundError, StoreError, StructuralError,
};

// Run formatting
pub use crate::report::RunFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
