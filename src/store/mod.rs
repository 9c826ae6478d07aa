//! Storage seams for graphs and completed runs.
//!
//! The engine only talks to these traits. The in-memory implementations are
//! thread-safe and can be persisted to disk as bincode snapshots.

use crate::error::StoreError;
use crate::model::{Graph, RunConfig, RunResult, RunSummary};

mod memory;
mod snapshot;

pub use memory::{MemoryGraphStore, MemoryRunStore};

/// Durable storage of graph documents keyed by graph id.
pub trait GraphStore: Send + Sync {
    /// Stores `graph` under a fresh id. If a structurally identical graph is
    /// already stored, that graph is returned unchanged instead.
    fn create(&self, graph: Graph) -> Result<Graph, StoreError>;
    fn get(&self, graph_id: &str) -> Result<Graph, StoreError>;
    fn replace(&self, graph_id: &str, graph: Graph) -> Result<Graph, StoreError>;
    fn delete(&self, graph_id: &str) -> Result<(), StoreError>;
}

/// Durable storage of completed run records.
pub trait RunStore: Send + Sync {
    /// Finds the run of `graph_id` whose configuration has the same fingerprint as `config`.
    fn find_by_config(&self, graph_id: &str, config: &RunConfig) -> Option<RunResult>;
    /// Inserts `run` unless a run with the same graph and config fingerprint exists,
    /// in which case the stored run is returned and `run` is discarded.
    fn save(&self, run: RunResult) -> Result<RunResult, StoreError>;
    fn find_by_run_id(&self, graph_id: &str, run_id: &str) -> Result<RunResult, StoreError>;
    fn list_by_graph(&self, graph_id: &str) -> Vec<RunSummary>;
    /// Removes every run of `graph_id`, returning how many were removed.
    fn purge_graph(&self, graph_id: &str) -> usize;
}
