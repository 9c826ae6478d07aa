use super::{GraphStore, RunStore, snapshot};
use crate::error::{NotFoundError, StoreError};
use crate::model::{Graph, RunConfig, RunResult, RunSummary};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An in-memory [`GraphStore`]. Graphs keep their insertion order.
#[derive(Default)]
pub struct MemoryGraphStore {
    graphs: RwLock<Vec<Graph>>,
}

#[derive(Serialize, Deserialize)]
struct GraphSnapshot {
    graphs: Vec<Graph>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.graphs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.read().is_empty()
    }

    /// Saves every stored graph to a bincode snapshot file.
    pub fn save_snapshot(&self, path: &str) -> Result<(), StoreError> {
        let graphs = self.graphs.read().clone();
        snapshot::save(&GraphSnapshot { graphs }, path)
    }

    /// Loads a store from a snapshot written by [`MemoryGraphStore::save_snapshot`].
    pub fn from_file(path: &str) -> Result<Self, StoreError> {
        let loaded: GraphSnapshot = snapshot::load(path)?;
        Ok(Self {
            graphs: RwLock::new(loaded.graphs),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let graphs = self.graphs.read().clone();
        snapshot::to_bytes(&GraphSnapshot { graphs })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let loaded: GraphSnapshot = snapshot::from_bytes(bytes)?;
        Ok(Self {
            graphs: RwLock::new(loaded.graphs),
        })
    }
}

impl GraphStore for MemoryGraphStore {
    fn create(&self, mut graph: Graph) -> Result<Graph, StoreError> {
        let mut graphs = self.graphs.write();
        if let Some(existing) = graphs.iter().find(|g| g.same_structure(&graph)) {
            return Ok(existing.clone());
        }
        graph.id = Some(Uuid::new_v4().simple().to_string());
        graphs.push(graph.clone());
        Ok(graph)
    }

    fn get(&self, graph_id: &str) -> Result<Graph, StoreError> {
        self.graphs
            .read()
            .iter()
            .find(|g| g.id.as_deref() == Some(graph_id))
            .cloned()
            .ok_or_else(|| NotFoundError::Graph(graph_id.to_string()).into())
    }

    fn replace(&self, graph_id: &str, mut graph: Graph) -> Result<Graph, StoreError> {
        let mut graphs = self.graphs.write();
        let slot = graphs
            .iter_mut()
            .find(|g| g.id.as_deref() == Some(graph_id))
            .ok_or_else(|| NotFoundError::Graph(graph_id.to_string()))?;
        graph.id = Some(graph_id.to_string());
        *slot = graph.clone();
        Ok(graph)
    }

    fn delete(&self, graph_id: &str) -> Result<(), StoreError> {
        let mut graphs = self.graphs.write();
        let before = graphs.len();
        graphs.retain(|g| g.id.as_deref() != Some(graph_id));
        if graphs.len() == before {
            return Err(NotFoundError::Graph(graph_id.to_string()).into());
        }
        Ok(())
    }
}

/// An in-memory [`RunStore`]. Runs keep their insertion order.
#[derive(Default)]
pub struct MemoryRunStore {
    runs: RwLock<Vec<RunResult>>,
}

#[derive(Serialize, Deserialize)]
struct RunSnapshot {
    runs: Vec<RunResult>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.runs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.read().is_empty()
    }

    /// Saves every stored run to a bincode snapshot file.
    pub fn save_snapshot(&self, path: &str) -> Result<(), StoreError> {
        let runs = self.runs.read().clone();
        snapshot::save(&RunSnapshot { runs }, path)
    }

    /// Loads a store from a snapshot written by [`MemoryRunStore::save_snapshot`].
    pub fn from_file(path: &str) -> Result<Self, StoreError> {
        let loaded: RunSnapshot = snapshot::load(path)?;
        Ok(Self {
            runs: RwLock::new(loaded.runs),
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let runs = self.runs.read().clone();
        snapshot::to_bytes(&RunSnapshot { runs })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let loaded: RunSnapshot = snapshot::from_bytes(bytes)?;
        Ok(Self {
            runs: RwLock::new(loaded.runs),
        })
    }
}

impl RunStore for MemoryRunStore {
    fn find_by_config(&self, graph_id: &str, config: &RunConfig) -> Option<RunResult> {
        let fingerprint = config.fingerprint();
        self.runs
            .read()
            .iter()
            .find(|r| r.graph_id == graph_id && r.config_fingerprint == fingerprint)
            .cloned()
    }

    fn save(&self, run: RunResult) -> Result<RunResult, StoreError> {
        let mut runs = self.runs.write();
        if let Some(existing) = runs.iter().find(|r| {
            r.graph_id == run.graph_id && r.config_fingerprint == run.config_fingerprint
        }) {
            return Ok(existing.clone());
        }
        runs.push(run.clone());
        Ok(run)
    }

    fn find_by_run_id(&self, graph_id: &str, run_id: &str) -> Result<RunResult, StoreError> {
        self.runs
            .read()
            .iter()
            .find(|r| r.graph_id == graph_id && r.run_id == run_id)
            .cloned()
            .ok_or_else(|| {
                NotFoundError::Run {
                    graph_id: graph_id.to_string(),
                    run_id: run_id.to_string(),
                }
                .into()
            })
    }

    fn list_by_graph(&self, graph_id: &str) -> Vec<RunSummary> {
        self.runs
            .read()
            .iter()
            .filter(|r| r.graph_id == graph_id)
            .map(RunResult::summary)
            .collect()
    }

    fn purge_graph(&self, graph_id: &str) -> usize {
        let mut runs = self.runs.write();
        let before = runs.len();
        runs.retain(|r| r.graph_id != graph_id);
        before - runs.len()
    }
}
