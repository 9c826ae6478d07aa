use crate::analysis::{find_islands, level_wise};
use crate::configurator::apply_run_config;
use crate::error::{EngineError, NotFoundError};
use crate::executor::ExecutorRegistry;
use crate::graph::ExecutionGraph;
use crate::model::{Graph, RunConfig, RunResult, RunSummary, Slots};
use crate::scheduler::topological_order;
use crate::store::{GraphStore, MemoryGraphStore, MemoryRunStore, RunStore};
use crate::validation::{validate_graph, validate_run_config};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{info, warn};
use uuid::Uuid;

mod builder;
mod run;

pub use builder::EngineBuilder;
pub use run::{Execution, execute_graph};

/// The graph execution engine.
///
/// Ties validation, configuration, scheduling and execution to a graph store and
/// a run store. Every method is synchronous; a run either completes and is stored,
/// or fails and leaves no trace in the run store.
pub struct Engine {
    graphs: Box<dyn GraphStore>,
    runs: Box<dyn RunStore>,
    executors: ExecutorRegistry,
}

impl Engine {
    pub fn builder(
        graphs: impl GraphStore + 'static,
        runs: impl RunStore + 'static,
    ) -> EngineBuilder {
        EngineBuilder::new(graphs, runs)
    }

    /// An engine over empty in-memory stores with the built-in executors.
    pub fn in_memory() -> Self {
        Self::builder(MemoryGraphStore::new(), MemoryRunStore::new()).build()
    }

    /// Validates and stores a graph. A structurally identical stored graph is
    /// returned as is.
    pub fn create_graph(&self, graph: Graph) -> Result<Graph, EngineError> {
        if let Err(e) = validate_graph(&graph) {
            warn!(error = %e, "rejected graph");
            return Err(e.into());
        }
        let stored = self.graphs.create(graph)?;
        info!(
            graph_id = stored.id.as_deref().unwrap_or_default(),
            nodes = stored.nodes.len(),
            "stored graph"
        );
        Ok(stored)
    }

    pub fn get_graph(&self, graph_id: &str) -> Result<Graph, EngineError> {
        Ok(self.graphs.get(graph_id)?)
    }

    /// Validates `graph` and stores it in place of `graph_id`. Runs recorded
    /// against the previous version are discarded so they cannot be replayed.
    pub fn update_graph(&self, graph_id: &str, graph: Graph) -> Result<Graph, EngineError> {
        if let Err(e) = validate_graph(&graph) {
            warn!(graph_id, error = %e, "rejected graph update");
            return Err(e.into());
        }
        let stored = self.graphs.replace(graph_id, graph)?;
        let purged = self.runs.purge_graph(graph_id);
        info!(graph_id, purged_runs = purged, "replaced graph");
        Ok(stored)
    }

    pub fn delete_graph(&self, graph_id: &str) -> Result<(), EngineError> {
        self.graphs.delete(graph_id)?;
        let purged = self.runs.purge_graph(graph_id);
        info!(graph_id, purged_runs = purged, "deleted graph");
        Ok(())
    }

    /// Runs a stored graph under `config`.
    ///
    /// If this graph already ran with an equivalent configuration, the stored
    /// result is returned and nothing is executed.
    pub fn run_graph(&self, graph_id: &str, config: &RunConfig) -> Result<RunResult, EngineError> {
        let graph = self.graphs.get(graph_id)?;
        if let Err(e) = validate_run_config(&graph, config) {
            warn!(graph_id, error = %e, "rejected run config");
            return Err(e.into());
        }

        if let Some(existing) = self.runs.find_by_config(graph_id, config) {
            info!(graph_id, run_id = %existing.run_id, "replaying stored run");
            return Ok(existing);
        }

        let mut configured = self.configure(&graph, config)?;
        info!(graph_id, nodes = configured.len(), "starting run");
        let execution = execute_graph(&mut configured, config, &self.executors)?;

        let record = RunResult {
            run_id: Uuid::new_v4().to_string(),
            graph_id: graph_id.to_string(),
            config: config.clone(),
            config_fingerprint: config.fingerprint(),
            created_at: Utc::now(),
            order: execution.order,
            inputs: execution.inputs,
            outputs: execution.outputs,
            provenance: execution.provenance,
            leaf_outputs: execution.leaf_outputs,
        };
        let stored = self.runs.save(record)?;
        info!(graph_id, run_id = %stored.run_id, "run completed");
        Ok(stored)
    }

    pub fn get_run(&self, graph_id: &str, run_id: &str) -> Result<RunResult, EngineError> {
        Ok(self.runs.find_by_run_id(graph_id, run_id)?)
    }

    /// All node outputs of a run.
    pub fn run_outputs(
        &self,
        graph_id: &str,
        run_id: &str,
    ) -> Result<BTreeMap<String, Slots>, EngineError> {
        Ok(self.get_run(graph_id, run_id)?.outputs)
    }

    /// Outputs of the nodes that were leaves in the run's configured graph.
    pub fn leaf_outputs(
        &self,
        graph_id: &str,
        run_id: &str,
    ) -> Result<BTreeMap<String, Slots>, EngineError> {
        Ok(self.get_run(graph_id, run_id)?.leaf_outputs)
    }

    pub fn node_output(
        &self,
        graph_id: &str,
        run_id: &str,
        node_id: &str,
    ) -> Result<Slots, EngineError> {
        let run = self.get_run(graph_id, run_id)?;
        run.node_output(node_id).cloned().ok_or_else(|| {
            NotFoundError::NodeOutput {
                run_id: run_id.to_string(),
                node_id: node_id.to_string(),
            }
            .into()
        })
    }

    pub fn list_runs(&self, graph_id: &str) -> Vec<RunSummary> {
        self.runs.list_by_graph(graph_id)
    }

    /// Execution order of the stored graph, or of its configured form when a
    /// config is given.
    pub fn topological_sort(
        &self,
        graph_id: &str,
        config: Option<&RunConfig>,
    ) -> Result<Vec<String>, EngineError> {
        let graph = self.analysis_graph(graph_id, config)?;
        Ok(topological_order(&graph)?)
    }

    pub fn level_wise(
        &self,
        graph_id: &str,
        config: Option<&RunConfig>,
    ) -> Result<Vec<Vec<String>>, EngineError> {
        let graph = self.analysis_graph(graph_id, config)?;
        Ok(level_wise(&graph))
    }

    pub fn islands(
        &self,
        graph_id: &str,
        config: Option<&RunConfig>,
    ) -> Result<Vec<Vec<String>>, EngineError> {
        let graph = self.analysis_graph(graph_id, config)?;
        Ok(find_islands(&graph))
    }

    pub fn has_islands(
        &self,
        graph_id: &str,
        config: Option<&RunConfig>,
    ) -> Result<bool, EngineError> {
        Ok(self.islands(graph_id, config)?.len() > 1)
    }

    fn analysis_graph(
        &self,
        graph_id: &str,
        config: Option<&RunConfig>,
    ) -> Result<ExecutionGraph, EngineError> {
        let graph = self.graphs.get(graph_id)?;
        match config {
            Some(config) => {
                validate_run_config(&graph, config)?;
                self.configure(&graph, config)
            }
            None => Ok(ExecutionGraph::from_graph(&graph)?),
        }
    }

    fn configure(&self, graph: &Graph, config: &RunConfig) -> Result<ExecutionGraph, EngineError> {
        let base = ExecutionGraph::from_graph(graph)?;
        Ok(apply_run_config(&base, config)?)
    }
}
