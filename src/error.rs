use crate::model::ValueKind;
use std::fmt;
use thiserror::Error;

/// Errors raised while proving that a graph is a valid, executable DAG.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructuralError {
    #[error("Node id '{0}' appears more than once in the graph")]
    DuplicateNodeId(String),

    #[error(
        "Edge '{source_node_id}' -> '{target_node_id}' references node '{missing_node_id}', which is not part of the graph"
    )]
    DanglingReference {
        source_node_id: String,
        target_node_id: String,
        missing_node_id: String,
    },

    #[error("Edge '{source_node_id}' -> '{target_node_id}' is not mirrored: {message}")]
    AsymmetricEdge {
        source_node_id: String,
        target_node_id: String,
        message: String,
    },

    #[error(
        "Duplicate edge detected between '{source_node_id}' and '{target_node_id}' with the same key mapping"
    )]
    DuplicateEdge {
        source_node_id: String,
        target_node_id: String,
    },

    #[error(
        "Edge '{source_node_id}' -> '{target_node_id}' maps more than one source key onto input '{target_key}'"
    )]
    NonUniqueKeyMapping {
        source_node_id: String,
        target_node_id: String,
        target_key: String,
    },

    #[error(
        "Graph contains a cycle or an unreachable node: ordered {ordered} of {total} nodes (left over: {unordered:?})"
    )]
    CycleOrIsland {
        ordered: usize,
        total: usize,
        unordered: Vec<String>,
    },

    #[error("Graph is split into {count} disconnected islands")]
    DisconnectedGraph { count: usize },

    #[error(
        "Data mismatch on edge '{source_node_id}.{source_key}' -> '{target_node_id}.{target_key}': {detail}"
    )]
    TypeMismatch {
        source_node_id: String,
        source_key: String,
        target_node_id: String,
        target_key: String,
        detail: MismatchDetail,
    },
}

/// Why an edge's key mapping is incompatible with the slots on either end.
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchDetail {
    MissingOutput,
    MissingInput,
    Kinds { output: ValueKind, input: ValueKind },
}

impl fmt::Display for MismatchDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchDetail::MissingOutput => write!(f, "source key not found in data_out"),
            MismatchDetail::MissingInput => write!(f, "target key not found in data_in"),
            MismatchDetail::Kinds { output, input } => {
                write!(f, "{} output cannot feed {} input", output, input)
            }
        }
    }
}

/// Errors raised while checking a run configuration against a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid node selection: {0}")]
    InvalidNodeSelection(String),

    #[error("Invalid root input for node '{node_id}': {message}")]
    InvalidRootInput { node_id: String, message: String },

    #[error("Invalid data overwrite for node '{node_id}': {message}")]
    InvalidOverwrite { node_id: String, message: String },
}

/// A graph, run or node output that does not exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotFoundError {
    #[error("Graph '{0}' not found")]
    Graph(String),

    #[error("Run '{run_id}' not found for graph '{graph_id}'")]
    Run { graph_id: String, run_id: String },

    #[error("Node output for '{node_id}' not found in run '{run_id}'")]
    NodeOutput { run_id: String, node_id: String },
}

/// Unexpected failures while scheduling, resolving or executing a configured graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Scheduling failed: {0}")]
    Scheduling(StructuralError),

    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{0}' disappeared from the configured graph during execution")]
    MissingNode(String),

    #[error("Executor failed on node '{node_id}': {message}")]
    Executor { node_id: String, message: String },
}

/// Errors reported by graph and run stores.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

/// Umbrella error returned by the [`Engine`](crate::engine::Engine) facade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    NotFound(NotFoundError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<NotFoundError> for EngineError {
    fn from(err: NotFoundError) -> Self {
        EngineError::NotFound(err)
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(missing) => EngineError::NotFound(missing),
            other => EngineError::Store(other),
        }
    }
}

/// Errors that can occur when converting a foreign graph format into a [`Graph`](crate::model::Graph).
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Invalid custom graph data: {0}")]
    ValidationError(String),
}
