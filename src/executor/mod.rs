use crate::error::ExecutionError;
use crate::graph::ExecNode;
use crate::model::Slots;
use ahash::AHashMap;

mod builtin;

pub use builtin::{ECHO, EchoExecutor, PASSTHROUGH, PassThroughExecutor};

/// Defines the contract for computing a node's outputs from its resolved inputs.
///
/// Executors are selected by the node's `node_type`; nodes without one run the
/// registry's default executor.
pub trait NodeExecutor: Send + Sync {
    fn node_type(&self) -> &str;
    fn execute(&self, node: &ExecNode, inputs: &Slots) -> Result<Slots, ExecutionError>;
}

/// Creates a built-in executor by its type name.
pub fn create_executor_by_name(name: &str) -> Option<Box<dyn NodeExecutor>> {
    match name {
        ECHO => Some(Box::new(EchoExecutor)),
        PASSTHROUGH => Some(Box::new(PassThroughExecutor)),
        _ => None,
    }
}

/// Executors keyed by node type.
pub struct ExecutorRegistry {
    executors: AHashMap<String, Box<dyn NodeExecutor>>,
    default_executor: Box<dyn NodeExecutor>,
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutorRegistry {
    /// A registry with the built-in executors, defaulting to `echo`.
    pub fn new() -> Self {
        let mut registry = Self {
            executors: AHashMap::new(),
            default_executor: Box::new(EchoExecutor),
        };
        registry.register(Box::new(EchoExecutor));
        registry.register(Box::new(PassThroughExecutor));
        registry
    }

    pub fn register(&mut self, executor: Box<dyn NodeExecutor>) {
        self.executors
            .insert(executor.node_type().to_string(), executor);
    }

    /// Routes a custom node type to one of the built-in executors.
    /// Unknown built-in names are ignored.
    pub fn map_type(&mut self, user_type_name: &str, builtin_name: &str) {
        if let Some(executor) = create_executor_by_name(builtin_name) {
            self.executors.insert(user_type_name.to_string(), executor);
        }
    }

    pub fn set_default(&mut self, executor: Box<dyn NodeExecutor>) {
        self.default_executor = executor;
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.executors.contains_key(node_type)
    }

    fn executor_for(&self, node: &ExecNode) -> Result<&dyn NodeExecutor, ExecutionError> {
        match &node.node_type {
            None => Ok(self.default_executor.as_ref()),
            Some(type_name) => self
                .executors
                .get(type_name)
                .map(Box::as_ref)
                .ok_or_else(|| ExecutionError::UnknownNodeType {
                    node_id: node.id.clone(),
                    type_name: type_name.clone(),
                }),
        }
    }

    /// Runs the node's executor and records the result on the node itself: the
    /// resolved inputs are merged into `data_in` and `data_out` is replaced by the
    /// produced outputs.
    pub fn execute(&self, node: &mut ExecNode, inputs: &Slots) -> Result<Slots, ExecutionError> {
        let outputs = self.executor_for(node)?.execute(node, inputs)?;
        node.data_in
            .extend(inputs.iter().map(|(k, v)| (k.clone(), v.clone())));
        node.data_out = outputs.clone();
        Ok(outputs)
    }
}
