use super::Engine;
use crate::executor::{ExecutorRegistry, NodeExecutor};
use crate::store::{GraphStore, RunStore};

pub struct EngineBuilder {
    graphs: Box<dyn GraphStore>,
    runs: Box<dyn RunStore>,
    executors: ExecutorRegistry,
}

impl EngineBuilder {
    pub fn new(graphs: impl GraphStore + 'static, runs: impl RunStore + 'static) -> Self {
        Self {
            graphs: Box::new(graphs),
            runs: Box::new(runs),
            executors: ExecutorRegistry::new(),
        }
    }

    /// Registers an executor for its own `node_type`.
    pub fn with_executor(mut self, executor: Box<dyn NodeExecutor>) -> Self {
        self.executors.register(executor);
        self
    }

    /// Routes a custom node type to a built-in executor such as `"passthrough"`.
    pub fn with_type_mapping(mut self, user_type_name: &str, builtin_name: &str) -> Self {
        self.executors.map_type(user_type_name, builtin_name);
        self
    }

    /// Replaces the executor used for nodes without a `node_type`.
    pub fn with_default_executor(mut self, executor: Box<dyn NodeExecutor>) -> Self {
        self.executors.set_default(executor);
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            graphs: self.graphs,
            runs: self.runs,
            executors: self.executors,
        }
    }
}
