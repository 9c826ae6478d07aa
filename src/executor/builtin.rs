use super::NodeExecutor;
use crate::error::ExecutionError;
use crate::graph::ExecNode;
use crate::model::Slots;

pub const ECHO: &str = "echo";
pub const PASSTHROUGH: &str = "passthrough";

/// Emits the node's declared `data_out` unchanged; inputs only drive scheduling.
pub struct EchoExecutor;

impl NodeExecutor for EchoExecutor {
    fn node_type(&self) -> &str {
        ECHO
    }

    fn execute(&self, node: &ExecNode, _inputs: &Slots) -> Result<Slots, ExecutionError> {
        Ok(node.data_out.clone())
    }
}

/// Emits the declared `data_out`, replacing every slot that has a same-named
/// resolved input with that input's value.
pub struct PassThroughExecutor;

impl NodeExecutor for PassThroughExecutor {
    fn node_type(&self) -> &str {
        PASSTHROUGH
    }

    fn execute(&self, node: &ExecNode, inputs: &Slots) -> Result<Slots, ExecutionError> {
        let mut outputs = node.data_out.clone();
        for (key, slot) in outputs.iter_mut() {
            if let Some(value) = inputs.get(key) {
                *slot = value.clone();
            }
        }
        Ok(outputs)
    }
}
