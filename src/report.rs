use crate::model::{RunResult, Slots, Value};
use itertools::Itertools;

/// Formats run records into human-readable text
pub struct RunFormatter;

impl RunFormatter {
    /// Format a whole run: header, then one block per node in execution order.
    pub fn format_run(run: &RunResult) -> String {
        let mut result = format!(
            "Run {} of graph {} ({})\n",
            run.run_id,
            run.graph_id,
            run.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        result.push_str(&format!("Order: {}\n", run.order.join(" -> ")));

        for node_id in &run.order {
            result.push_str(&Self::format_node(run, node_id));
        }

        if !run.leaf_outputs.is_empty() {
            result.push_str("Leaf outputs:\n");
            for (node_id, outputs) in &run.leaf_outputs {
                result.push_str(&format!("  {}: {}\n", node_id, Self::format_slots(outputs)));
            }
        }
        result
    }

    /// Format the inputs, their provenance and the outputs of a single node.
    pub fn format_node(run: &RunResult, node_id: &str) -> String {
        let mut result = format!("[{}]\n", node_id);

        let inputs = run.inputs.get(node_id);
        let provenance = run.provenance.get(node_id);
        for (key, value) in inputs.into_iter().flatten() {
            let origin = provenance
                .and_then(|p| p.get(key))
                .map(String::as_str)
                .unwrap_or("declared");
            result.push_str(&format!(
                "  in  {} = {} (from {})\n",
                key,
                Self::format_value(value),
                origin
            ));
        }
        for (key, value) in run.outputs.get(node_id).into_iter().flatten() {
            result.push_str(&format!("  out {} = {}\n", key, Self::format_value(value)));
        }
        result
    }

    fn format_slots(slots: &Slots) -> String {
        let body = slots
            .iter()
            .map(|(k, v)| format!("{}: {}", k, Self::format_value(v)))
            .join(", ");
        format!("{{{}}}", body)
    }

    /// Format a value for display. Text is quoted so it cannot be mistaken for a number.
    fn format_value(value: &Value) -> String {
        value.to_string()
    }
}
