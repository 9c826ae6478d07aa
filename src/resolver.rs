use crate::graph::ExecutionGraph;
use crate::model::{OVERWRITE_SOURCE, ROOT_INPUT_SOURCE, RunConfig, Slots};
use std::collections::BTreeMap;

/// The effective inputs of one node and where each of them came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub inputs: Slots,
    /// Input key -> `"src -> dst (skey -> dkey)"`, `"root_input"` or `"data_overwrite"`.
    pub provenance: BTreeMap<String, String>,
}

/// Resolves the inputs of `node_id` from the outputs produced so far.
///
/// Every incoming edge contributes each mapped key whose source output already
/// exists. When several edges feed the same input key, the edge whose source node
/// id sorts lexicographically first wins, independent of edge order; between edges
/// from the same source the first listed one is kept. Root inputs and then data
/// overwrites from `config` are applied last and always take precedence.
pub fn resolve(
    graph: &ExecutionGraph,
    node_id: &str,
    produced: &BTreeMap<String, Slots>,
    config: &RunConfig,
) -> Resolution {
    let mut inputs = Slots::new();
    // input key -> (winning source id, descriptor)
    let mut winners: BTreeMap<String, (&str, String)> = BTreeMap::new();

    for edge in graph.incoming(node_id) {
        let Some(source_outputs) = produced.get(&edge.source) else {
            continue;
        };
        for (source_key, target_key) in &edge.key_map {
            let Some(value) = source_outputs.get(source_key) else {
                continue;
            };
            let wins = winners
                .get(target_key)
                .is_none_or(|(current, _)| edge.source.as_str() < *current);
            if wins {
                inputs.insert(target_key.clone(), value.clone());
                winners.insert(
                    target_key.clone(),
                    (edge.source.as_str(), edge.describe(source_key, target_key)),
                );
            }
        }
    }

    let mut provenance: BTreeMap<String, String> = winners
        .into_iter()
        .map(|(key, (_, descriptor))| (key, descriptor))
        .collect();

    for (slots, origin) in [
        (config.root_inputs.get(node_id), ROOT_INPUT_SOURCE),
        (config.data_overwrites.get(node_id), OVERWRITE_SOURCE),
    ] {
        for (key, value) in slots.into_iter().flatten() {
            inputs.insert(key.clone(), value.clone());
            provenance.insert(key.clone(), origin.to_string());
        }
    }

    Resolution { inputs, provenance }
}
