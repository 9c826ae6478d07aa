//! Gatekeeping checks run before a graph is stored or a run is configured.

mod run_config;
mod structure;

pub use run_config::validate_run_config;
pub(crate) use run_config::check_node_selection;
pub use structure::validate_graph;
