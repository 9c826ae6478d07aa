use super::definition::Graph;
use crate::error::ConversionError;

/// A trait for custom data models that can be converted into a graphrun [`Graph`].
///
/// Implement it on your own document structs to feed graphs authored in another
/// format (a UI export, a YAML pipeline, a generator) into the engine. The
/// conversion only has to produce the document; structural validation happens
/// when the graph is created through the [`Engine`](crate::engine::Engine).
///
/// # Example
///
/// ```rust,no_run
/// use graphrun::error::ConversionError;
/// use graphrun::model::{Edge, Graph, IntoGraph, Node};
///
/// struct Pipeline {
///     steps: Vec<String>,
/// }
///
/// impl IntoGraph for Pipeline {
///     fn into_graph(self) -> Result<Graph, ConversionError> {
///         if self.steps.is_empty() {
///             return Err(ConversionError::ValidationError("empty pipeline".to_string()));
///         }
///         let mut graph = Graph::new(
///             self.steps
///                 .iter()
///                 .map(|s| Node::new(s.as_str()).with_input("x", 0).with_output("x", 0))
///                 .collect(),
///         );
///         for pair in self.steps.windows(2) {
///             graph.connect(Edge::new(pair[0].as_str(), pair[1].as_str()).with_key("x", "x"));
///         }
///         Ok(graph)
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a graph document.
    fn into_graph(self) -> Result<Graph, ConversionError>;
}
