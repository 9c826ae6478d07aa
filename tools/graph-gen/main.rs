use clap::Parser;
use graphrun::error::ConversionError;
use graphrun::model::{Edge, Graph, IntoGraph, Node, Value};
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate random, valid graph documents for graphrun
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Number of levels below the single root
    #[arg(long, default_value_t = 4)]
    depth: usize,

    /// The minimum number of nodes per level
    #[arg(long, default_value_t = 1)]
    min: usize,

    /// The maximum number of nodes per level
    #[arg(long, default_value_t = 4)]
    max: usize,

    /// Node type assigned to every non-root node
    #[arg(long, default_value = "passthrough")]
    node_type: String,
}

/// A layered layout: every node of level n+1 has at least one parent on level n.
struct Layout {
    levels: Vec<Vec<String>>,
    /// `(parent, child, key)` triples; `key` is the output key the child receives.
    links: Vec<(String, String, String)>,
    node_type: String,
    values: Vec<(String, Value)>,
}

impl Layout {
    fn generate(rng: &mut ThreadRng, cli: &Cli) -> Self {
        let mut levels = vec![vec!["n0".to_string()]];
        let mut links = Vec::new();
        let mut counter = 1;

        for _ in 0..cli.depth {
            let width = rng.random_range(cli.min..=cli.max).max(1);
            let level: Vec<String> = (0..width)
                .map(|_| {
                    let id = format!("n{}", counter);
                    counter += 1;
                    id
                })
                .collect();

            let parents = &levels[levels.len() - 1];
            for (i, child) in level.iter().enumerate() {
                // one guaranteed parent keeps the graph connected, extra parents add fan-in
                let first = &parents[i % parents.len()];
                links.push((first.clone(), child.clone(), format!("from_{}", first)));
                for parent in parents {
                    if parent != first && rng.random_bool(0.25) {
                        links.push((parent.clone(), child.clone(), format!("from_{}", parent)));
                    }
                }
            }
            levels.push(level);
        }

        let values = levels
            .iter()
            .flatten()
            .map(|id| (id.clone(), Value::Integer(rng.random_range(0..1000))))
            .collect();

        Self {
            levels,
            links,
            node_type: cli.node_type.clone(),
            values,
        }
    }
}

impl IntoGraph for Layout {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        if self.levels.is_empty() {
            return Err(ConversionError::ValidationError(
                "layout has no levels".to_string(),
            ));
        }

        let root_id = &self.levels[0][0];
        let nodes = self
            .values
            .iter()
            .map(|(id, value)| {
                let mut node = Node::new(id.as_str()).with_output("value", value.clone());
                if id == root_id {
                    node = node.with_input("value", value.clone());
                } else {
                    node = node.with_type(self.node_type.as_str());
                }
                for (_, _, key) in self.links.iter().filter(|(_, child, _)| child == id) {
                    node = node.with_input(key.as_str(), value.clone());
                }
                node
            })
            .collect();

        let mut graph = Graph::new(nodes);
        for (parent, child, key) in &self.links {
            graph.connect(Edge::new(parent.as_str(), child.as_str()).with_key("value", key.as_str()));
        }
        Ok(graph)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating graph ({} levels, {} to {} nodes per level)...",
        cli.depth, cli.min, cli.max
    );

    let layout = Layout::generate(&mut rng, &cli);
    let graph = layout.into_graph()?;
    let edge_count: usize = graph.nodes.iter().map(|n| n.paths_out.len()).sum();

    let json_output = serde_json::to_string_pretty(&graph)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} nodes and {} edges into '{}'",
        graph.nodes.len(),
        edge_count,
        cli.output
    );

    Ok(())
}
