use clap::{Parser, Subcommand};
use graphrun::prelude::*;
use graphrun::validation::{validate_graph, validate_run_config};
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Validate, analyse and run graph documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph JSON file
    graph_path: String,

    /// Optional path to a run configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the graph structure and, if given, the run configuration
    Validate,
    /// Print the execution order
    Toposort,
    /// Print the breadth-first levels
    Levels,
    /// Print the disconnected islands
    Islands,
    /// Execute the graph and print the run report
    Run {
        /// Print the run record as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let graph_json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            &cli.graph_path, e
        ))
    });
    let graph = Graph::from_json(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            serde_json::from_str::<RunConfig>(&json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to parse config JSON: {}", e))
            })
        }
        None => RunConfig::default(),
    };

    if let Command::Validate = cli.command {
        validate(&graph, &config);
        return;
    }

    let engine = Engine::in_memory();
    let graph_id = engine
        .create_graph(graph)
        .map(|stored| stored.id.unwrap_or_default())
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid graph: {}", e)));
    let selected = cli.config.as_ref().map(|_| &config);

    match cli.command {
        Command::Validate => {}
        Command::Toposort => {
            let order = engine
                .topological_sort(&graph_id, selected)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("{}", order.join(" -> "));
        }
        Command::Levels => {
            let levels = engine
                .level_wise(&graph_id, selected)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            for (depth, level) in levels.iter().enumerate() {
                println!("{}: {}", depth, level.join(", "));
            }
        }
        Command::Islands => {
            let islands = engine
                .islands(&graph_id, selected)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            for (n, island) in islands.iter().enumerate() {
                println!("island {}: {}", n + 1, island.join(", "));
            }
        }
        Command::Run { json } => {
            let start = Instant::now();
            let run = engine
                .run_graph(&graph_id, &config)
                .unwrap_or_else(|e| exit_with_error(&format!("Run failed: {}", e)));
            let duration = start.elapsed();

            if json {
                let rendered = serde_json::to_string_pretty(&run).unwrap_or_else(|e| {
                    exit_with_error(&format!("Failed to render run as JSON: {}", e))
                });
                println!("{}", rendered);
            } else {
                print!("{}", RunFormatter::format_run(&run));
                println!("\nExecuted {} nodes in {:?}", run.order.len(), duration);
            }
        }
    }
}

fn validate(graph: &Graph, config: &RunConfig) {
    if let Err(e) = validate_graph(graph) {
        exit_with_error(&format!("Invalid graph: {}", e));
    }
    println!("Graph is valid ({} nodes).", graph.nodes.len());

    if let Err(e) = validate_run_config(graph, config) {
        exit_with_error(&format!("Invalid run configuration: {}", e));
    }
    println!("Run configuration is valid.");
}

fn init_logging(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
