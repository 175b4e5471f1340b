use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use halo_color::{
    color_graph_with_stats,
    graph::{generate, read_egr, read_snap, write_egr, write_snap},
    greedy_coloring, ColoringConfig, ColoringReport, CsrGraph,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "halo-color")]
#[command(about = "Parallel graph coloring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color a graph with the parallel engine
    Color {
        /// Input graph
        input: PathBuf,

        /// Read a SNAP edge list instead of .egr
        #[arg(long, default_value_t = false)]
        snap: bool,

        /// Worker threads (overrides the config file)
        #[arg(long)]
        threads: Option<usize>,

        /// JSON run configuration, e.g. {"threads": 8}
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Color a graph with sequential first-fit in id order
    Greedy {
        /// Input graph
        input: PathBuf,

        /// Read a SNAP edge list instead of .egr
        #[arg(long, default_value_t = false)]
        snap: bool,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write a uniformly random undirected graph
    Generate {
        /// Output file
        output: PathBuf,

        /// Vertex count
        #[arg(long)]
        nodes: usize,

        /// Undirected edge count
        #[arg(long)]
        edges: usize,

        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Write a SNAP edge list instead of .egr
        #[arg(long, default_value_t = false)]
        snap: bool,
    },
    /// Convert a SNAP edge list to .egr
    Convert {
        /// SNAP text input
        input: PathBuf,

        /// .egr output
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Color {
            input,
            snap,
            threads,
            config,
            json,
        } => {
            let graph = load(&input, snap)?;
            let mut config: ColoringConfig = match config {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read config {}", path.display()))?;
                    serde_json::from_str(&text)
                        .with_context(|| format!("Invalid config {}", path.display()))?
                }
                None => ColoringConfig::default(),
            };
            if let Some(threads) = threads {
                config.threads = threads;
            }

            let start = Instant::now();
            let (coloring, stats) =
                color_graph_with_stats(&graph, &config).context("Coloring failed")?;
            let runtime = start.elapsed();
            coloring.verify(&graph).context("Result verification failed")?;
            info!("result verification passed");

            let report = ColoringReport::new(&graph, &coloring, runtime)
                .with_threads(config.threads)
                .with_phases(stats);
            emit(&input, &report, json)?;
        }
        Commands::Greedy { input, snap, json } => {
            let graph = load(&input, snap)?;
            let start = Instant::now();
            let coloring = greedy_coloring(&graph);
            let runtime = start.elapsed();
            coloring.verify(&graph).context("Result verification failed")?;
            emit(&input, &ColoringReport::new(&graph, &coloring, runtime), json)?;
        }
        Commands::Generate {
            output,
            nodes,
            edges,
            seed,
            snap,
        } => {
            let graph = generate::random(nodes, edges, seed).context("Failed to generate graph")?;
            if snap {
                let file = fs::File::create(&output)
                    .with_context(|| format!("Failed to create {}", output.display()))?;
                write_snap(&graph, std::io::BufWriter::new(file))?;
            } else {
                write_egr(&graph, &output)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
            }
            println!(
                "Wrote {} nodes and {} edges to {}",
                graph.node_count(),
                graph.edge_count() / 2,
                output.display()
            );
        }
        Commands::Convert { input, output } => {
            let start = Instant::now();
            let graph = load(&input, true)?;
            write_egr(&graph, &output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("{}\t#name", input.display());
            println!("{}\t#nodes", graph.node_count());
            println!("{}\t#edges", graph.edge_count());
            println!("no\t#weights");
            println!("Converted in {:.2?}", start.elapsed());
        }
    }

    Ok(())
}

fn load(path: &Path, snap: bool) -> Result<CsrGraph> {
    let graph = if snap { read_snap(path) } else { read_egr(path) };
    graph.with_context(|| format!("Failed to read {}", path.display()))
}

fn emit(input: &Path, report: &ColoringReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("input: {}", input.display());
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greedy_input_can_be_a_snap_edge_list() {
        let path = std::env::temp_dir().join(format!("halo-color-cli-{}.txt", std::process::id()));
        fs::write(&path, "# Nodes: 3 Edges: 4\n0 1\n1 0\n1 2\n2 1\n").unwrap();

        let graph = load(&path, true).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(greedy_coloring(&graph).colors(), &[0, 1, 0]);
        assert!(load(&path, false).is_err());
        fs::remove_file(&path).unwrap();
    }
}
