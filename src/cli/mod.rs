//! CLI commands for topolevel.

mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::GraphConfig;
use crate::edgelist::EdgeList;
use crate::error::Result;
use crate::generate::{generate, GeneratorOptions};
use crate::runner::{self, RunOptions};

#[derive(Parser)]
#[command(name = "topolevel")]
#[command(about = "Incremental topological ordering with cycle detection")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert the edges of an edge-list file and report the outcome
    Run {
        /// Edge-list file ("n m" header, then "from to" lines)
        file: PathBuf,
        /// Restore the graph when an insertion is rejected
        #[arg(long, env = "TOPOLEVEL_ROLLBACK")]
        rollback: bool,
        /// Number of full replays to average timings over
        #[arg(long, default_value_t = 1)]
        repeat: usize,
        /// Insertions per timed block
        #[arg(long, default_value_t = 100)]
        resolution: usize,
        /// Cross-check decisions and final order against a static sort
        #[arg(long)]
        verify: bool,
        /// Print the final order
        #[arg(long)]
        topology: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a random acyclic edge list
    Generate {
        /// Number of vertices
        #[arg(short = 'n', long)]
        vertices: usize,
        /// Chance that each round draws an edge
        #[arg(short = 'p', long)]
        probability: f64,
        /// Number of rounds (defaults to the vertex count)
        #[arg(long)]
        rounds: Option<usize>,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Replay an edge list with rollback and verify it against a static sort
    Check {
        /// Edge-list file
        file: PathBuf,
    },
}

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    execute(cli.command)
}

pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            file,
            rollback,
            repeat,
            resolution,
            verify,
            topology,
            json,
        } => {
            let options = RunOptions {
                config: GraphConfig::new().with_rollback(rollback),
                repeat,
                resolution,
                verify,
                keep_topology: topology,
            };
            cmd_run(&file, &options, json)
        }
        Commands::Generate {
            vertices,
            probability,
            rounds,
            seed,
            output,
        } => {
            let mut options = GeneratorOptions::new(vertices, probability).with_seed(seed);
            options.rounds = rounds;
            cmd_generate(options, output)
        }
        Commands::Check { file } => cmd_check(&file),
    }
}

fn cmd_run(file: &Path, options: &RunOptions, json: bool) -> Result<()> {
    let list = EdgeList::read_from(file)?;
    let report = runner::run(&list, options)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::print_report(&report);
    }
    Ok(())
}

fn cmd_generate(options: GeneratorOptions, output: Option<PathBuf>) -> Result<()> {
    let generated = generate(options)?;
    match output {
        Some(path) => {
            generated.graph.write_to(&path)?;
            println!(
                "Wrote {} edges ({} rejected) to {}",
                generated.graph.len(),
                generated.rejected,
                path.display()
            );
        }
        None => print!("{}", generated.graph),
    }
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let list = EdgeList::read_from(file)?;
    runner::cross_check(&list, GraphConfig::new().with_rollback(true))?;
    println!("ok: {} vertices, {} edges", list.vertices, list.len());
    Ok(())
}
