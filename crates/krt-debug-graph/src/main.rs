use std::path::PathBuf;

use clap::Parser;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use krt_debug_core::{Error, Result};
use krt_debug_graph::{GraphToolOptions, run_main};
use krt_debug_mermaid::Direction;

#[derive(Parser, Debug)]
#[command(
    name = "krt-debug-graph",
    about = "Render a collection registry dump as a Mermaid flowchart",
    version
)]
pub struct Cli {
    /// JSON file containing a dumped registry state
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Flowchart direction: LR, TD, BT or RL
    #[arg(long, value_name = "DIR", default_value = "LR")]
    direction: Direction,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

pub fn run(args: Cli) -> Result<()> {
    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = GraphToolOptions {
        file: args.file,
        output: args.output,
        direction: args.direction,
    };

    let diagram = run_main(&opts)?;

    if let Some(ref path) = opts.output {
        std::fs::write(path, &diagram).map_err(|err| {
            Error::from(err)
                .with_operation("graph::write_output")
                .with_context("path", path.display().to_string())
        })?;
        tracing::info!(path = %path.display(), "output written");
    } else {
        println!("{diagram}");
    }

    Ok(())
}

pub fn main() {
    let args = Cli::parse();
    if let Err(err) = run(args) {
        tracing::error!(error = %err, "execution failed");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
