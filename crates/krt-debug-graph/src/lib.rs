//! Render a saved collection dump as a Mermaid flowchart.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use krt_debug_core::{DumpedState, Error, Result};
use krt_debug_mermaid::{Direction, RenderOptions, render_mermaid_with_options};

/// Options for running the graph tool.
#[derive(Debug, Clone, Default)]
pub struct GraphToolOptions {
    /// JSON file holding a dumped state
    pub file: Option<PathBuf>,
    /// Write the diagram here instead of returning it for stdout
    pub output: Option<PathBuf>,
    pub direction: Direction,
}

/// Read and decode a dumped state from `path`.
pub fn read_dump(path: &Path) -> Result<DumpedState> {
    let bytes = std::fs::read(path).map_err(|err| {
        Error::from(err)
            .with_operation("graph::read_dump")
            .with_context("path", path.display().to_string())
    })?;
    DumpedState::from_json(&bytes).map_err(|err| {
        err.with_operation("graph::read_dump")
            .with_context("path", path.display().to_string())
    })
}

/// Main entry point: decode the dump named in `opts` and render it.
pub fn run_main(opts: &GraphToolOptions) -> Result<String> {
    let path = opts
        .file
        .as_deref()
        .ok_or_else(|| Error::missing_input("dump file path").with_operation("graph::run_main"))?;

    let start = Instant::now();
    let state = read_dump(path)?;
    info!(collections = state.len(), path = %path.display(), "decoded dump");

    let options = RenderOptions {
        direction: opts.direction,
    };
    let diagram = render_mermaid_with_options(&state, &options);
    info!("Graph rendering: {:.3}s", start.elapsed().as_secs_f64());

    Ok(diagram)
}
