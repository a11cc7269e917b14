//! Mermaid rendering of collection dependency graphs.
//!
//! A [`DumpedState`] is turned into a [`DependencyGraph`] (deduplicated nodes,
//! solid primary edges, dotted secondary edges) and then into flowchart text.
//!
//! # Module Structure
//!
//! - [`graph`]: graph construction from a dumped state
//! - [`mermaid`]: flowchart text builder
//! - [`options`]: rendering options

pub mod graph;
pub mod mermaid;
pub mod options;

use krt_debug_core::{DumpedState, Registry};

pub use graph::{DependencyGraph, Node, NodeId, NodeKind};
pub use mermaid::{MermaidBuilder, Shape};
pub use options::{Direction, RenderOptions};

// ============================================================================
// Public API
// ============================================================================

/// Render a dumped state as a left-to-right Mermaid flowchart.
///
/// An empty (or fully skipped) state renders as the header line alone.
pub fn render_mermaid(state: &DumpedState) -> String {
    render_mermaid_with_options(state, &RenderOptions::default())
}

/// Render a dumped state with custom options.
pub fn render_mermaid_with_options(state: &DumpedState, options: &RenderOptions) -> String {
    DependencyGraph::build(state).render(options)
}

/// Dump a live registry and render it.
pub fn render_registry(registry: &Registry) -> String {
    render_mermaid(&registry.dump())
}
