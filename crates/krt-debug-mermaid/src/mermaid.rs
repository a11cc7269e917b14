//! Mermaid flowchart utilities.

use std::fmt::Write;

use crate::options::Direction;

/// Node bracket forms used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `id["name"]`
    Box,
    /// `id[["name"]]`, the subroutine shape
    Subroutine,
}

impl Shape {
    fn brackets(self) -> (&'static str, &'static str) {
        match self {
            Shape::Box => ("[", "]"),
            Shape::Subroutine => ("[[", "]]"),
        }
    }
}

/// Quote a name for use inside a node label.
///
/// Quotes and backslashes are escaped; other diagram-reserved characters are
/// passed through untouched.
pub fn quote_label(name: &str) -> String {
    format!("{name:?}")
}

/// A flowchart builder for constructing Mermaid output line by line.
pub struct MermaidBuilder {
    output: String,
}

impl MermaidBuilder {
    /// Start a flowchart with the given direction.
    pub fn new(direction: Direction) -> Self {
        let mut output = String::with_capacity(1024);
        let _ = writeln!(output, "flowchart {}", direction.as_str());
        Self { output }
    }

    /// Add a solid edge.
    pub fn edge(&mut self, from: &str, to: &str) -> &mut Self {
        let _ = writeln!(self.output, "  {from}-->{to}");
        self
    }

    /// Add a dotted edge.
    pub fn dotted_edge(&mut self, from: &str, to: &str) -> &mut Self {
        let _ = writeln!(self.output, "  {from}-.->{to}");
        self
    }

    /// Declare a node with a quoted display name.
    pub fn node(&mut self, id: &str, name: &str, shape: Shape) -> &mut Self {
        let (open, close) = shape.brackets();
        let _ = writeln!(self.output, "  {id}{open}{}{close}", quote_label(name));
        self
    }

    /// Finish building and return the flowchart text.
    pub fn build(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_emits_lines_in_call_order() {
        let mut builder = MermaidBuilder::new(Direction::LeftRight);
        builder
            .edge("node1", "node2")
            .dotted_edge("node1", "node3")
            .node("node1", "A", Shape::Subroutine)
            .node("node2", "Base", Shape::Box);

        assert_eq!(
            builder.build(),
            "flowchart LR\n  node1-->node2\n  node1-.->node3\n  node1[[\"A\"]]\n  node2[\"Base\"]\n"
        );
    }

    #[test]
    fn header_follows_direction() {
        assert_eq!(MermaidBuilder::new(Direction::TopDown).build(), "flowchart TD\n");
    }

    #[test]
    fn labels_escape_quotes_only() {
        assert_eq!(quote_label("plain"), "\"plain\"");
        assert_eq!(quote_label("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_label("a[b]-->c"), "\"a[b]-->c\"");
    }
}
