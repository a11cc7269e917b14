//! Rendering options.

use strum_macros::{Display, EnumString, IntoStaticStr};

/// Flow direction written into the flowchart header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr)]
pub enum Direction {
    /// Left to right (default)
    #[default]
    #[strum(to_string = "LR", serialize = "lr")]
    LeftRight,
    /// Top to bottom
    #[strum(to_string = "TD", serialize = "td", serialize = "TB", serialize = "tb")]
    TopDown,
    /// Bottom to top
    #[strum(to_string = "BT", serialize = "bt")]
    BottomUp,
    /// Right to left
    #[strum(to_string = "RL", serialize = "rl")]
    RightLeft,
}

impl Direction {
    /// Mermaid keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Options for diagram rendering.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub direction: Direction,
}
