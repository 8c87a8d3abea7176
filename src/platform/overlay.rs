//! Inline styling for the debug overlay
//!
//! The overlay container is fixed over the viewport, so every rectangle is
//! absolutely positioned in screen space and never intercepts clicks. Colors
//! are set inline; the host page doesn't need a stylesheet for them.

use crate::sim::DebugKind;

/// Fixed style for one kind of overlay rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub class: &'static str,
    pub background: &'static str,
    pub border_radius: &'static str,
}

impl OverlayStyle {
    pub fn for_kind(kind: DebugKind) -> Self {
        match kind {
            DebugKind::Platform => Self {
                class: "debug-platform",
                background: "rgba(0,0,0,0.12)",
                border_radius: "6px",
            },
            DebugKind::Ladder => Self {
                class: "debug-ladder",
                background: "rgba(0,0,0,0.08)",
                border_radius: "6px",
            },
            DebugKind::FloorLine => Self {
                class: "debug-floorline",
                background: "rgba(0,0,0,0.10)",
                border_radius: "0",
            },
            DebugKind::Wall => Self {
                class: "tower-wall",
                background: "rgba(0,0,0,0.15)",
                border_radius: "8px",
            },
        }
    }

    /// Properties set once when a node is created
    pub fn properties(&self) -> [(&'static str, &'static str); 4] {
        [
            ("position", "absolute"),
            ("pointer-events", "none"),
            ("background", self.background),
            ("border-radius", self.border_radius),
        ]
    }
}
