//! Visual node state
//!
//! Nodes carry the full visual state an adapter needs to render an
//! element. Effects only mutate these fields; how a revealed flag or a
//! tilt transform turns into styling is the host's concern.

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Host-space rectangle for a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBounds {
    /// Create bounds from origin and size
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the bounds
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Pointer-driven 3D tilt applied to a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltTransform {
    /// Rotation around the x axis, in degrees
    pub rotate_x: f64,
    /// Rotation around the y axis, in degrees
    pub rotate_y: f64,
    /// Perspective depth in host pixels
    pub perspective: f64,
}

/// Visual state for one stage node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Rendered text content
    pub text: String,
    /// Opacity in [0, 1]
    pub opacity: f64,
    /// Fill progress in [0, 1], used by bar-like nodes
    pub progress: f64,
    /// Vertical offset in host pixels, used by parallax
    pub offset_y: f64,
    /// One-shot reveal marker
    pub revealed: bool,
    /// Typing pulse marker for terminal-style lines
    pub typing: bool,
    /// Hover glow marker
    pub glow: bool,
    /// Interaction disabled marker
    pub disabled: bool,
    /// Node exists but is not yet shown
    pub hidden: bool,
    /// Current tilt, None when at rest
    pub tilt: Option<TiltTransform>,
    /// Host-space bounds, kept current by the host
    pub bounds: NodeBounds,
}

impl VisualNode {
    /// Create a node with default visual state
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the host-space bounds
    pub fn with_bounds(mut self, bounds: NodeBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the hidden flag
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

impl Default for VisualNode {
    fn default() -> Self {
        Self {
            text: String::new(),
            opacity: 1.0,
            progress: 0.0,
            offset_y: 0.0,
            revealed: false,
            typing: false,
            glow: false,
            disabled: false,
            hidden: false,
            tilt: None,
            bounds: NodeBounds::default(),
        }
    }
}

/// Stage-wide visual state, the stand-in for a document root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRoot {
    /// Active theme marker
    pub theme: Theme,
    /// Theme toggle glyph
    pub icon: String,
    /// True while a theme transition window is open
    pub theme_transition: bool,
    /// True once the page has scrolled past the header threshold
    pub header_condensed: bool,
}

impl Default for StageRoot {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            icon: Theme::Light.icon().to_string(),
            theme_transition: false,
            header_condensed: false,
        }
    }
}
