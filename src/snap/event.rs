use serde::{Deserialize, Serialize};

/// Lifecycle phase of a brush gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushPhase {
    Start,
    Brush,
    End,
}

/// What the pointer is doing to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushMode {
    /// The whole selection is moved as one block.
    Drag,
    /// A handle is moved, or a new selection is being drawn.
    Resize,
}

/// Brush event translated from whatever widget toolkit hosts the brush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub phase: BrushPhase,
    pub mode: BrushMode,
    /// Raw pixel selection; `None` when the widget cleared the selection.
    pub selection: Option<[f64; 2]>,
    /// `false` for events caused by programmatic moves of the widget.
    pub user_originated: bool,
}

impl DragEvent {
    #[must_use]
    pub fn user(phase: BrushPhase, mode: BrushMode, selection: [f64; 2]) -> Self {
        Self {
            phase,
            mode,
            selection: Some(selection),
            user_originated: true,
        }
    }

    #[must_use]
    pub fn programmatic(phase: BrushPhase, mode: BrushMode, selection: [f64; 2]) -> Self {
        Self {
            phase,
            mode,
            selection: Some(selection),
            user_originated: false,
        }
    }

    /// User event whose selection was cleared (e.g. a click without drag).
    #[must_use]
    pub fn cleared(phase: BrushPhase, mode: BrushMode) -> Self {
        Self {
            phase,
            mode,
            selection: None,
            user_originated: true,
        }
    }
}
