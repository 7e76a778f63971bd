//! brush-snap: snapping engine for one-dimensional brush selections.
//!
//! A brush is a draggable range selector over a linear or time axis. This
//! crate maps raw pixel selections onto tick-aligned snap points while keeping
//! drag semantics intact: which handle moved, whether a block drag preserves
//! its width, and how selections clamp at the chart edges.

pub mod core;
pub mod error;
pub mod interaction;
pub mod snap;
pub mod telemetry;

pub use error::{SnapError, SnapResult};
pub use snap::{
    BrushMode, BrushPhase, DragEvent, LinearSnapper, SnappingResult, TimeSnapConfig, TimeSnapper,
    generate_linear_snapping_function, generate_time_snapping_function,
};
