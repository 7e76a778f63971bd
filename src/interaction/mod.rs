//! Glue between a brush widget and the snappers.
//!
//! The widget toolkit stays outside this crate: hosts translate their native
//! brush events into [`DragEvent`] and expose the widget's "move" command
//! through [`BrushTarget`]. Moving the widget usually makes it emit another
//! event; those come back flagged as not user-originated and are ignored.

use tracing::trace;

use crate::core::SnapScale;
use crate::error::SnapResult;
use crate::snap::{
    BrushPhase, DragEvent, LinearSnapper, SnappingResult, TimeSnapConfig, TimeSnapper,
};

/// Widget-side "move the selection to these pixels" command.
pub trait BrushTarget {
    fn move_selection(&mut self, pixels: [f64; 2]);
}

/// Callback notified with every snapped user event.
pub type SelectionListener = Box<dyn FnMut(&DragEvent, &SnappingResult)>;

/// Time snapping wired to one brush.
///
/// Owns the snapper and the previous result, which is only committed when a
/// gesture ends.
pub struct TimeBrushSnapping<S> {
    snapper: TimeSnapper<S>,
    previous: SnappingResult,
    listener: Option<SelectionListener>,
}

impl<S: SnapScale> TimeBrushSnapping<S> {
    pub fn new(scale: S, config: TimeSnapConfig) -> SnapResult<Self> {
        let snapper = TimeSnapper::new(scale, config)?;
        let previous = snapper.initial_result();
        Ok(Self {
            snapper,
            previous,
            listener: None,
        })
    }

    #[must_use]
    pub fn with_listener(
        mut self,
        listener: impl FnMut(&DragEvent, &SnappingResult) + 'static,
    ) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Last committed selection.
    #[must_use]
    pub fn previous(&self) -> SnappingResult {
        self.previous
    }

    #[must_use]
    pub fn snapper(&self) -> &TimeSnapper<S> {
        &self.snapper
    }

    /// Snaps a widget event and moves the widget to the snapped pixels.
    ///
    /// Returns `None` for programmatic events and for events without a
    /// selection; the latter restore the previous selection on the widget
    /// and, on `End`, still close the snapper's gesture.
    pub fn handle_event<T: BrushTarget + ?Sized>(
        &mut self,
        event: &DragEvent,
        target: &mut T,
    ) -> Option<SnappingResult> {
        if !event.user_originated {
            return None;
        }
        if event.selection.is_none() {
            trace!(phase = ?event.phase, "restoring cleared brush selection");
            if event.phase == BrushPhase::End {
                self.snapper.reset_session();
            }
            target.move_selection(self.previous.pixels);
            return None;
        }

        let result = self.snapper.snap(event, &self.previous);
        if event.phase == BrushPhase::End {
            self.previous = result;
        }

        target.move_selection(result.pixels);
        if let Some(listener) = self.listener.as_mut() {
            listener(event, &result);
        }
        Some(result)
    }
}

/// Linear snapping wired to one brush.
pub struct LinearBrushSnapping<S> {
    snapper: LinearSnapper<S>,
    listener: Option<SelectionListener>,
}

impl<S: SnapScale> LinearBrushSnapping<S> {
    #[must_use]
    pub fn new(snapper: LinearSnapper<S>) -> Self {
        Self {
            snapper,
            listener: None,
        }
    }

    #[must_use]
    pub fn with_listener(
        mut self,
        listener: impl FnMut(&DragEvent, &SnappingResult) + 'static,
    ) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    #[must_use]
    pub fn snapper(&self) -> &LinearSnapper<S> {
        &self.snapper
    }

    /// Snaps every user event that carries a selection, in any phase.
    pub fn handle_event<T: BrushTarget + ?Sized>(
        &mut self,
        event: &DragEvent,
        target: &mut T,
    ) -> Option<SnappingResult> {
        if !event.user_originated {
            return None;
        }
        let selection = event.selection?;

        let result = self.snapper.snap(selection);
        target.move_selection(result.pixels);
        if let Some(listener) = self.listener.as_mut() {
            listener(event, &result);
        }
        Some(result)
    }
}
