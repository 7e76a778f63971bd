use tracing::{debug, trace, warn};

use crate::core::SnapScale;
use crate::error::SnapResult;

use super::{BrushMode, BrushPhase, DragEvent, SnapTable, SnappingResult, TimeSnapConfig};

const WEST: usize = 0;
const EAST: usize = 1;

/// Per-brush gesture memory.
///
/// `initial_pixel` is set when a gesture starts from a zero-width selection
/// and cleared on every `End` event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SnapSession {
    initial_pixel: Option<f64>,
}

impl SnapSession {
    fn begin_new_selection(&mut self, pixel: f64) {
        self.initial_pixel = Some(pixel);
    }

    fn clear(&mut self) {
        self.initial_pixel = None;
    }
}

/// Tables aligned so their first or last tick lands on the extent edge.
#[derive(Debug, Clone, PartialEq)]
struct ExtentTables {
    from_start: SnapTable,
    from_end: SnapTable,
}

/// Stateful snapper for a brush over a time axis.
///
/// One instance serves exactly one brush. Events must arrive in gesture order
/// (`Start`, any number of `Brush`, `End`); the caller threads the previous
/// result between calls.
#[derive(Debug, Clone)]
pub struct TimeSnapper<S> {
    scale: S,
    config: TimeSnapConfig,
    default_table: SnapTable,
    extent_tables: Option<ExtentTables>,
    tick_interval: f64,
    session: SnapSession,
}

impl<S: SnapScale> TimeSnapper<S> {
    pub fn new(scale: S, config: TimeSnapConfig) -> SnapResult<Self> {
        let config = config.validate()?;
        let default_table = SnapTable::from_values(scale.ticks(config.num_ticks), &scale)?;

        let values = default_table.values();
        let tick_interval = if values.len() == 2 {
            values[1] - values[0]
        } else {
            values[2] - values[1]
        };

        let extent_tables = if config.allow_extent_snapping {
            let start_offset = (values[0] - config.extent_start_ms).abs();
            let end_offset = (config.extent_end_ms - values[default_table.last_index()]).abs();
            Some(ExtentTables {
                from_start: default_table.shifted(-start_offset, &scale)?,
                from_end: default_table.shifted(end_offset, &scale)?,
            })
        } else {
            None
        };

        debug!(
            ticks = default_table.len(),
            tick_interval,
            extent_snapping = config.allow_extent_snapping,
            "time snapper ready"
        );

        Ok(Self {
            scale,
            config,
            default_table,
            extent_tables,
            tick_interval,
            session: SnapSession::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> TimeSnapConfig {
        self.config
    }

    #[must_use]
    pub fn scale(&self) -> &S {
        &self.scale
    }

    #[must_use]
    pub fn default_table(&self) -> &SnapTable {
        &self.default_table
    }

    /// Minimum width a handle resize snaps to.
    #[must_use]
    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    /// Seed selection built from the configured brush.
    #[must_use]
    pub fn initial_result(&self) -> SnappingResult {
        SnappingResult::from_values(
            [self.config.brush_start_ms, self.config.brush_end_ms],
            &self.scale,
        )
    }

    /// Forgets any half-finished gesture.
    ///
    /// Needed when a host drops a gesture without delivering its `End` event.
    pub fn reset_session(&mut self) {
        self.session.clear();
    }

    /// Snaps one brush event against the previous result.
    ///
    /// Never fails: out-of-range input clamps to the nearest valid tick and
    /// an event without a selection returns `previous`.
    pub fn snap(&mut self, event: &DragEvent, previous: &SnappingResult) -> SnappingResult {
        if let Some(selection) = event.selection {
            if outside_chart(selection, self.config.width) {
                warn!(
                    ?selection,
                    width = self.config.width,
                    "brush selection outside the chart, clamping to edge ticks"
                );
            }
        }

        let result = match event.selection {
            None => *previous,
            Some(selection) => match event.mode {
                BrushMode::Drag => self.snap_block_drag(selection, previous),
                BrushMode::Resize => self.snap_resize(event.phase, selection, previous),
            },
        };

        if event.phase == BrushPhase::End {
            self.session.clear();
        }

        let result = result.ordered();
        trace!(
            phase = ?event.phase,
            mode = ?event.mode,
            selection = ?event.selection,
            values = ?result.values,
            pixels = ?result.pixels,
            "snapped brush event"
        );
        result
    }

    fn snap_block_drag(&self, selection: [f64; 2], previous: &SnappingResult) -> SnappingResult {
        if previous.matches_pixels(selection) {
            return *previous;
        }

        let duration = previous.duration();
        let table = self.block_drag_table(selection);
        let low = table.nearest_index(selection[WEST]);
        let high = table.nearest_index(selection[EAST]);

        let mut values = [table.value(low), table.value(high)];
        let mut pixels = [table.pixel(low), table.pixel(high)];
        if values[EAST] > self.config.brush_end_ms {
            values[WEST] = values[EAST] - duration;
            pixels[WEST] = self.scale.forward(values[WEST]);
        } else {
            values[EAST] = values[WEST] + duration;
            pixels[EAST] = self.scale.forward(values[EAST]);
        }

        trace!(low, high, duration, "block drag");
        SnappingResult::new(values, pixels)
    }

    fn snap_resize(
        &mut self,
        phase: BrushPhase,
        selection: [f64; 2],
        previous: &SnappingResult,
    ) -> SnappingResult {
        if phase == BrushPhase::Start && selection[WEST] == selection[EAST] {
            self.session.begin_new_selection(selection[WEST]);
        }

        if selection[WEST] == 0.0 && selection[EAST] == self.config.width {
            return SnappingResult::new(
                [self.config.extent_start_ms, self.config.extent_end_ms],
                [0.0, self.config.width],
            );
        }

        if phase == BrushPhase::Start && previous.matches_pixels(selection) {
            return *previous;
        }

        // A handle also counts as locked when the handles crossed and it now
        // sits where the opposite handle used to be.
        let lock_west = selection[WEST] == previous.pixels[WEST]
            || (selection[WEST] == previous.pixels[EAST]
                && selection[EAST] != previous.pixels[EAST]);
        let lock_east = selection[EAST] == previous.pixels[EAST]
            || (selection[EAST] == previous.pixels[WEST]
                && selection[WEST] != previous.pixels[WEST]);

        let table = self.resize_table(selection);
        let last = table.last_index();
        let low = table.nearest_index(selection[WEST]);
        let high = table.nearest_index(selection[EAST]);
        let mut values = [table.value(low), table.value(high)];
        let mut pixels = [table.pixel(low), table.pixel(high)];

        match self.session.initial_pixel {
            None if lock_west || lock_east => {
                let (locked, free) = if lock_west { (WEST, EAST) } else { (EAST, WEST) };
                let source = if selection[locked] == previous.pixels[locked] {
                    locked
                } else {
                    free
                };
                values[locked] = previous.values[source];
                pixels[locked] = previous.pixels[source];

                let mut index = if lock_west { high } else { low };
                while values[EAST] - values[WEST] < self.tick_interval {
                    index = match (lock_west, index) {
                        (true, i) if i < last => i + 1,
                        (false, i) if i > 0 => i - 1,
                        _ => break,
                    };
                    values[free] = table.value(index);
                    pixels[free] = table.pixel(index);
                }
                trace!(locked, index, "resize with locked handle");
            }
            Some(initial_pixel) if low == high && phase != BrushPhase::Start => {
                let (west, east) = if selection[WEST] == initial_pixel {
                    (low, (high + 1).min(last))
                } else {
                    (low.saturating_sub(1), high)
                };
                values = [table.value(west), table.value(east)];
                pixels = [table.pixel(west), table.pixel(east)];
                trace!(west, east, initial_pixel, "new selection split");
            }
            _ => {}
        }

        SnappingResult::new(values, pixels)
    }

    fn block_drag_table(&self, selection: [f64; 2]) -> &SnapTable {
        match &self.extent_tables {
            Some(tables) if selection[WEST] == 0.0 => &tables.from_start,
            Some(tables) if selection[EAST] == self.config.width => &tables.from_end,
            _ => &self.default_table,
        }
    }

    fn resize_table(&self, selection: [f64; 2]) -> &SnapTable {
        let Some(tables) = &self.extent_tables else {
            return &self.default_table;
        };

        let start_switch =
            (self.default_table.first_pixel() + tables.from_start.first_pixel()) / 2.0;
        let end_switch = (self.default_table.last_pixel() + tables.from_end.last_pixel()) / 2.0;
        if selection[WEST] < start_switch {
            &tables.from_start
        } else if selection[EAST] > end_switch {
            &tables.from_end
        } else {
            &self.default_table
        }
    }
}

fn outside_chart(selection: [f64; 2], width: f64) -> bool {
    selection
        .iter()
        .any(|pixel| !pixel.is_finite() || *pixel < 0.0 || *pixel > width)
}

/// Closure form of [`TimeSnapper::snap`] owning its own session state.
pub fn generate_time_snapping_function<S: SnapScale>(
    scale: S,
    config: TimeSnapConfig,
) -> SnapResult<impl FnMut(&DragEvent, &SnappingResult) -> SnappingResult> {
    let mut snapper = TimeSnapper::new(scale, config)?;
    Ok(move |event: &DragEvent, previous: &SnappingResult| snapper.snap(event, previous))
}

#[cfg(test)]
mod tests {
    use super::{TimeSnapper, outside_chart};
    use crate::core::LinearScale;
    use crate::snap::{BrushMode, BrushPhase, DragEvent, SnappingResult, TimeSnapConfig};

    fn snapper() -> TimeSnapper<LinearScale> {
        let scale = LinearScale::new((0.0, 1_000.0), (0.0, 1_000.0)).expect("valid scale");
        let config = TimeSnapConfig::new(0.0, 1_000.0, 1_000.0).with_brush(200.0, 500.0);
        TimeSnapper::new(scale, config).expect("snapper")
    }

    #[test]
    fn zero_width_start_records_initial_pixel() {
        let mut snapper = snapper();
        let previous = snapper.initial_result();
        let event = DragEvent::user(BrushPhase::Start, BrushMode::Resize, [700.0, 700.0]);
        snapper.snap(&event, &previous);
        assert_eq!(snapper.session.initial_pixel, Some(700.0));
    }

    #[test]
    fn end_event_clears_initial_pixel_even_on_full_extent() {
        let mut snapper = snapper();
        let previous = snapper.initial_result();
        let start = DragEvent::user(BrushPhase::Start, BrushMode::Resize, [0.0, 0.0]);
        snapper.snap(&start, &previous);
        assert_eq!(snapper.session.initial_pixel, Some(0.0));

        let end = DragEvent::user(BrushPhase::End, BrushMode::Resize, [0.0, 1_000.0]);
        let result = snapper.snap(&end, &previous);
        assert_eq!(result, SnappingResult::new([0.0, 1_000.0], [0.0, 1_000.0]));
        assert_eq!(snapper.session.initial_pixel, None);
    }

    #[test]
    fn reset_session_drops_pending_gesture() {
        let mut snapper = snapper();
        let previous = snapper.initial_result();
        let start = DragEvent::user(BrushPhase::Start, BrushMode::Resize, [300.0, 300.0]);
        snapper.snap(&start, &previous);
        snapper.reset_session();
        assert_eq!(snapper.session.initial_pixel, None);
    }

    #[test]
    fn selections_past_either_edge_are_outside_chart() {
        assert!(!outside_chart([0.0, 1_000.0], 1_000.0));
        assert!(outside_chart([-1.0, 500.0], 1_000.0));
        assert!(outside_chart([500.0, 1_000.5], 1_000.0));
        assert!(outside_chart([f64::NAN, 500.0], 1_000.0));
    }

    #[test]
    fn tick_interval_uses_second_gap() {
        let snapper = snapper();
        assert_eq!(snapper.tick_interval(), 100.0);
        assert_eq!(snapper.default_table().len(), 11);
    }
}
