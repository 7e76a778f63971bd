//! Snapping engine: nearest-tick search, the stateless linear snapper and
//! the stateful time snapper.

pub mod config;
pub mod event;
pub mod linear;
pub mod result;
pub mod search;
pub mod table;
pub mod time;

pub use config::{DEFAULT_NUM_TICKS, TimeSnapConfig};
pub use event::{BrushMode, BrushPhase, DragEvent};
pub use linear::{LinearSnapper, generate_linear_snapping_function};
pub use result::SnappingResult;
pub use search::nearest_index;
pub use table::SnapTable;
pub use time::{TimeSnapper, generate_time_snapping_function};
