pub mod primitives;
pub mod scale;
pub mod time_scale;

pub use primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
pub use scale::{LinearScale, SnapScale};
pub use time_scale::{TickInterval, TickUnit, TimeScale};
