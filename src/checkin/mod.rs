//! Check-in Records
//!
//! Input side of the pipeline. Check-ins are created and persisted by the
//! surrounding application; this module only models them and loads them
//! from CSV exports.

mod import;
mod types;

pub use import::{CheckInImporter, ImportError, ImportResult};
pub use types::{
    BodyTemperature, CheckIn, CheckInSource, DeviceMetrics, Metric, SymptomTime, TrackerReading,
    RATING_MAX, RATING_MIN,
};
