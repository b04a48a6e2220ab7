pub mod params;
pub mod series;

pub use params::*;
pub use series::*;

use chrono::NaiveDateTime;

/// Elapsed time from `from` to `to` in fractional hours (microsecond resolution).
/// Negative when `to` precedes `from`.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let elapsed = to - from;
    match elapsed.num_microseconds() {
        Some(us) => us as f64 / 3_600_000_000.0,
        // spans beyond ~292k years overflow i64 microseconds
        None => elapsed.num_milliseconds() as f64 / 3_600_000.0,
    }
}
