//! Core types and scheduling logic for tripday.
//!
//! - `time` and `interval` for `HH:MM` values and half-open windows
//! - `schedule` for slot suggestions and greedy auto-scheduling
//! - `conflict` for pairwise overlap detection
//! - `plan`, `store` and `export` for itineraries, plan files and .ics/JSON output

pub mod config;
pub mod conflict;
pub mod constants;
pub mod error;
pub mod export;
pub mod interval;
pub mod plan;
pub mod schedule;
pub mod store;
pub mod time;
pub mod utils;

pub use conflict::{Conflict, ConflictReport, detect_conflicts};
pub use error::{TripdayError, TripdayResult};
pub use interval::{TimeInterval, overlap_minutes, overlaps};
pub use plan::{Activity, Category, Day, Plan};
pub use schedule::{Assignment, ScheduleOptions, ScheduleRequest, auto_schedule, suggest_slots};
pub use time::{ClockTime, duration_between, format_duration, parse_duration, parse_stored_time, parse_time};
