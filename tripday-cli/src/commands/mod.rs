pub mod add;
pub mod conflicts;
pub mod export;
pub mod new;
pub mod plans;
pub mod schedule;
pub mod show;
pub mod suggest;

use anyhow::Result;
use chrono::NaiveDate;
use tripday_core::TripdayError;
use tripday_core::plan::{Day, Plan};

/// The single requested day, or every day of the plan.
pub fn selected_days(plan: &Plan, day: Option<NaiveDate>) -> Result<Vec<&Day>> {
    match day {
        Some(date) => Ok(vec![plan.day(date).ok_or(TripdayError::DayNotFound(date))?]),
        None => Ok(plan.days.iter().collect()),
    }
}
