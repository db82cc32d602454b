use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::conflict::ConflictReport;
use tripday_core::plan::{Day, Plan};

use super::selected_days;
use crate::render::Render;

/// Conflict reports keyed by date; days without conflicts are left out.
fn reports_by_day(days: &[&Day]) -> BTreeMap<NaiveDate, Vec<ConflictReport>> {
    days.iter()
        .map(|d| (d.date, d.conflicts().iter().map(|c| c.report()).collect::<Vec<_>>()))
        .filter(|(_, reports)| !reports.is_empty())
        .collect()
}

pub fn run(plan: &Plan, day: Option<NaiveDate>, json: bool) -> Result<()> {
    let days = selected_days(plan, day)?;

    if json {
        let by_day = reports_by_day(&days);
        tracing::debug!(days = by_day.len(), "conflict report");
        println!("{}", serde_json::to_string_pretty(&by_day)?);
        return Ok(());
    }

    let mut total = 0;
    for day in days {
        let conflicts = day.conflicts();
        if conflicts.is_empty() {
            continue;
        }
        total += conflicts.len();
        println!("{}", day.render());
        for conflict in &conflicts {
            println!("   {}", conflict.render());
        }
    }

    if total == 0 {
        println!("{}", "No conflicts".green());
    }

    Ok(())
}
