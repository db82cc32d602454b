use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::plan::Plan;

use super::selected_days;
use crate::render::Render;

pub fn run(plan: &Plan, day: Option<NaiveDate>) -> Result<()> {
    let destination = plan.destination.as_deref().unwrap_or("");
    println!("{} {}", plan.name.bold(), destination.dimmed());

    let days = selected_days(plan, day)?;

    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", day.render());

        if day.activities.is_empty() {
            println!("   {}", "Nothing planned".dimmed());
            continue;
        }

        let conflicts = day.conflicts();
        for activity in &day.activities {
            let marker = if conflicts.iter().any(|c| c.involves(&activity.id)) {
                "!".red().to_string()
            } else {
                " ".to_string()
            };
            println!("  {} {}", marker, activity.render());
        }

        let cost = day.total_cost();
        if cost > 0.0 {
            println!("   {}", format!("Day total: {cost:.2}").dimmed());
        }
    }

    if day.is_none() && plan.total_cost() > 0.0 {
        println!();
        println!("{}", format!("Trip total: {:.2}", plan.total_cost()).bold());
    }

    Ok(())
}
