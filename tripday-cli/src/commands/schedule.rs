use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::TripdayError;
use tripday_core::schedule::ScheduleOptions;
use tripday_core::store::PlanFile;

use crate::render::Render;

pub fn run(
    mut file: PlanFile,
    date: NaiveDate,
    write: bool,
    json: bool,
    options: &ScheduleOptions,
) -> Result<()> {
    let day = file.plan.day_mut(date).ok_or(TripdayError::DayNotFound(date))?;
    let assignments = day.auto_resolve(options);
    tracing::debug!(%date, count = assignments.len(), "auto-resolved day");

    if json {
        println!("{}", serde_json::to_string_pretty(&assignments)?);
    } else {
        println!("{}", day.render());
        if assignments.is_empty() {
            println!("   {}", "Nothing to schedule".dimmed());
        }
        for assignment in &assignments {
            let title = day
                .activity(&assignment.id)
                .map(|a| a.title.as_str())
                .unwrap_or(&assignment.id);
            println!("   {} {}", assignment.render(), title);
        }
        let overruns = assignments
            .last()
            .is_some_and(|last| last.interval().map_or(true, |iv| iv.end > options.day_end));
        if overruns {
            println!("   {}", format!("Runs past {}", options.day_end).yellow());
        }
    }

    if write {
        file.save()?;
        tracing::info!(%date, path = %file.path.display(), "wrote rescheduled day");
        if !json {
            println!("{}", format!("Saved {}", file.path.display()).dimmed());
        }
    }

    Ok(())
}
