use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tripday_core::plan::Plan;
use tripday_core::store::{PlanDir, PlanFile};

pub fn run(
    plan_dir: &PlanDir,
    name: String,
    from: NaiveDate,
    to: NaiveDate,
    destination: Option<String>,
    timezone: Option<String>,
) -> Result<()> {
    if to < from {
        anyhow::bail!("--to {} is before --from {}", to, from);
    }

    let mut plan = Plan::new(name, from, to);
    plan.destination = destination.filter(|d| !d.is_empty());
    plan.timezone = match timezone {
        Some(tz) => Some(tz),
        None => iana_time_zone::get_timezone().ok(),
    };

    let path = plan_dir.unique_path_for(&plan)?;
    let file = PlanFile::new(path, plan);
    file.save()?;

    println!(
        "{} {} {}",
        "Created".green(),
        file.plan.name.bold(),
        format!("({} days, {})", file.plan.days.len(), file.path.display()).dimmed()
    );
    Ok(())
}
