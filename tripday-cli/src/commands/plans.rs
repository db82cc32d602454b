use anyhow::Result;
use owo_colors::OwoColorize;
use tripday_core::store::PlanDir;

pub fn run(plan_dir: &PlanDir) -> Result<()> {
    let plans = plan_dir.plans();

    if plans.is_empty() {
        println!(
            "{}",
            format!("No plans found in {}", plan_dir.path().display()).dimmed()
        );
        println!("Create one with:\n  tripday new \"Rome\" --from 2025-06-01 --to 2025-06-05");
        return Ok(());
    }

    for file in &plans {
        let plan = &file.plan;
        let conflicts: usize = plan.days.iter().map(|d| d.conflicts().len()).sum();
        let destination = plan
            .destination
            .as_deref()
            .map(|d| format!(" - {d}"))
            .unwrap_or_default();

        let mut line = format!(
            "{} {}{} {}",
            file.slug().bold(),
            plan.name,
            destination,
            format!("{} to {}, {} activities", plan.start_date, plan.end_date, plan.activity_count()).dimmed()
        );
        if conflicts > 0 {
            line.push_str(&format!(" {}", format!("{conflicts} conflicts").red()));
        }
        println!("{line}");
    }

    Ok(())
}
