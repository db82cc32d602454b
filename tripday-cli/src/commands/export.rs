use std::path::Path;

use anyhow::{Context, Result};
use tripday_core::export::{export_json, generate_ics};
use tripday_core::plan::Plan;

use crate::ExportFormat;

pub fn run(plan: &Plan, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let content = match format {
        ExportFormat::Json => export_json(plan)?,
        ExportFormat::Ics => generate_ics(plan)?,
    };

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Could not write {}", path.display()))?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote export");
            eprintln!("Exported {} to {}", plan.name, path.display());
        }
        None => print!("{content}"),
    }

    Ok(())
}
