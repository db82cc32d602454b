//! Plan files on disk.
//!
//! Each plan is a pretty-printed JSON file named after its slug, e.g.
//! `~/trips/rome-2025.json`.

use std::path::{Path, PathBuf};

use crate::error::{TripdayError, TripdayResult};
use crate::plan::Plan;
use crate::utils::slugify;

/// A plan together with the file it was loaded from.
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub plan: Plan,
    pub path: PathBuf,
}

impl PlanFile {
    pub fn new(path: PathBuf, plan: Plan) -> Self {
        PlanFile { plan, path }
    }

    pub fn load(path: &Path) -> TripdayResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TripdayError::PlanNotFound(path.display().to_string()),
            _ => TripdayError::Io(e),
        })?;

        let plan: Plan = serde_json::from_str(&content)?;
        plan.validate()?;

        Ok(PlanFile {
            plan,
            path: path.to_path_buf(),
        })
    }

    pub fn save(&self) -> TripdayResult<()> {
        self.plan.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.plan)?;
        std::fs::write(&self.path, content + "\n")?;
        tracing::info!(path = %self.path.display(), "saved plan");
        Ok(())
    }

    /// File stem used to refer to this plan on the command line.
    pub fn slug(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(String::from)
            .unwrap_or_else(|| slugify(&self.plan.name))
    }
}

/// The directory holding all plan files.
#[derive(Debug, Clone)]
pub struct PlanDir {
    path: PathBuf,
}

impl PlanDir {
    pub fn new(path: PathBuf) -> Self {
        PlanDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All readable plans, sorted by slug. Unreadable files are skipped with a warning.
    pub fn plans(&self) -> Vec<PlanFile> {
        let Ok(entries) = std::fs::read_dir(&self.path) else {
            return Vec::new();
        };

        let mut plans: Vec<PlanFile> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| match PlanFile::load(&path) {
                Ok(plan) => Some(plan),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable plan");
                    None
                }
            })
            .collect();

        plans.sort_by_key(|p| p.slug());
        plans
    }

    /// Resolve a plan argument: an existing file path, or a slug inside this directory.
    pub fn resolve(&self, name_or_path: &str) -> TripdayResult<PlanFile> {
        let as_path = PathBuf::from(name_or_path);
        if as_path.is_file() {
            return PlanFile::load(&as_path);
        }

        let by_slug = self.path.join(format!("{}.json", slugify(name_or_path)));
        if by_slug.is_file() {
            return PlanFile::load(&by_slug);
        }

        let available: Vec<String> = self.plans().iter().map(PlanFile::slug).collect();
        Err(TripdayError::PlanNotFound(if available.is_empty() {
            name_or_path.to_string()
        } else {
            format!("{name_or_path} (available: {})", available.join(", "))
        }))
    }

    /// Path for a new plan, suffixing the slug on collisions.
    pub fn unique_path_for(&self, plan: &Plan) -> TripdayResult<PathBuf> {
        let base = slugify(&plan.name);

        let candidate = self.path.join(format!("{base}.json"));
        if !candidate.exists() {
            return Ok(candidate);
        }

        for n in 2..=100 {
            let candidate = self.path.join(format!("{base}-{n}.json"));
            if !candidate.exists() {
                return Ok(candidate);
            }
        }

        Err(TripdayError::Config(format!(
            "Too many plan name collisions for '{base}'"
        )))
    }
}
