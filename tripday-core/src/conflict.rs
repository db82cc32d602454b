//! Pairwise conflict detection between scheduled activities.

use serde::Serialize;

use crate::plan::Activity;

/// Two activities whose windows overlap. Borrowed from the day it was
/// computed for; recompute after any edit.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    pub activity1: &'a Activity,
    pub activity2: &'a Activity,
    pub overlap_minutes: u32,
}

/// Owned, id-based form of a [`Conflict`] for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub activity1: String,
    pub activity2: String,
    pub overlap_minutes: u32,
}

impl Conflict<'_> {
    pub fn report(&self) -> ConflictReport {
        ConflictReport {
            activity1: self.activity1.id.clone(),
            activity2: self.activity2.id.clone(),
            overlap_minutes: self.overlap_minutes,
        }
    }

    /// Whether the given activity is one side of this conflict.
    pub fn involves(&self, id: &str) -> bool {
        self.activity1.id == id || self.activity2.id == id
    }
}

/// Every unordered pair of overlapping activities, in input order.
/// Activities without a complete, parseable window are ignored.
pub fn detect_conflicts(activities: &[Activity]) -> Vec<Conflict<'_>> {
    let timed: Vec<_> = activities
        .iter()
        .filter_map(|a| a.interval().map(|iv| (a, iv)))
        .collect();

    let mut conflicts = Vec::new();
    for (i, (a, a_iv)) in timed.iter().enumerate() {
        for (b, b_iv) in &timed[i + 1..] {
            let overlap = a_iv.overlap_minutes(b_iv);
            if overlap > 0 {
                conflicts.push(Conflict {
                    activity1: *a,
                    activity2: *b,
                    overlap_minutes: overlap,
                });
            }
        }
    }
    conflicts
}
