/// Gap enforced between consecutive auto-scheduled activities.
pub const BUFFER_MINUTES: u32 = 15;

/// Duration assumed for an activity that doesn't state one.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Most slot suggestions returned in one call.
pub const MAX_SUGGESTIONS: usize = 5;

pub const DEFAULT_DAY_START: &str = "08:00";
pub const DEFAULT_DAY_END: &str = "22:00";
