/// Length of a session whose duration is missing or unreadable.
pub const DEFAULT_SESSION_SECS: i64 = 60 * 60;

/// Stored duration used when a new session's duration can't be normalized.
pub const DEFAULT_SESSION_CLOCK: &str = "01:00:00";

/// Display name for sessions created without one.
pub const DEFAULT_SESSION_NAME: &str = "Training";

pub const SESSIONS_TABLE: &str = "training_sessions";
pub const GROUPS_TABLE: &str = "groups";
