//! Normalization of new-session input into the stored column formats.
//!
//! Dates are stored as `YYYY-MM-DD`, start times and durations as
//! `HH:MM:SS`.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::constants::DEFAULT_SESSION_CLOCK;
use crate::error::{CoachCalError, CoachCalResult};
use crate::session::NewSession;

static FULL_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2,}:\d{2}:\d{2}$").expect("valid clock pattern"));
static SHORT_CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid clock pattern"));
static WHOLE_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid hours pattern"));

/// Stored form of a duration: `HH:MM:SS` kept (hours may run past two
/// digits), `HH:MM` padded, bare digits
/// read as hours, anything else becomes one hour.
pub fn stored_duration(input: &str) -> String {
    let input = input.trim();

    if FULL_CLOCK.is_match(input) {
        return input.to_string();
    }
    if SHORT_CLOCK.is_match(input) {
        return format!("{input}:00");
    }
    if WHOLE_HOURS.is_match(input) {
        if let Ok(hours) = input.parse::<u32>() {
            return format!("{hours:02}:00:00");
        }
    }

    DEFAULT_SESSION_CLOCK.to_string()
}

/// `90` minutes → `01:30:00`.
pub fn clock_from_minutes(minutes: u64) -> String {
    clock_from_secs(minutes.saturating_mul(60))
}

pub fn clock_from_secs(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Convert `HH:MM[:SS]` or a 12-hour time (`7 PM`, `11:15am`) to `HH:MM:SS`.
pub fn stored_start_time(input: &str) -> Option<String> {
    let upper = input.trim().to_ascii_uppercase();

    let (clock, pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(true))
    } else {
        (upper.as_str(), None)
    };

    let mut parts = clock.split(':');
    let hour: u32 = parts.next()?.trim().parse().ok()?;
    let minute: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        // "7 PM" is fine, a bare "7" is not
        None if pm.is_some() => 0,
        None => return None,
    };
    let second: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    let hour = match pm {
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(true) => hour % 12 + 12,
        Some(false) => hour % 12,
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, second).map(|t| t.format("%H:%M:%S").to_string())
}

/// `YYYY-MM-DD`, validated.
pub fn stored_date(input: &str) -> Option<String> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

impl NewSession {
    /// Bring every field into its stored format.
    ///
    /// Fails only on an unreadable date or start time; durations always
    /// normalize. Blank names and venues become absent.
    pub fn normalized(self) -> CoachCalResult<NewSession> {
        let date = stored_date(&self.date)
            .ok_or_else(|| CoachCalError::InvalidInput(format!("Invalid date '{}'. Expected YYYY-MM-DD", self.date)))?;
        let start_time = stored_start_time(&self.start_time).ok_or_else(|| {
            CoachCalError::InvalidInput(format!("Invalid start time '{}'", self.start_time))
        })?;

        Ok(NewSession {
            group_id: self.group_id,
            name: self.name.filter(|n| !n.trim().is_empty()),
            venue: self.venue.filter(|v| !v.trim().is_empty()),
            date,
            start_time,
            duration: stored_duration(&self.duration),
        })
    }
}
