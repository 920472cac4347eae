//! Session duration parsing.
//!
//! Durations come back from the database either as ISO-8601 (`PT1H30M`)
//! or as a Postgres interval rendered in clock form (`01:30:00`). Anything
//! unreadable resolves to one hour rather than failing the event.

use std::sync::LazyLock;

use chrono::Duration;
use regex::{Captures, Regex};

use crate::constants::DEFAULT_SESSION_SECS;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid ISO duration pattern")
});

static CLOCK_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+):(\d+):?(\d+)?").expect("valid clock duration pattern")
});

pub fn default_session_duration() -> Duration {
    Duration::seconds(DEFAULT_SESSION_SECS)
}

/// Duration of a stored session, falling back to one hour.
pub fn parse_session_duration(raw: Option<&str>) -> Duration {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return default_session_duration();
    };

    let secs = if raw.starts_with("PT") {
        iso_seconds(raw)
    } else {
        clock_seconds(raw)
    };

    secs.and_then(Duration::try_seconds)
        .unwrap_or_else(default_session_duration)
}

/// `PT#H#M#S`, every component optional.
fn iso_seconds(raw: &str) -> Option<i64> {
    let caps = ISO_DURATION.captures(raw)?;
    total_seconds(&caps)
}

/// `H:M[:S]` anywhere in the string, so `1 day 02:00:00` reads as two hours.
fn clock_seconds(raw: &str) -> Option<i64> {
    let caps = CLOCK_DURATION.captures(raw)?;
    total_seconds(&caps)
}

fn total_seconds(caps: &Captures) -> Option<i64> {
    let component = |i: usize| -> Option<i64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
