use anyhow::{Context, Result};
use coachcal_core::config::CoachCalConfig;
use coachcal_core::constants::DEFAULT_SESSION_NAME;
use coachcal_core::normalize::{clock_from_minutes, clock_from_secs};
use coachcal_core::{NewSession, RawSession};
use owo_colors::OwoColorize;

use super::{load_calendar, open_calendar, print_load_warnings};
use crate::utils::with_spinner;

pub async fn list(config: &CoachCalConfig, group_id: &str) -> Result<()> {
    let source = config.source.open()?;

    let sessions = with_spinner(
        format!("Loading sessions of {group_id}"),
        source.sessions_for_group(group_id),
    )
    .await?;
    if sessions.is_empty() {
        println!("{}", format!("No sessions for group {group_id}").dimmed());
        return Ok(());
    }

    for session in &sessions {
        println!("{}", render_session(session));
    }

    Ok(())
}

pub async fn create(config: &CoachCalConfig, coach_id: &str, input: NewSession) -> Result<()> {
    let ((feed, buffer), report) = load_calendar(config, coach_id).await?;
    print_load_warnings(&report);

    let created = feed.create_session(input).await?;

    println!(
        "{}",
        format!("Created session {}", created.session.id).green()
    );
    if let Some(error) = &created.reload_error {
        eprintln!(
            "{}",
            format!("Session saved but the calendar could not be reloaded: {error}").yellow()
        );
    } else if created.reloaded {
        println!("{}", "Group was not on the calendar yet, reloaded it".dimmed());
    } else if created.event.is_none() {
        eprintln!("{}", "Session saved but its date or time could not be placed on the calendar".yellow());
    }
    println!();

    let highlight = created.event.as_ref().map(|e| e.id.as_str()).unwrap_or(&created.session.id);
    println!("{}", buffer.borrow().surface().render(Some(highlight)));

    Ok(())
}

pub async fn delete(config: &CoachCalConfig, session_id: &str) -> Result<()> {
    let (feed, _buffer) = open_calendar(config)?;

    feed.delete_session(session_id)
        .await
        .with_context(|| format!("Could not delete session {session_id}"))?;

    println!("{}", format!("Deleted session {session_id}").green());
    Ok(())
}

/// Build the creation input from command-line values.
pub fn new_session_input(
    group_id: String,
    date: String,
    start_time: String,
    duration: &str,
    name: Option<String>,
    venue: Option<String>,
) -> Result<NewSession> {
    Ok(NewSession {
        group_id,
        name,
        venue,
        date,
        start_time,
        duration: duration_clock(duration)?,
    })
}

/// `90` is minutes, `1:30` is a clock, anything else goes through humantime
/// (`1h 30m`). Always returns `HH:MM:SS`.
fn duration_clock(input: &str) -> Result<String> {
    let input = input.trim();

    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        let minutes: u64 = input.parse().with_context(|| format!("Duration '{input}' is too long"))?;
        return Ok(clock_from_minutes(minutes));
    }
    if input.contains(':') {
        let secs = clock_secs(input)
            .with_context(|| format!("Invalid duration '{input}'. Use H:MM or H:MM:SS (1:30, 01:30:00)"))?;
        return Ok(clock_from_secs(secs));
    }

    let duration = humantime::parse_duration(input)
        .with_context(|| format!("Invalid duration '{input}'. Use minutes (90), a clock (01:30) or e.g. 1h30m"))?;
    Ok(clock_from_secs(duration.as_secs()))
}

/// Seconds in `H:MM[:SS]`; minutes and seconds must be below 60.
fn clock_secs(input: &str) -> Option<u64> {
    let parts = input
        .split(':')
        .map(|p| p.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (hours, minutes, seconds) = match parts[..] {
        [h, m] => (h, m, 0),
        [h, m, s] => (h, m, s),
        _ => return None,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
}

fn render_session(session: &RawSession) -> String {
    let name = session.name.as_deref().unwrap_or(DEFAULT_SESSION_NAME);
    let when = format!(
        "{} {}",
        session.date.as_deref().unwrap_or("????-??-??"),
        session.start_time.as_deref().unwrap_or("--:--:--"),
    );
    let length = session.duration.as_deref().unwrap_or("-");
    let venue = session
        .venue
        .as_deref()
        .map(|v| format!(" @ {v}"))
        .unwrap_or_default();

    format!("{}  {}  {}{}  {}", when, length.dimmed(), name, venue, session.id.dimmed())
}
