pub mod agenda;
pub mod config;
pub mod groups;
pub mod sessions;

use anyhow::Result;
use coachcal_core::config::CoachCalConfig;
use coachcal_core::{CalendarFeed, LoadReport, SharedBuffer, shared_buffer};
use owo_colors::OwoColorize;

use crate::render::TerminalSurface;
use crate::utils::with_spinner;

pub type Calendar = (CalendarFeed<TerminalSurface>, SharedBuffer<TerminalSurface>);

/// Open the configured source and a terminal calendar bound to it.
pub fn open_calendar(config: &CoachCalConfig) -> Result<Calendar> {
    let tz = config.timezone()?;
    let buffer = shared_buffer(TerminalSurface::new(tz));
    let feed = CalendarFeed::new(config.source.open()?, tz, &buffer);
    Ok((feed, buffer))
}

/// Load the coach's calendar behind a spinner and make it ready to show.
pub async fn load_calendar(config: &CoachCalConfig, coach_id: &str) -> Result<(Calendar, LoadReport)> {
    let (feed, buffer) = open_calendar(config)?;

    let report = with_spinner("Loading training sessions", feed.reload(coach_id)).await?;
    buffer.borrow_mut().become_ready();
    Ok(((feed, buffer), report))
}

/// Lines warning about what didn't make it onto the calendar.
pub fn load_warnings(report: &LoadReport) -> Vec<String> {
    let mut lines = Vec::new();

    for failure in &report.failed_groups {
        lines.push(format!("Could not load group {}: {}", failure.group_id, failure.error));
    }
    match report.dropped {
        0 => {}
        1 => lines.push("Skipped 1 session with an unreadable date or time".to_string()),
        n => lines.push(format!("Skipped {n} sessions with an unreadable date or time")),
    }

    lines
}

pub fn print_load_warnings(report: &LoadReport) {
    for line in load_warnings(report) {
        eprintln!("{}", line.yellow());
    }
}
