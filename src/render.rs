//! Terminal calendar surface.
//!
//! Keeps the events the presentation buffer pushes to it and renders them
//! as an agenda grouped by day, colored with owo_colors.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use coachcal_core::{CalendarEvent, CalendarSurface};
use owo_colors::OwoColorize;

pub struct TerminalSurface {
    tz: Tz,
    events: Vec<CalendarEvent>,
}

impl TerminalSurface {
    pub fn new(tz: Tz) -> Self {
        TerminalSurface {
            tz,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Render the agenda, marking the event with id `highlight`.
    pub fn render(&self, highlight: Option<&str>) -> String {
        if self.events.is_empty() {
            return "No training sessions".dimmed().to_string();
        }

        let today = Utc::now().with_timezone(&self.tz).date_naive();
        let mut events: Vec<&CalendarEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.start);

        let mut lines = Vec::new();
        let mut current_date: Option<NaiveDate> = None;

        for event in events {
            let date = event.start.with_timezone(&self.tz).date_naive();
            if current_date != Some(date) {
                if current_date.is_some() {
                    lines.push(String::new());
                }
                lines.push(format_date_label(date, today).bold().to_string());
                current_date = Some(date);
            }

            let time = format_time_range(event.start, event.end, &self.tz);
            let line = if highlight == Some(event.id.as_str()) {
                format!("  {} {} {}", time, event.title.green(), "(new)".green())
            } else {
                format!("  {} {}", time, event.title)
            };
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl CalendarSurface for TerminalSurface {
    fn clear_all(&mut self) {
        self.events.clear();
    }

    fn add(&mut self, event: &CalendarEvent) {
        self.events.push(event.clone());
    }

    fn remove(&mut self, event_id: &str) {
        self.events.retain(|e| e.id != event_id);
    }

    fn force_redraw(&mut self) {
        self.events.sort_by_key(|e| e.start);
    }
}

/// "Today", "Tomorrow", or e.g. "Wed Feb 25"
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// "18:00-19:30"; the end carries its date when the event runs past midnight.
fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>, tz: &Tz) -> String {
    let start = start.with_timezone(tz);
    let end = end.with_timezone(tz);

    if start.date_naive() == end.date_naive() {
        format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
    } else {
        format!("{}-{}", start.format("%H:%M"), end.format("%b %-d %H:%M"))
    }
}
