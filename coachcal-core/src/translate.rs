//! Session-to-event translation.
//!
//! Every step returns an `Option`; a `None` anywhere drops that one session
//! from the batch. Nothing here panics on bad rows.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tracing::warn;

use crate::constants::DEFAULT_SESSION_NAME;
use crate::duration::{default_session_duration, parse_session_duration};
use crate::event::{CalendarEvent, EventMeta};
use crate::session::{Group, RawSession};

/// Parse the date part of `YYYY-MM-DD`, ignoring any trailing time
/// (`2025-08-19T00:00:00` or `2025-08-19 00:00:00`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_only = raw.split(['T', ' ']).next()?;
    let mut parts = date_only.split('-');

    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `HH[:MM[:SS]]`. Missing or non-numeric components read as 0, so
/// only out-of-range values (`25:00`) fail.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.split(':');
    let hours = leading_number(parts.next());
    let minutes = leading_number(parts.next());
    let seconds = leading_number(parts.next());

    NaiveTime::from_hms_opt(hours, minutes, seconds)
}

/// Digits at the start of a component; `"08abc"` is 8, `"abc"` is 0.
fn leading_number(part: Option<&str>) -> u32 {
    let Some(part) = part else {
        return 0;
    };
    let trimmed = part.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    match &trimmed[..end] {
        "" => 0,
        // Too large for any clock field; let range validation reject it.
        digits => digits.parse().unwrap_or(u32::MAX),
    }
}

/// Resolve a wall-clock time in `tz` to an instant.
///
/// Times skipped by a DST transition don't exist and return `None`.
/// Repeated times resolve to the earlier instant.
pub fn local_instant<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::new(date, time);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// `"<group> - <session name or Training>[ @ <venue>]"`
pub fn compose_title(group: &Group, session: &RawSession) -> String {
    let name = session
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_SESSION_NAME);

    match session.venue.as_deref().filter(|v| !v.is_empty()) {
        Some(venue) => format!("{} - {} @ {}", group.name, name, venue),
        None => format!("{} - {}", group.name, name),
    }
}

/// Start instant of a session, or `None` if its date or time is unusable.
pub fn session_start<Tz: TimeZone>(tz: &Tz, session: &RawSession) -> Option<DateTime<Utc>> {
    let date = parse_date(session.date.as_deref()?)?;
    let time = parse_time(session.start_time.as_deref()?)?;
    local_instant(tz, date, time)
}

/// Translate one session into a calendar event, or `None` to drop it.
pub fn translate<Tz: TimeZone>(session: &RawSession, group: &Group, tz: &Tz) -> Option<CalendarEvent> {
    let Some(start) = session_start(tz, session) else {
        warn!(
            session_id = %session.id,
            date = ?session.date,
            start_time = ?session.start_time,
            "Dropping training session with invalid date/time"
        );
        return None;
    };

    let duration = parse_session_duration(session.duration.as_deref());
    let end = start
        .checked_add_signed(duration)
        .or_else(|| start.checked_add_signed(default_session_duration()))?;

    Some(CalendarEvent {
        id: session.id.clone(),
        title: compose_title(group, session),
        start,
        end,
        meta: EventMeta {
            group_id: group.id.clone(),
            session_id: session.id.clone(),
            venue: session.venue.clone(),
        },
    })
}

/// Result of translating a batch of sessions.
#[derive(Debug, Default)]
pub struct Translation {
    pub events: Vec<CalendarEvent>,
    pub dropped: usize,
}

/// Translate every (group, session) pair, keeping input order.
pub fn translate_all<'a, Tz, I>(pairs: I, tz: &Tz) -> Translation
where
    Tz: TimeZone,
    I: IntoIterator<Item = (&'a Group, &'a RawSession)>,
{
    let mut translation = Translation::default();

    for (group, session) in pairs {
        match translate(session, group, tz) {
            Some(event) => translation.events.push(event),
            None => translation.dropped += 1,
        }
    }

    translation
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use chrono_tz::Tz;

    fn session(date: Option<&str>, start: Option<&str>, duration: Option<&str>) -> RawSession {
        RawSession {
            id: "s1".into(),
            group_id: "g1".into(),
            date: date.map(String::from),
            start_time: start.map(String::from),
            duration: duration.map(String::from),
            name: None,
            venue: None,
            created_at: None,
        }
    }

    fn alpha() -> Group {
        Group::new("g1", "Alpha")
    }

    // --- parse_date ---

    #[test]
    fn date_plain() {
        assert_eq!(parse_date("2025-08-19"), NaiveDate::from_ymd_opt(2025, 8, 19));
    }

    #[test]
    fn date_strips_time_component() {
        assert_eq!(parse_date("2025-08-19T10:00:00Z"), NaiveDate::from_ymd_opt(2025, 8, 19));
        assert_eq!(parse_date("2025-08-19 10:00:00"), NaiveDate::from_ymd_opt(2025, 8, 19));
    }

    #[test]
    fn date_out_of_range_is_rejected() {
        assert_eq!(parse_date("2025-01-32"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date("2025-02-29"), None);
    }

    #[test]
    fn date_malformed_is_rejected() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2025-08"), None);
        assert_eq!(parse_date("19/08/2025"), None);
        assert_eq!(parse_date("2025-aa-19"), None);
        assert_eq!(parse_date("2025-08-19-01"), None);
    }

    // --- parse_time ---

    #[test]
    fn time_with_and_without_seconds() {
        assert_eq!(parse_time("11:11:05"), NaiveTime::from_hms_opt(11, 11, 5));
        assert_eq!(parse_time("07:30"), NaiveTime::from_hms_opt(7, 30, 0));
        assert_eq!(parse_time("9"), NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn time_non_numeric_components_read_as_zero() {
        assert_eq!(parse_time("abc"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_time("10:xx:15"), NaiveTime::from_hms_opt(10, 0, 15));
        assert_eq!(parse_time("08abc:15"), NaiveTime::from_hms_opt(8, 15, 0));
    }

    #[test]
    fn time_out_of_range_is_rejected() {
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("10:61"), None);
        assert_eq!(parse_time("99999999999:00"), None);
    }

    // --- local_instant ---

    #[test]
    fn instant_in_utc_keeps_components() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 19).unwrap();
        let time = NaiveTime::from_hms_opt(11, 11, 5).unwrap();
        let start = local_instant(&Utc, date, time).unwrap();

        assert_eq!((start.year(), start.month(), start.day()), (2025, 8, 19));
        assert_eq!((start.hour(), start.minute(), start.second()), (11, 11, 5));
    }

    #[test]
    fn instant_in_zone_keeps_wall_clock_components() {
        let tz: Tz = "Europe/Zagreb".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 8, 19).unwrap();
        let time = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
        let start = local_instant(&tz, date, time).unwrap();

        let local = start.with_timezone(&tz);
        assert_eq!((local.hour(), local.minute()), (18, 0));
        // CEST is UTC+2
        assert_eq!(start.hour(), 16);
    }

    #[test]
    fn instant_in_dst_gap_is_rejected() {
        let tz: Tz = "Europe/Zagreb".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();

        assert!(local_instant(&tz, date, time).is_none());
    }

    #[test]
    fn instant_in_dst_overlap_takes_earlier() {
        let tz: Tz = "Europe/Zagreb".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 10, 26).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let start = local_instant(&tz, date, time).unwrap();

        // Still on CEST (UTC+2) for the first 02:30
        assert_eq!(start.hour(), 0);
    }

    // --- compose_title ---

    #[test]
    fn title_defaults_session_name_and_appends_venue() {
        let mut s = session(Some("2025-08-19"), Some("10:00"), None);
        s.venue = Some("Gym X".into());
        assert_eq!(compose_title(&alpha(), &s), "Alpha - Training @ Gym X");
    }

    #[test]
    fn title_without_venue() {
        let s = session(Some("2025-08-19"), Some("10:00"), None);
        assert_eq!(compose_title(&alpha(), &s), "Alpha - Training");
    }

    #[test]
    fn title_treats_empty_strings_as_absent() {
        let mut s = session(Some("2025-08-19"), Some("10:00"), None);
        s.name = Some(String::new());
        s.venue = Some(String::new());
        assert_eq!(compose_title(&alpha(), &s), "Alpha - Training");
    }

    #[test]
    fn title_uses_session_name() {
        let mut s = session(Some("2025-08-19"), Some("10:00"), None);
        s.name = Some("Leg day".into());
        assert_eq!(compose_title(&alpha(), &s), "Alpha - Leg day");
    }

    // --- translate ---

    #[test]
    fn translate_fills_event_from_session() {
        let mut s = session(Some("2025-08-19"), Some("11:11:00"), Some("02:03:00"));
        s.venue = Some("Gym X".into());
        let event = translate(&s, &alpha(), &Utc).unwrap();

        assert_eq!(event.id, "s1");
        assert_eq!(event.meta.session_id, "s1");
        assert_eq!(event.meta.group_id, "g1");
        assert_eq!(event.meta.venue.as_deref(), Some("Gym X"));
        assert_eq!(event.start.to_rfc3339(), "2025-08-19T11:11:00+00:00");
        assert_eq!(event.end.to_rfc3339(), "2025-08-19T13:14:00+00:00");
    }

    #[test]
    fn translate_default_duration_is_one_hour() {
        let event = translate(&session(Some("2025-08-19"), Some("10:00"), None), &alpha(), &Utc).unwrap();
        assert_eq!((event.end - event.start).num_seconds(), 3600);
    }

    #[test]
    fn translate_duration_formats() {
        let cases = [("PT1H30M", 5400), ("02:15:00", 8100), ("badvalue", 3600)];
        for (duration, expected) in cases {
            let s = session(Some("2025-08-19"), Some("10:00"), Some(duration));
            let event = translate(&s, &alpha(), &Utc).unwrap();
            assert_eq!(event.duration().num_seconds(), expected, "duration {duration}");
        }
    }

    #[test]
    fn translate_drops_invalid_date_or_time() {
        let bad = [
            session(Some("2025-01-32"), Some("10:00"), None),
            session(Some("not a date"), Some("10:00"), None),
            session(Some("2025-08-19"), Some("24:30"), None),
            session(None, Some("10:00"), None),
            session(Some("2025-08-19"), None, None),
        ];
        for s in &bad {
            assert!(translate(s, &alpha(), &Utc).is_none(), "{s:?}");
        }
    }

    #[test]
    fn translate_all_counts_drops_and_keeps_order() {
        let group = alpha();
        let mut first = session(Some("2025-08-19"), Some("10:00"), None);
        first.id = "a".into();
        let broken = session(Some("2025-08-40"), Some("10:00"), None);
        let mut second = session(Some("2025-08-18"), Some("09:00"), None);
        second.id = "b".into();

        let sessions = [first, broken, second];
        let translation = translate_all(sessions.iter().map(|s| (&group, s)), &Utc);

        assert_eq!(translation.dropped, 1);
        let ids: Vec<_> = translation.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
