//! Training-session records as the data source stores them.
//!
//! These are read-only to the calendar pipeline: they come back from a
//! [`SessionSource`](crate::source::SessionSource) and are translated into
//! [`CalendarEvent`](crate::event::CalendarEvent)s.

use serde::{Deserialize, Serialize};

/// A client group owned by a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach_id: Option<String>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Group {
            id: id.into(),
            name: name.into(),
            capacity: None,
            coach_id: None,
        }
    }
}

/// An unparsed training session row.
///
/// `date` and `start_time` are optional only because rows can come back
/// with nulls; the translator drops such rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSession {
    pub id: String,
    pub group_id: String,
    /// `YYYY-MM-DD`, possibly followed by a time component.
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM[:SS]`, 24-hour.
    #[serde(default)]
    pub start_time: Option<String>,
    /// ISO-8601 (`PT1H30M`) or clock (`01:30:00`) duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "gym", skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Input for creating a training session.
///
/// Field names match the `training_sessions` columns so the value can be
/// posted as-is once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub group_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "gym", skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    pub date: String,
    pub start_time: String,
    pub duration: String,
}

impl NewSession {
    /// Build a session from the stored representation of a creation request.
    /// Used by sources that assign ids themselves.
    pub fn into_raw(self, id: String, created_at: Option<String>) -> RawSession {
        RawSession {
            id,
            group_id: self.group_id,
            date: Some(self.date),
            start_time: Some(self.start_time),
            duration: Some(self.duration),
            name: self.name,
            venue: self.venue,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_session_reads_gym_column_as_venue() {
        let json = r#"{
            "id": "s1",
            "group_id": "g1",
            "date": "2025-08-19",
            "start_time": "11:11:00",
            "duration": "02:03:00",
            "name": "Legs",
            "gym": "Gym X",
            "created_at": "2025-08-01T10:00:00+00:00"
        }"#;

        let session: RawSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.venue.as_deref(), Some("Gym X"));
        assert_eq!(session.duration.as_deref(), Some("02:03:00"));
    }

    #[test]
    fn raw_session_tolerates_null_date_and_time() {
        let json = r#"{"id": "s1", "group_id": "g1", "date": null, "start_time": null}"#;

        let session: RawSession = serde_json::from_str(json).unwrap();
        assert!(session.date.is_none());
        assert!(session.start_time.is_none());
        assert!(session.duration.is_none());
    }

    #[test]
    fn group_ignores_unknown_columns() {
        let json = r#"{"id": "g1", "name": "Alpha", "capacity": 12, "coach_id": "c1", "created_at": "x"}"#;

        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.capacity, Some(12));
        assert_eq!(group.coach_id.as_deref(), Some("c1"));
    }

    #[test]
    fn new_session_serializes_venue_as_gym() {
        let new = NewSession {
            group_id: "g1".into(),
            name: None,
            venue: Some("Gym X".into()),
            date: "2025-08-19".into(),
            start_time: "11:11:00".into(),
            duration: "01:00:00".into(),
        };

        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["gym"], "Gym X");
        assert!(value.get("name").is_none());
    }
}
