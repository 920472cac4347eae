//! In-memory session source for unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{CoachCalError, CoachCalResult};
use crate::session::{Group, NewSession, RawSession};
use crate::source::SessionSource;

pub(crate) const COACH: &str = "c1";

pub(crate) fn raw_session(id: &str, group_id: &str, date: &str, start: &str) -> RawSession {
    RawSession {
        id: id.into(),
        group_id: group_id.into(),
        date: Some(date.into()),
        start_time: Some(start.into()),
        duration: None,
        name: None,
        venue: None,
        created_at: None,
    }
}

#[derive(Default)]
pub(crate) struct StubSource {
    pub groups: Vec<Group>,
    pub sessions: Mutex<Vec<RawSession>>,
    failing_groups: HashSet<String>,
    fail_listing: bool,
    fail_writes: bool,
    /// When set, session fetches wait for a notification before returning.
    pub gate: Option<Arc<Notify>>,
    next_id: Mutex<u32>,
}

impl StubSource {
    pub fn new() -> Self {
        StubSource::default()
    }

    pub fn with_group(mut self, id: &str, name: &str) -> Self {
        let mut group = Group::new(id, name);
        group.coach_id = Some(COACH.into());
        self.groups.push(group);
        self
    }

    pub fn with_session(self, session: RawSession) -> Self {
        self.sessions.lock().unwrap().push(session);
        self
    }

    pub fn failing_group(mut self, group_id: &str) -> Self {
        self.failing_groups.insert(group_id.into());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl SessionSource for StubSource {
    async fn groups_for_coach(&self, coach_id: &str) -> CoachCalResult<Vec<Group>> {
        if self.fail_listing {
            return Err(CoachCalError::Source("groups unavailable".into()));
        }
        Ok(self
            .groups
            .iter()
            .filter(|g| g.coach_id.as_deref() == Some(coach_id))
            .cloned()
            .collect())
    }

    async fn sessions_for_group(&self, group_id: &str) -> CoachCalResult<Vec<RawSession>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.failing_groups.contains(group_id) {
            return Err(CoachCalError::Source(format!("timeout for {group_id}")));
        }
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn create_session(&self, session: &NewSession) -> CoachCalResult<RawSession> {
        if self.fail_writes {
            return Err(CoachCalError::Source("insert rejected".into()));
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            format!("new-{}", *next)
        };
        let created = session.clone().into_raw(id, None);
        self.sessions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_session(&self, session_id: &str) -> CoachCalResult<()> {
        if self.fail_writes {
            return Err(CoachCalError::Source("delete rejected".into()));
        }
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id != session_id);
        if sessions.len() == before {
            return Err(CoachCalError::SessionNotFound(session_id.into()));
        }
        Ok(())
    }
}
