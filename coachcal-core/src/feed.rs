//! The coach calendar feed: fetch, translate, present.
//!
//! [`CalendarFeed`] ties a [`SessionSource`] to a [`PresentationBuffer`]
//! for the three user actions: loading the calendar, creating a session
//! and deleting one. The view owns the buffer; the feed only holds a weak
//! handle, so results that arrive after the view is gone are dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::buffer::{CalendarSurface, PresentationBuffer};
use crate::error::{CoachCalError, CoachCalResult};
use crate::event::CalendarEvent;
use crate::fetch::{GroupFetchFailure, fetch_sessions};
use crate::session::{Group, NewSession, RawSession};
use crate::source::SessionSource;
use crate::translate::{translate, translate_all};

/// Buffer shared between a view and its feed.
pub type SharedBuffer<V> = Rc<RefCell<PresentationBuffer<V>>>;

pub fn shared_buffer<V: CalendarSurface>(surface: V) -> SharedBuffer<V> {
    Rc::new(RefCell::new(PresentationBuffer::new(surface)))
}

/// Outcome of a full calendar load.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub groups: usize,
    pub events: usize,
    /// Sessions skipped because their date or time was unusable.
    pub dropped: usize,
    pub failed_groups: Vec<GroupFetchFailure>,
    /// The view was torn down before the load finished.
    pub discarded: bool,
}

/// Outcome of creating a session.
#[derive(Debug)]
pub struct CreatedSession {
    pub session: RawSession,
    /// The event appended to the calendar, if the session could be placed.
    pub event: Option<CalendarEvent>,
    /// The session's group wasn't loaded, so the whole calendar was reloaded.
    pub reloaded: bool,
    /// Why the calendar could not be reloaded for a group that wasn't loaded.
    pub reload_error: Option<CoachCalError>,
}

pub struct CalendarFeed<V: CalendarSurface> {
    source: Box<dyn SessionSource>,
    tz: Tz,
    buffer: Weak<RefCell<PresentationBuffer<V>>>,
    groups: RefCell<Vec<Group>>,
    coach_id: RefCell<Option<String>>,
}

impl<V: CalendarSurface> CalendarFeed<V> {
    pub fn new(source: Box<dyn SessionSource>, tz: Tz, buffer: &SharedBuffer<V>) -> Self {
        CalendarFeed {
            source,
            tz,
            buffer: Rc::downgrade(buffer),
            groups: RefCell::new(Vec::new()),
            coach_id: RefCell::new(None),
        }
    }

    pub fn source(&self) -> &dyn SessionSource {
        self.source.as_ref()
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Groups from the most recent load.
    pub fn groups(&self) -> Vec<Group> {
        self.groups.borrow().clone()
    }

    /// Load every group of `coach_id` and replace the calendar contents.
    ///
    /// Fails only if the group list itself can't be fetched; failures of
    /// individual groups are reported in [`LoadReport::failed_groups`].
    pub async fn reload(&self, coach_id: &str) -> CoachCalResult<LoadReport> {
        let groups = self.source.groups_for_coach(coach_id).await?;
        *self.coach_id.borrow_mut() = Some(coach_id.to_string());
        *self.groups.borrow_mut() = groups.clone();

        let fetched = fetch_sessions(self.source.as_ref(), &groups).await;
        let translation = translate_all(fetched.pairs(), &self.tz);

        let mut report = LoadReport {
            groups: groups.len(),
            events: translation.events.len(),
            dropped: translation.dropped,
            failed_groups: fetched.failures,
            discarded: false,
        };

        match self.buffer.upgrade() {
            Some(buffer) => buffer.borrow_mut().replace_all(translation.events),
            None => {
                debug!(coach_id, events = report.events, "Calendar torn down, discarding load");
                report.discarded = true;
            }
        }

        info!(
            coach_id,
            groups = report.groups,
            events = report.events,
            dropped = report.dropped,
            failed_groups = report.failed_groups.len(),
            "Loaded training calendar"
        );
        Ok(report)
    }

    /// Create a session and put it on the calendar without a full reload.
    ///
    /// Nothing is added to the calendar if the source rejects the session.
    pub async fn create_session(&self, input: NewSession) -> CoachCalResult<CreatedSession> {
        let input = input.normalized()?;
        let session = self.source.create_session(&input).await?;

        let group = self
            .groups
            .borrow()
            .iter()
            .find(|g| g.id == session.group_id)
            .cloned();

        let Some(group) = group else {
            warn!(group_id = %session.group_id, "Group of new session not loaded, reloading calendar");
            let coach_id = self.coach_id.borrow().clone();
            let reload = match coach_id {
                Some(coach_id) => self.reload(&coach_id).await,
                None => Err(CoachCalError::UnknownGroup(session.group_id.clone())),
            };
            let reload_error = reload.err();
            if let Some(error) = &reload_error {
                warn!(%error, "Reload after session creation failed");
            }
            return Ok(CreatedSession {
                session,
                event: None,
                reloaded: reload_error.is_none(),
                reload_error,
            });
        };

        let event = translate(&session, &group, &self.tz);
        match (&event, self.buffer.upgrade()) {
            (Some(event), Some(buffer)) => buffer.borrow_mut().append_one(event.clone()),
            (Some(event), None) => {
                debug!(event_id = %event.id, "Calendar torn down, discarding new event");
            }
            (None, _) => warn!(session_id = %session.id, "Created session could not be placed on the calendar"),
        }

        Ok(CreatedSession {
            session,
            event,
            reloaded: false,
            reload_error: None,
        })
    }

    /// Delete a session and take it off the calendar.
    ///
    /// Returns whether an event was removed from the calendar.
    pub async fn delete_session(&self, session_id: &str) -> CoachCalResult<bool> {
        self.source.delete_session(session_id).await?;

        Ok(self
            .buffer
            .upgrade()
            .is_some_and(|buffer| buffer.borrow_mut().remove(session_id)))
    }
}
