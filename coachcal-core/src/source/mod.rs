//! Data sources for groups and training sessions.
//!
//! The calendar pipeline never talks to storage directly; it goes through a
//! [`SessionSource`]. Two are provided: [`RestSource`] for the hosted
//! database and [`FileSource`] for a local JSON file.

mod file;
mod rest;

pub use file::FileSource;
pub use rest::RestSource;

use async_trait::async_trait;

use crate::error::CoachCalResult;
use crate::session::{Group, NewSession, RawSession};

#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Groups owned by a coach.
    async fn groups_for_coach(&self, coach_id: &str) -> CoachCalResult<Vec<Group>>;

    /// Sessions of one group, ordered by date ascending.
    async fn sessions_for_group(&self, group_id: &str) -> CoachCalResult<Vec<RawSession>>;

    /// Store a new session and return it as stored.
    async fn create_session(&self, session: &NewSession) -> CoachCalResult<RawSession>;

    async fn delete_session(&self, session_id: &str) -> CoachCalResult<()>;
}
