//! Local JSON store, for working offline.
//!
//! The file holds `{ "groups": [...], "sessions": [...] }` in the same shape
//! the hosted tables use, and is re-read on every call.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CoachCalError, CoachCalResult};
use crate::session::{Group, NewSession, RawSession};
use crate::source::SessionSource;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Store {
    #[serde(default)]
    groups: Vec<Group>,
    #[serde(default)]
    sessions: Vec<RawSession>,
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> CoachCalResult<Store> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Store::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, store: &Store) -> CoachCalResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(store)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionSource for FileSource {
    async fn groups_for_coach(&self, coach_id: &str) -> CoachCalResult<Vec<Group>> {
        let store = self.load().await?;
        Ok(store
            .groups
            .into_iter()
            .filter(|g| g.coach_id.as_deref() == Some(coach_id))
            .collect())
    }

    async fn sessions_for_group(&self, group_id: &str) -> CoachCalResult<Vec<RawSession>> {
        let store = self.load().await?;
        let mut sessions: Vec<RawSession> = store
            .sessions
            .into_iter()
            .filter(|s| s.group_id == group_id)
            .collect();

        sessions.sort_by(|a, b| {
            (a.date.as_deref(), a.start_time.as_deref())
                .cmp(&(b.date.as_deref(), b.start_time.as_deref()))
        });
        Ok(sessions)
    }

    async fn create_session(&self, session: &NewSession) -> CoachCalResult<RawSession> {
        let mut store = self.load().await?;
        if !store.groups.iter().any(|g| g.id == session.group_id) {
            return Err(CoachCalError::UnknownGroup(session.group_id.clone()));
        }

        let created = session.clone().into_raw(
            uuid::Uuid::new_v4().to_string(),
            Some(chrono::Utc::now().to_rfc3339()),
        );
        store.sessions.push(created.clone());
        self.save(&store).await?;

        Ok(created)
    }

    async fn delete_session(&self, session_id: &str) -> CoachCalResult<()> {
        let mut store = self.load().await?;
        let Some(index) = store.sessions.iter().position(|s| s.id == session_id) else {
            return Err(CoachCalError::SessionNotFound(session_id.to_string()));
        };

        store.sessions.remove(index);
        self.save(&store).await
    }
}
