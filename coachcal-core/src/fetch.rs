//! Concurrent per-group session retrieval.

use futures::future::join_all;
use tracing::warn;

use crate::error::CoachCalError;
use crate::session::{Group, RawSession};
use crate::source::SessionSource;

/// A group whose sessions could not be fetched.
#[derive(Debug)]
pub struct GroupFetchFailure {
    pub group_id: String,
    pub error: CoachCalError,
}

/// Sessions paired with their group, plus the groups that failed.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub sessions: Vec<(Group, RawSession)>,
    pub failures: Vec<GroupFetchFailure>,
}

impl FetchReport {
    pub fn pairs(&self) -> impl Iterator<Item = (&Group, &RawSession)> {
        self.sessions.iter().map(|(g, s)| (g, s))
    }
}

/// Fetch sessions for every group at once.
///
/// A failing group contributes nothing and is recorded in
/// [`FetchReport::failures`]; it never fails the whole fetch. Sessions keep
/// the source's order within each group.
pub async fn fetch_sessions<S>(source: &S, groups: &[Group]) -> FetchReport
where
    S: SessionSource + ?Sized,
{
    let fetches = groups.iter().map(|group| async move {
        let result = source.sessions_for_group(&group.id).await;
        (group, result)
    });

    let mut report = FetchReport::default();
    for (group, result) in join_all(fetches).await {
        match result {
            Ok(sessions) => report
                .sessions
                .extend(sessions.into_iter().map(|s| (group.clone(), s))),
            Err(error) => {
                warn!(group_id = %group.id, %error, "Failed to load sessions for group");
                report.failures.push(GroupFetchFailure {
                    group_id: group.id.clone(),
                    error,
                });
            }
        }
    }

    report
}
