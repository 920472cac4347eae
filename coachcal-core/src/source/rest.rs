//! Hosted database access over its PostgREST interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::constants::{GROUPS_TABLE, SESSIONS_TABLE};
use crate::error::{CoachCalError, CoachCalResult};
use crate::session::{Group, NewSession, RawSession};
use crate::source::SessionSource;

/// HTTP client for the `groups` and `training_sessions` tables.
pub struct RestSource {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl RestSource {
    /// `timeout` bounds each request; `None` leaves requests unbounded.
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> CoachCalResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(RestSource {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/rest/v1/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> CoachCalResult<T> {
        let resp = request.send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.json().await?)
    }

    async fn check_status(resp: Response) -> CoachCalResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(body);

        Err(CoachCalError::Source(format!("{status}: {detail}")))
    }
}

#[async_trait]
impl SessionSource for RestSource {
    async fn groups_for_coach(&self, coach_id: &str) -> CoachCalResult<Vec<Group>> {
        let request = self
            .request(Method::GET, GROUPS_TABLE)
            .query(&[("select", "*".to_string()), ("coach_id", format!("eq.{coach_id}"))]);

        Self::send_json(request).await
    }

    async fn sessions_for_group(&self, group_id: &str) -> CoachCalResult<Vec<RawSession>> {
        let request = self.request(Method::GET, SESSIONS_TABLE).query(&[
            ("select", "*".to_string()),
            ("group_id", format!("eq.{group_id}")),
            ("order", "date.asc".to_string()),
        ]);

        let sessions: Vec<RawSession> = Self::send_json(request).await?;
        debug!(group_id, count = sessions.len(), "Fetched training sessions");
        Ok(sessions)
    }

    async fn create_session(&self, session: &NewSession) -> CoachCalResult<RawSession> {
        let request = self
            .request(Method::POST, SESSIONS_TABLE)
            .header("Prefer", "return=representation")
            .json(&[session]);

        let created: Vec<RawSession> = Self::send_json(request).await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| CoachCalError::Source("Insert returned no rows".into()))
    }

    async fn delete_session(&self, session_id: &str) -> CoachCalResult<()> {
        let request = self
            .request(Method::DELETE, SESSIONS_TABLE)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{session_id}"))]);

        let deleted: Vec<RawSession> = Self::send_json(request).await?;
        if deleted.is_empty() {
            return Err(CoachCalError::SessionNotFound(session_id.to_string()));
        }
        Ok(())
    }
}
