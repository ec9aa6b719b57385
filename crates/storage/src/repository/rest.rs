use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkoutRepository;
use crate::dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest};
use crate::error::{Result, StorageError};
use crate::models::WorkoutLog;

pub const DEFAULT_TABLE: &str = "workout_logs";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a PostgREST endpoint (e.g. a Supabase project)
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Error body PostgREST sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Insert body: the caller's payload plus the owner id
#[derive(Serialize)]
struct NewRow<'a> {
    user_id: Uuid,
    #[serde(flatten)]
    payload: &'a CreateWorkoutRequest,
}

/// Workout repository talking to a hosted table through PostgREST
pub struct RestWorkoutRepository {
    client: Client,
    endpoint: String,
    api_key: String,
    owner_id: Uuid,
}

impl RestWorkoutRepository {
    pub fn new(config: RestConfig, owner_id: Uuid) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
            owner_id,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn owner_filter(&self) -> (&'static str, String) {
        ("user_id", format!("eq.{}", self.owner_id))
    }

    /// Send the request and decode the returned rows
    async fn fetch_rows(&self, builder: RequestBuilder) -> Result<Vec<WorkoutLog>> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(backend_error(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Like `fetch_rows` for writes that must touch exactly one row
    async fn fetch_one(&self, builder: RequestBuilder) -> Result<WorkoutLog> {
        self.fetch_rows(builder)
            .await?
            .into_iter()
            .next()
            .ok_or(StorageError::NotFound)
    }
}

#[async_trait]
impl WorkoutRepository for RestWorkoutRepository {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    async fn list(&self) -> Result<Vec<WorkoutLog>> {
        let request = self.request(Method::GET).query(&[
            ("select", "*".to_string()),
            self.owner_filter(),
            ("order", "workout_date.desc,created_at.desc".to_string()),
        ]);

        let workouts = self.fetch_rows(request).await?;
        tracing::debug!(owner_id = %self.owner_id, count = workouts.len(), "listed workouts");

        Ok(workouts)
    }

    async fn create(&self, req: &CreateWorkoutRequest) -> Result<WorkoutLog> {
        let request = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&NewRow {
                user_id: self.owner_id,
                payload: req,
            });

        let workout = self.fetch_one(request).await?;
        tracing::debug!(id = %workout.id, "created workout");

        Ok(workout)
    }

    async fn update(&self, id: Uuid, req: &UpdateWorkoutRequest) -> Result<WorkoutLog> {
        if req.is_empty() {
            return Err(StorageError::InvalidRequest(
                "update requires at least one field".to_string(),
            ));
        }

        let request = self
            .request(Method::PATCH)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id)), self.owner_filter()])
            .json(req);

        let workout = self.fetch_one(request).await?;
        tracing::debug!(id = %workout.id, "updated workout");

        Ok(workout)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // PostgREST answers 2xx even when the filter matched nothing, so ask
        // for the deleted rows to tell a miss apart.
        let request = self
            .request(Method::DELETE)
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id)), self.owner_filter()]);

        self.fetch_one(request).await?;
        tracing::debug!(%id, "deleted workout");

        Ok(())
    }
}

fn backend_error(status: u16, body: &str) -> StorageError {
    let message = match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = err.message;
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message = format!("{} ({})", message, details);
            }
            if let Some(code) = err.code {
                tracing::debug!(status, %code, "backend rejected request");
            }
            message
        }
        Err(_) if body.trim().is_empty() => format!("empty response with status {}", status),
        Err(_) => body.trim().to_string(),
    };

    StorageError::Backend { status, message }
}
