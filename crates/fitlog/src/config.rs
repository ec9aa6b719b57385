use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use storage::{
    Database, PgWorkoutRepository, RestConfig, RestWorkoutRepository, WorkoutRepository,
    repository::rest::{DEFAULT_TABLE, DEFAULT_TIMEOUT},
};
use uuid::Uuid;

/// Owner used when `FITLOG_OWNER_ID` is not set (there is no login).
pub const DEMO_OWNER_ID: Uuid = Uuid::from_u128(1);

#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    Rest {
        url: String,
        api_key: String,
        table: String,
        timeout: Duration,
    },
    Postgres {
        database_url: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    pub owner_id: Uuid,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let owner_id = match var("FITLOG_OWNER_ID") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("FITLOG_OWNER_ID must be a UUID")?,
            None => DEMO_OWNER_ID,
        };

        let backend = match (var("SUPABASE_URL"), var("SUPABASE_ANON_KEY")) {
            (Some(url), Some(api_key)) => {
                let timeout = match var("FITLOG_HTTP_TIMEOUT_SECS") {
                    Some(raw) => Duration::from_secs(
                        raw.trim()
                            .parse()
                            .context("FITLOG_HTTP_TIMEOUT_SECS must be a number")?,
                    ),
                    None => DEFAULT_TIMEOUT,
                };

                BackendConfig::Rest {
                    url,
                    api_key,
                    table: var("FITLOG_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
                    timeout,
                }
            }
            (Some(_), None) => bail!("SUPABASE_URL is set but SUPABASE_ANON_KEY is missing"),
            (None, Some(_)) => bail!("SUPABASE_ANON_KEY is set but SUPABASE_URL is missing"),
            (None, None) => BackendConfig::Postgres {
                database_url: var("DATABASE_URL").context(
                    "No backend configured: set SUPABASE_URL and SUPABASE_ANON_KEY, or DATABASE_URL",
                )?,
            },
        };

        Ok(Self { backend, owner_id })
    }

    /// Open the configured backend and return a repository scoped to the owner
    pub async fn connect(&self) -> Result<Arc<dyn WorkoutRepository>> {
        match &self.backend {
            BackendConfig::Rest {
                url,
                api_key,
                table,
                timeout,
            } => {
                tracing::info!("Using REST backend at {} (table {})", url, table);
                let config = RestConfig {
                    base_url: url.clone(),
                    api_key: api_key.clone(),
                    table: table.clone(),
                    timeout: *timeout,
                };
                let repo = RestWorkoutRepository::new(config, self.owner_id)
                    .context("Failed to build HTTP client")?;
                Ok(Arc::new(repo))
            }
            BackendConfig::Postgres { database_url } => {
                tracing::info!(
                    "Connecting to database at: {}",
                    database_url.split('@').next_back().unwrap_or("unknown")
                );
                let db = Database::new(database_url)
                    .await
                    .context("Failed to initialize database")?;
                db.run_migrations()
                    .await
                    .context("Failed to run migrations")?;
                tracing::debug!("Database migrations completed");

                Ok(Arc::new(PgWorkoutRepository::new(
                    db.pool().clone(),
                    self.owner_id,
                )))
            }
        }
    }
}
