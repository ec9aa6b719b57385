pub mod postgres;
pub mod rest;

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest};
use crate::error::Result;
use crate::models::WorkoutLog;

pub use postgres::PgWorkoutRepository;
pub use rest::{RestConfig, RestWorkoutRepository};

/// Owner-scoped access to the workout log table.
///
/// Every operation is a single round trip to the backend and is filtered by
/// the owner id the repository was constructed with.
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Owner every query is scoped to
    fn owner_id(&self) -> Uuid;

    /// List the owner's workouts, most recent `workout_date` first
    async fn list(&self) -> Result<Vec<WorkoutLog>>;

    /// Insert a workout for the owner and return the stored row
    async fn create(&self, req: &CreateWorkoutRequest) -> Result<WorkoutLog>;

    /// Patch one of the owner's workouts
    async fn update(&self, id: Uuid, req: &UpdateWorkoutRequest) -> Result<WorkoutLog>;

    /// Delete one of the owner's workouts
    async fn delete(&self, id: Uuid) -> Result<()>;
}
