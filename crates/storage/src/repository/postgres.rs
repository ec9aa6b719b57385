use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::WorkoutRepository;
use crate::dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest};
use crate::error::{Result, StorageError};
use crate::models::WorkoutLog;

/// Workout repository talking to the `workout_logs` table over Postgres
#[derive(Clone)]
pub struct PgWorkoutRepository {
    pool: PgPool,
    owner_id: Uuid,
}

impl PgWorkoutRepository {
    pub fn new(pool: PgPool, owner_id: Uuid) -> Self {
        Self { pool, owner_id }
    }
}

#[async_trait]
impl WorkoutRepository for PgWorkoutRepository {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    async fn list(&self) -> Result<Vec<WorkoutLog>> {
        let workouts = sqlx::query_as::<_, WorkoutLog>(
            r#"
            SELECT id, user_id, workout_date, workout_type, duration_min,
                   intensity, notes, created_at
            FROM workout_logs
            WHERE user_id = $1
            ORDER BY workout_date DESC, created_at DESC
            "#,
        )
        .bind(self.owner_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(owner_id = %self.owner_id, count = workouts.len(), "listed workouts");

        Ok(workouts)
    }

    async fn create(&self, req: &CreateWorkoutRequest) -> Result<WorkoutLog> {
        let workout = sqlx::query_as::<_, WorkoutLog>(
            r#"
            INSERT INTO workout_logs (user_id, workout_date, workout_type, duration_min, intensity, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, workout_date, workout_type, duration_min,
                      intensity, notes, created_at
            "#,
        )
        .bind(self.owner_id)
        .bind(req.workout_date)
        .bind(&req.workout_type)
        .bind(req.duration_min)
        .bind(&req.intensity)
        .bind(req.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %workout.id, "created workout");

        Ok(workout)
    }

    async fn update(&self, id: Uuid, req: &UpdateWorkoutRequest) -> Result<WorkoutLog> {
        if req.is_empty() {
            return Err(StorageError::InvalidRequest(
                "update requires at least one field".to_string(),
            ));
        }

        // $7 tells whether notes were part of the patch, so NULL can clear them
        let workout = sqlx::query_as::<_, WorkoutLog>(
            r#"
            UPDATE workout_logs
            SET workout_date = COALESCE($3, workout_date),
                workout_type = COALESCE($4, workout_type),
                duration_min = COALESCE($5, duration_min),
                intensity = COALESCE($6, intensity),
                notes = CASE WHEN $7 THEN $8 ELSE notes END
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, workout_date, workout_type, duration_min,
                      intensity, notes, created_at
            "#,
        )
        .bind(id)
        .bind(self.owner_id)
        .bind(req.workout_date)
        .bind(req.workout_type.as_deref())
        .bind(req.duration_min)
        .bind(req.intensity.as_deref())
        .bind(req.notes.is_some())
        .bind(req.notes.as_ref().and_then(|notes| notes.as_deref()))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        tracing::debug!(id = %workout.id, "updated workout");

        Ok(workout)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM workout_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(self.owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        tracing::debug!(%id, "deleted workout");

        Ok(())
    }
}
