use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Workout types the add form offers. Storage accepts any string.
pub const WORKOUT_TYPES: [&str; 5] = ["strength", "cardio", "yoga", "hiit", "other"];

/// Intensity levels the add form offers. Storage accepts any string.
pub const INTENSITIES: [&str; 3] = ["low", "medium", "high"];

/// Workout log representation matching the `workout_logs` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_date: NaiveDate,
    pub workout_type: String,
    pub duration_min: i32,
    pub intensity: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
