use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{INTENSITIES, WORKOUT_TYPES};

/// Request payload for creating a new workout log.
///
/// The owner id, row id and creation timestamp are assigned by the
/// repository and the backend, never by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateWorkoutRequest {
    pub workout_date: NaiveDate,

    #[validate(custom(function = "validate_workout_type"))]
    pub workout_type: String,

    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    pub duration_min: i32,

    #[validate(custom(function = "validate_intensity"))]
    pub intensity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

/// Request payload for patching an existing workout log.
///
/// Absent fields are left untouched. `notes` is tri-state: `None` keeps the
/// stored notes, `Some(None)` clears them, `Some(Some(_))` replaces them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_workout_type"))]
    pub workout_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, message = "Duration must be a positive number of minutes"))]
    pub duration_min: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_intensity"))]
    pub intensity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<Option<String>>,
}

impl UpdateWorkoutRequest {
    pub fn is_empty(&self) -> bool {
        self.workout_date.is_none()
            && self.workout_type.is_none()
            && self.duration_min.is_none()
            && self.intensity.is_none()
            && self.notes.is_none()
    }
}

fn validate_workout_type(workout_type: &str) -> Result<(), validator::ValidationError> {
    if WORKOUT_TYPES.contains(&workout_type) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_workout_type"))
    }
}

fn validate_intensity(intensity: &str) -> Result<(), validator::ValidationError> {
    if INTENSITIES.contains(&intensity) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_intensity"))
    }
}
