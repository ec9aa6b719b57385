use chrono::NaiveDate;
use storage::{dto::workout::CreateWorkoutRequest, models::WorkoutLog};
use thiserror::Error;
use validator::Validate;

use crate::store::{StoreError, WorkoutStore};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Please enter a valid duration in minutes (got {0:?})")]
    InvalidDuration(String),

    #[error("Date must be formatted as YYYY-MM-DD (got {0:?})")]
    InvalidDate(String),

    #[error("Nothing to update: pass at least one field to change")]
    EmptyPatch,

    #[error("Validation failed: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw input of the add form, exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddForm {
    pub date: String,
    pub workout_type: String,
    pub duration: String,
    pub intensity: String,
    pub notes: String,
}

impl AddForm {
    /// Form pre-filled the way the screen opens: a 30 minute medium
    /// strength session today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            workout_type: "strength".to_string(),
            duration: "30".to_string(),
            intensity: "medium".to_string(),
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<CreateWorkoutRequest, FormError> {
        let duration_min = parse_duration(&self.duration)?;
        let workout_date = parse_date(&self.date)?;
        let notes = self.notes.trim();

        let request = CreateWorkoutRequest {
            workout_date,
            workout_type: self.workout_type.trim().to_string(),
            duration_min,
            intensity: self.intensity.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        };
        request.validate()?;

        Ok(request)
    }

    /// Validate locally, then hand the payload to the store
    pub async fn submit(&self, store: &WorkoutStore) -> Result<WorkoutLog, SubmitError> {
        let request = self.validate()?;
        Ok(store.add_workout(&request).await?)
    }
}

pub fn parse_duration(raw: &str) -> Result<i32, FormError> {
    match raw.trim().parse::<i32>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(FormError::InvalidDuration(raw.to_string())),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, FormError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FormError::InvalidDate(raw.to_string()))
}
