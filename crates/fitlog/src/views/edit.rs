use storage::{dto::workout::UpdateWorkoutRequest, models::WorkoutLog};
use uuid::Uuid;
use validator::Validate;

use super::add::{FormError, SubmitError, parse_date, parse_duration};
use crate::store::WorkoutStore;

/// Raw input for patching a workout; `None` leaves the field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub date: Option<String>,
    pub workout_type: Option<String>,
    pub duration: Option<String>,
    pub intensity: Option<String>,
    pub notes: Option<String>,
    pub clear_notes: bool,
}

impl EditForm {
    pub fn validate(&self) -> Result<UpdateWorkoutRequest, FormError> {
        let notes = if self.clear_notes {
            Some(None)
        } else {
            self.notes.as_deref().map(|notes| {
                let notes = notes.trim();
                (!notes.is_empty()).then(|| notes.to_string())
            })
        };

        let request = UpdateWorkoutRequest {
            workout_date: self.date.as_deref().map(parse_date).transpose()?,
            workout_type: self.workout_type.as_deref().map(|t| t.trim().to_string()),
            duration_min: self.duration.as_deref().map(parse_duration).transpose()?,
            intensity: self.intensity.as_deref().map(|i| i.trim().to_string()),
            notes,
        };
        if request.is_empty() {
            return Err(FormError::EmptyPatch);
        }
        request.validate()?;

        Ok(request)
    }

    /// Validate locally, then patch the workout through the store
    pub async fn submit(&self, store: &WorkoutStore, id: Uuid) -> Result<WorkoutLog, SubmitError> {
        let patch = self.validate()?;
        Ok(store.update_workout(id, &patch).await?)
    }
}
