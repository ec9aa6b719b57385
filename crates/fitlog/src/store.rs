//! Application store: the in-memory workout list plus `loading`/`error`
//! flags, mutated only through the action methods below.
//!
//! Every remote action follows the same protocol: set `loading` and clear
//! `error`, call the repository, then either apply the result or record the
//! error message and hand the error back to the caller.
//!
//! Actions are not serialized against each other. Two overlapping actions
//! each toggle the shared `loading` flag, so the first one to finish clears
//! `loading` while the other is still in flight.

use std::sync::Arc;

use storage::{
    StorageError, WorkoutRepository,
    dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest},
    models::WorkoutLog,
};
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

/// Snapshot of the store observed by views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutState {
    pub workouts: Vec<WorkoutLog>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fetch workouts: {0}")]
    Fetch(#[source] StorageError),

    #[error("failed to add workout: {0}")]
    Create(#[source] StorageError),

    #[error("failed to update workout: {0}")]
    Update(#[source] StorageError),

    #[error("failed to delete workout: {0}")]
    Delete(#[source] StorageError),
}

impl StoreError {
    pub fn storage(&self) -> &StorageError {
        match self {
            Self::Fetch(e) | Self::Create(e) | Self::Update(e) | Self::Delete(e) => e,
        }
    }
}

pub struct WorkoutStore {
    repo: Arc<dyn WorkoutRepository>,
    state: watch::Sender<WorkoutState>,
}

impl WorkoutStore {
    pub fn new(repo: Arc<dyn WorkoutRepository>) -> Self {
        let (state, _) = watch::channel(WorkoutState::default());
        Self { repo, state }
    }

    pub fn owner_id(&self) -> Uuid {
        self.repo.owner_id()
    }

    pub fn snapshot(&self) -> WorkoutState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<WorkoutState> {
        self.state.subscribe()
    }

    pub async fn fetch_workouts(&self) -> Result<(), StoreError> {
        self.begin();

        match self.repo.list().await {
            Ok(workouts) => {
                tracing::info!(count = workouts.len(), "fetched workouts");
                self.state.send_modify(|state| {
                    state.workouts = workouts;
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(StoreError::Fetch(e))),
        }
    }

    pub async fn add_workout(&self, req: &CreateWorkoutRequest) -> Result<WorkoutLog, StoreError> {
        self.begin();

        match self.repo.create(req).await {
            Ok(workout) => {
                tracing::info!(id = %workout.id, "added workout");
                self.state.send_modify(|state| {
                    state.workouts.insert(0, workout.clone());
                    state.loading = false;
                });
                Ok(workout)
            }
            Err(e) => Err(self.fail(StoreError::Create(e))),
        }
    }

    pub async fn update_workout(
        &self,
        id: Uuid,
        req: &UpdateWorkoutRequest,
    ) -> Result<WorkoutLog, StoreError> {
        self.begin();

        match self.repo.update(id, req).await {
            Ok(workout) => {
                tracing::info!(id = %workout.id, "updated workout");
                self.state.send_modify(|state| {
                    if let Some(slot) = state.workouts.iter_mut().find(|w| w.id == workout.id) {
                        *slot = workout.clone();
                    }
                    state.loading = false;
                });
                Ok(workout)
            }
            Err(e) => Err(self.fail(StoreError::Update(e))),
        }
    }

    pub async fn remove_workout(&self, id: Uuid) -> Result<(), StoreError> {
        self.begin();

        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "removed workout");
                self.state.send_modify(|state| {
                    state.workouts.retain(|w| w.id != id);
                    state.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(StoreError::Delete(e))),
        }
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn fail(&self, err: StoreError) -> StoreError {
        tracing::debug!(error = %err, "workout store action failed");
        let message = err.to_string();
        self.state.send_modify(|state| {
            state.loading = false;
            state.error = Some(message);
        });
        err
    }
}
