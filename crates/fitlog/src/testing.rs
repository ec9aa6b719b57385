use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use storage::{
    Result, StorageError, WorkoutRepository,
    dto::workout::{CreateWorkoutRequest, UpdateWorkoutRequest},
    models::WorkoutLog,
};
use tokio::sync::{Notify, oneshot};
use uuid::Uuid;

pub const OWNER: Uuid = Uuid::from_u128(1);

pub fn date(ymd: (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()
}

pub fn log(ymd: (i32, u32, u32), workout_type: &str, duration_min: i32) -> WorkoutLog {
    WorkoutLog {
        id: Uuid::new_v4(),
        user_id: OWNER,
        workout_date: date(ymd),
        workout_type: workout_type.to_string(),
        duration_min,
        intensity: "medium".to_string(),
        notes: None,
        created_at: Utc::now(),
    }
}

pub fn request(ymd: (i32, u32, u32), workout_type: &str, duration_min: i32) -> CreateWorkoutRequest {
    CreateWorkoutRequest {
        workout_date: date(ymd),
        workout_type: workout_type.to_string(),
        duration_min,
        intensity: "medium".to_string(),
        notes: None,
    }
}

/// In-memory repository with switchable failures
#[derive(Default)]
pub struct FakeRepository {
    rows: Mutex<Vec<WorkoutLog>>,
    failure: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl FakeRepository {
    pub fn seed(&self, row: WorkoutLog) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn reset(&self, rows: Vec<WorkoutLog>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some(message) => Err(StorageError::Backend {
                status: 503,
                message,
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkoutRepository for FakeRepository {
    fn owner_id(&self) -> Uuid {
        OWNER
    }

    async fn list(&self) -> Result<Vec<WorkoutLog>> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.workout_date.cmp(&a.workout_date));
        Ok(rows)
    }

    async fn create(&self, req: &CreateWorkoutRequest) -> Result<WorkoutLog> {
        self.enter()?;
        let row = WorkoutLog {
            id: Uuid::new_v4(),
            user_id: OWNER,
            workout_date: req.workout_date,
            workout_type: req.workout_type.clone(),
            duration_min: req.duration_min,
            intensity: req.intensity.clone(),
            notes: req.notes.clone(),
            created_at: Utc::now(),
        };
        self.seed(row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, req: &UpdateWorkoutRequest) -> Result<WorkoutLog> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StorageError::NotFound)?;
        if let Some(date) = req.workout_date {
            row.workout_date = date;
        }
        if let Some(workout_type) = &req.workout_type {
            row.workout_type = workout_type.clone();
        }
        if let Some(duration_min) = req.duration_min {
            row.duration_min = duration_min;
        }
        if let Some(intensity) = &req.intensity {
            row.intensity = intensity.clone();
        }
        if let Some(notes) = &req.notes {
            row.notes = notes.clone();
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

/// Repository whose `list` calls park until the test opens their gate
#[derive(Default)]
pub struct GatedRepository {
    pub entered: Notify,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl GatedRepository {
    /// Gate for the next `list` call, in call order
    pub fn gate(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl WorkoutRepository for GatedRepository {
    fn owner_id(&self) -> Uuid {
        OWNER
    }

    async fn list(&self) -> Result<Vec<WorkoutLog>> {
        let gate = self.gates.lock().unwrap().pop_front();
        self.entered.notify_one();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(Vec::new())
    }

    async fn create(&self, _req: &CreateWorkoutRequest) -> Result<WorkoutLog> {
        Err(StorageError::InvalidRequest("gated repository is read-only".to_string()))
    }

    async fn update(&self, _id: Uuid, _req: &UpdateWorkoutRequest) -> Result<WorkoutLog> {
        Err(StorageError::InvalidRequest("gated repository is read-only".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<()> {
        Err(StorageError::InvalidRequest("gated repository is read-only".to_string()))
    }
}
