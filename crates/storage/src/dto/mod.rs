pub mod workout;

pub use workout::{CreateWorkoutRequest, UpdateWorkoutRequest};
