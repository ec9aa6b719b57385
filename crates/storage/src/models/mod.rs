mod workout_log;

pub use workout_log::{INTENSITIES, WORKOUT_TYPES, WorkoutLog};
