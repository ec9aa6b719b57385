use std::fmt::Write;

use super::{workout_details, workout_type_label};
use crate::store::WorkoutState;

pub fn render(state: &WorkoutState) -> String {
    let mut out = String::new();

    if state.loading && state.workouts.is_empty() {
        let _ = writeln!(out, "Loading...");
        return out;
    }

    if let Some(error) = &state.error {
        let _ = writeln!(out, "{}", error);
        let _ = writeln!(out, "Run `fitlog history` again to retry.");
        return out;
    }

    if state.workouts.is_empty() {
        let _ = writeln!(out, "No workouts recorded yet.");
        let _ = writeln!(out, "Add your first one with `fitlog add`.");
        return out;
    }

    for workout in &state.workouts {
        let _ = writeln!(out, "{}  {}", workout.id, workout_type_label(&workout.workout_type));
        let _ = writeln!(out, "    {}", workout_details(workout));
        if let Some(notes) = &workout.notes {
            let _ = writeln!(out, "    {}", notes);
        }
    }

    out
}
