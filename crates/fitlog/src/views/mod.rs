//! Text renderings of the three screens: dashboard, add form and history.

pub mod add;
pub mod dashboard;
pub mod edit;
pub mod history;

use storage::models::WorkoutLog;

pub fn workout_type_label(workout_type: &str) -> &str {
    match workout_type {
        "strength" => "Strength training",
        "cardio" => "Cardio",
        "yoga" => "Yoga",
        "hiit" => "HIIT",
        "other" => "Other",
        unknown => unknown,
    }
}

pub fn intensity_label(intensity: &str) -> &str {
    match intensity {
        "low" => "Low intensity",
        "medium" => "Medium intensity",
        "high" => "High intensity",
        unknown => unknown,
    }
}

/// One-line summary, e.g. `2024-01-01 · 30 min · Medium intensity`
pub fn workout_details(workout: &WorkoutLog) -> String {
    format!(
        "{} · {} min · {}",
        workout.workout_date.format("%Y-%m-%d"),
        workout.duration_min,
        intensity_label(&workout.intensity)
    )
}
