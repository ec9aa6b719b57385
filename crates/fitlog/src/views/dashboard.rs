use std::fmt::Write;

use chrono::NaiveDate;
use storage::models::WorkoutLog;

use super::{workout_details, workout_type_label};
use crate::store::WorkoutState;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub today_count: usize,
    pub total_minutes: i64,
    /// First entry of the list, which is sorted newest first
    pub most_recent: Option<WorkoutLog>,
}

impl DashboardSummary {
    pub fn from_workouts(workouts: &[WorkoutLog], today: NaiveDate) -> Self {
        Self {
            total_records: workouts.len(),
            today_count: workouts.iter().filter(|w| w.workout_date == today).count(),
            total_minutes: workouts.iter().map(|w| i64::from(w.duration_min)).sum(),
            most_recent: workouts.first().cloned(),
        }
    }
}

pub fn render(state: &WorkoutState, today: NaiveDate) -> String {
    let summary = DashboardSummary::from_workouts(&state.workouts, today);
    let mut out = String::new();

    let _ = writeln!(out, "Total records  {}", summary.total_records);
    let _ = writeln!(out, "Today          {}", summary.today_count);
    let _ = writeln!(out, "Total minutes  {}", summary.total_minutes);
    let _ = writeln!(out);
    let _ = writeln!(out, "Most recent workout");

    if state.loading {
        let _ = writeln!(out, "  Loading...");
    } else if let Some(error) = &state.error {
        let _ = writeln!(out, "  {}", error);
    } else if let Some(recent) = &summary.most_recent {
        let _ = writeln!(out, "  {}", workout_type_label(&recent.workout_type));
        let _ = writeln!(out, "  {}", workout_details(recent));
        if let Some(notes) = &recent.notes {
            let _ = writeln!(out, "  {}", notes);
        }
    } else {
        let _ = writeln!(out, "  No workouts yet. Add one with `fitlog add`.");
    }

    out
}
