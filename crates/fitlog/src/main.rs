use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use fitlog::{
    Config, StoreError, WorkoutStore,
    views::{
        self,
        add::{AddForm, SubmitError},
        edit::EditForm,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Workout log backed by a hosted workout_logs table", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Owner every query is scoped to, overrides the configured default
    #[arg(long, env = "FITLOG_OWNER_ID", global = true)]
    owner_id: Option<Uuid>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, today's count and the most recent workout
    Dashboard,
    /// Record a workout
    Add {
        /// Workout date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,

        /// strength, cardio, yoga, hiit or other
        #[arg(long = "type", default_value = "strength")]
        workout_type: String,

        /// Duration in minutes
        #[arg(long, default_value = "30")]
        duration: String,

        /// low, medium or high
        #[arg(long, default_value = "medium")]
        intensity: String,

        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List all workouts, newest first
    History {
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a recorded workout
    Update {
        id: Uuid,

        #[arg(long)]
        date: Option<String>,

        #[arg(long = "type")]
        workout_type: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        intensity: Option<String>,

        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        #[arg(long)]
        clear_notes: bool,
    },
    /// Delete a workout
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("fitlog={},storage={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().context("Failed to load fitlog configuration")?;
    if let Some(owner_id) = cli.owner_id {
        config.owner_id = owner_id;
    }
    let repo = config
        .connect()
        .await
        .context("Failed to connect to the workout backend")?;
    let store = WorkoutStore::new(repo);
    tracing::debug!(owner_id = %store.owner_id(), "workout store ready");

    let today = Utc::now().date_naive();

    let ok = match cli.command {
        Commands::Dashboard => {
            let fetched = store.fetch_workouts().await;
            print!("{}", views::dashboard::render(&store.snapshot(), today));
            report(fetched)
        }
        Commands::Add {
            date,
            workout_type,
            duration,
            intensity,
            notes,
        } => {
            let mut form = AddForm::new(today);
            if let Some(date) = date {
                form.date = date;
            }
            form.workout_type = workout_type;
            form.duration = duration;
            form.intensity = intensity;
            form.notes = notes;

            match form.submit(&store).await {
                Ok(workout) => {
                    println!("Saved workout {}", workout.id);
                    true
                }
                Err(SubmitError::Form(e)) => {
                    eprintln!("{}", e);
                    false
                }
                Err(SubmitError::Store(e)) => report::<()>(Err(e)),
            }
        }
        Commands::History { json } => {
            let fetched = store.fetch_workouts().await;
            let state = store.snapshot();
            if json && fetched.is_ok() {
                println!("{}", serde_json::to_string_pretty(&state.workouts)?);
            } else {
                print!("{}", views::history::render(&state));
            }
            report(fetched)
        }
        Commands::Update {
            id,
            date,
            workout_type,
            duration,
            intensity,
            notes,
            clear_notes,
        } => {
            let form = EditForm {
                date,
                workout_type,
                duration,
                intensity,
                notes,
                clear_notes,
            };

            match form.submit(&store, id).await {
                Ok(workout) => {
                    println!("{}", views::workout_details(&workout));
                    true
                }
                Err(SubmitError::Form(e)) => {
                    eprintln!("{}", e);
                    false
                }
                Err(SubmitError::Store(e)) => report::<()>(Err(e)),
            }
        }
        Commands::Delete { id } => match store.remove_workout(id).await {
            Ok(()) => {
                println!("Deleted workout {}", id);
                true
            }
            Err(e) => report::<()>(Err(e)),
        },
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print a failed store action to stderr; the views already show it for fetches
fn report<T>(result: Result<T, StoreError>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            if !matches!(e, StoreError::Fetch(_)) {
                eprintln!("{}", e);
            }
            if e.storage().is_transport() {
                eprintln!("Check your network connection and backend URL.");
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_id_flag_is_global() {
        let cli = Cli::try_parse_from([
            "fitlog",
            "history",
            "--owner-id",
            "3a2cbc79-00e5-4598-a5b2-74c5059724af",
        ])
        .unwrap();

        assert_eq!(
            cli.owner_id.map(|id| id.to_string()).as_deref(),
            Some("3a2cbc79-00e5-4598-a5b2-74c5059724af")
        );
        assert!(matches!(cli.command, Commands::History { json: false }));
    }

    #[test]
    fn owner_id_flag_must_be_a_uuid() {
        assert!(Cli::try_parse_from(["fitlog", "--owner-id", "demo", "dashboard"]).is_err());
    }
}
