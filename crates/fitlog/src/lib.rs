pub mod config;
pub mod store;
pub mod views;

#[cfg(test)]
mod testing;

pub use config::{BackendConfig, Config};
pub use store::{StoreError, WorkoutState, WorkoutStore};
