//! liftlog: an in-memory workout tracker with weekly and monthly goals.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod progress;
pub mod render;
pub mod session;
pub mod store;

pub use error::{ConfigError, StoreError};
pub use store::WorkoutStore;
