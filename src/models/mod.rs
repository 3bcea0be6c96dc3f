//! Domain models for liftlog.
//!
//! # Core Concepts
//!
//! ## Catalog Entities
//!
//! - [`Exercise`]: Immutable description of a movement. Catalog exercises form
//!   a variation tree through `parent_id` lookup links.
//!
//! ## Workout Entities
//!
//! - [`Workout`]: A timed session. At most one is in progress at a time; when
//!   completed it joins the append-only history, when cancelled it is dropped.
//! - [`WorkoutExercise`]: An exercise as performed inside one workout, owning
//!   its ordered [`ExerciseSet`]s.
//!
//! ## Goals
//!
//! - [`Goals`]: Weekly and monthly workout targets plus the last recorded
//!   progress counts.

mod exercise;
mod goals;
mod workout;

pub use exercise::*;
pub use goals::*;
pub use workout::*;
