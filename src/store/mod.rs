//! The in-memory workout state store.
//!
//! [`WorkoutStore`] owns the current workout, the completed history and the
//! user's goals. It is a plain value owned by the application root and handed
//! to views by reference; nothing here is global and nothing is persisted.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use chrono::{DateTime, FixedOffset, Utc, Weekday};

use crate::config::AppConfig;
use crate::error::StoreError;
use crate::models::*;
use crate::progress::{self, Boundaries, ProgressReport};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
pub struct WorkoutStore {
    current_workout: Option<Workout>,
    workout_history: Vec<Workout>,
    goals: Goals,
    first_day_of_week: Weekday,
    clock: Box<dyn Clock>,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            current_workout: None,
            workout_history: Vec::new(),
            goals: Goals::default(),
            first_day_of_week: Weekday::Sun,
            clock: Box::new(clock),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().first_day_of_week(config.first_day_of_week)
    }

    pub fn first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    // ============================================================
    // Reads
    // ============================================================

    pub fn current_workout(&self) -> Option<&Workout> {
        self.current_workout.as_ref()
    }

    /// Completed workouts in completion order.
    pub fn workout_history(&self) -> &[Workout] {
        &self.workout_history
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    /// Weekly and monthly progress against the current targets.
    pub fn progress_report(&self) -> ProgressReport {
        ProgressReport::compute(&self.workout_history, &self.goals, &self.boundaries())
    }

    /// Start of the current week and month, at local midnight as the clock
    /// resolves it on each boundary date.
    pub fn boundaries(&self) -> Boundaries {
        let today = self.clock.now().date_naive();
        Boundaries::resolve(today, self.first_day_of_week, |date| {
            self.clock.midnight(date)
        })
    }

    // ============================================================
    // Workout lifecycle
    // ============================================================

    /// Start a new in-progress workout and make it current.
    ///
    /// An already active workout is replaced; it is returned to the caller and
    /// never reaches the history.
    pub fn start_new_workout(&mut self, name: impl Into<String>) -> Option<Workout> {
        let workout = Workout::start(name, self.clock.now().with_timezone(&Utc));
        tracing::info!(workout_id = %workout.id, name = %workout.name, "Started workout");

        let replaced = self.current_workout.replace(workout);
        if let Some(ref old) = replaced {
            tracing::warn!(
                workout_id = %old.id,
                name = %old.name,
                "Discarded in-progress workout replaced by a new one"
            );
        }
        replaced
    }

    /// Append an exercise to the current workout with one empty set.
    pub fn add_exercise_to_workout(&mut self, exercise: Exercise) -> Result<&WorkoutExercise> {
        let workout = self.active_mut()?;
        tracing::debug!(workout_id = %workout.id, exercise = %exercise.name, "Added exercise");

        let index = workout.exercises.len();
        workout
            .exercises
            .push(WorkoutExercise::from_exercise(exercise));
        Ok(&workout.exercises[index])
    }

    /// Merge `update` into an existing set, or append a new set when
    /// `set_index` equals the exercise's current set count.
    pub fn update_set(
        &mut self,
        exercise_index: usize,
        set_index: usize,
        update: SetUpdate,
    ) -> Result<&ExerciseSet> {
        let workout = self.active_mut()?;
        let len = workout.exercises.len();
        let exercise = workout
            .exercises
            .get_mut(exercise_index)
            .ok_or(StoreError::ExerciseIndexOutOfRange {
                index: exercise_index,
                len,
            })?;

        let sets = &mut exercise.sets;
        if set_index < sets.len() {
            update.apply_to(&mut sets[set_index]);
            tracing::debug!(exercise_index, set_index, "Updated set");
        } else if set_index == sets.len() {
            sets.push(update.into_set());
            tracing::debug!(exercise_index, set_index, "Appended set");
        } else {
            return Err(StoreError::SetIndexOutOfRange {
                index: set_index,
                len: sets.len(),
            });
        }

        Ok(&sets[set_index])
    }

    /// Append a set pre-filled from the exercise's last set.
    pub fn add_set(&mut self, exercise_index: usize) -> Result<&ExerciseSet> {
        let workout = self.active()?;
        let exercise = workout.exercises.get(exercise_index).ok_or(
            StoreError::ExerciseIndexOutOfRange {
                index: exercise_index,
                len: workout.exercises.len(),
            },
        )?;
        let set_index = exercise.sets.len();
        let defaults = exercise.next_set_defaults();

        self.update_set(exercise_index, set_index, defaults)
    }

    /// Finish the current workout and append it to the history.
    ///
    /// Records the duration in whole minutes and refreshes `goals.progress`
    /// with this week's and this month's completed counts. Targets are left
    /// untouched.
    pub fn complete_workout(&mut self) -> Result<&Workout> {
        let mut workout = self
            .current_workout
            .take()
            .ok_or(StoreError::NoActiveWorkout)?;
        let now = self.clock.now();
        let bounds = self.boundaries();

        workout.status = WorkoutStatus::Completed;
        workout.duration = Some(progress::elapsed_minutes(
            &workout,
            now.with_timezone(&Utc),
        ));
        tracing::info!(
            workout_id = %workout.id,
            name = %workout.name,
            duration = ?workout.duration,
            exercises = workout.exercises.len(),
            "Completed workout"
        );

        let index = self.workout_history.len();
        self.workout_history.push(workout);
        self.goals.progress = progress::completed_counts(&self.workout_history, &bounds);

        Ok(&self.workout_history[index])
    }

    /// Drop the current workout and everything logged in it.
    pub fn cancel_workout(&mut self) -> Result<Workout> {
        let workout = self
            .current_workout
            .take()
            .ok_or(StoreError::NoActiveWorkout)?;
        tracing::info!(workout_id = %workout.id, name = %workout.name, "Cancelled workout");
        Ok(workout)
    }

    // ============================================================
    // Goals
    // ============================================================

    /// Merge new targets. Always marks the goals as configured.
    pub fn update_goals(&mut self, update: GoalsUpdate) -> &Goals {
        self.goals.apply(&update);
        tracing::info!(
            weekly = self.goals.targets.weekly_workouts,
            monthly = self.goals.targets.monthly_workouts,
            "Updated goals"
        );
        &self.goals
    }

    fn active(&self) -> Result<&Workout> {
        self.current_workout
            .as_ref()
            .ok_or(StoreError::NoActiveWorkout)
    }

    fn active_mut(&mut self) -> Result<&mut Workout> {
        self.current_workout
            .as_mut()
            .ok_or(StoreError::NoActiveWorkout)
    }
}
