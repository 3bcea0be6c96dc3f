use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::exercise::{Exercise, ExerciseCategory};

/// A single timed training session.
///
/// Workouts are created **in progress** by the store and are mutated only while
/// they are the current workout. Completing one freezes it into the history;
/// cancelling one drops it entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<WorkoutExercise>,
    /// When the workout was started.
    pub date: DateTime<Utc>,
    pub status: WorkoutStatus,
    /// Whole minutes between start and completion. Set only on completion.
    pub duration: Option<i64>,
}

impl Workout {
    pub fn start(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            exercises: Vec::new(),
            date: now,
            status: WorkoutStatus::InProgress,
            duration: None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == WorkoutStatus::InProgress
    }

    pub fn is_completed(&self) -> bool {
        self.status == WorkoutStatus::Completed
    }

    /// Number of sets marked completed across all exercises.
    pub fn completed_sets(&self) -> usize {
        self.exercises
            .iter()
            .map(|e| e.sets.iter().filter(|s| s.completed).count())
            .sum()
    }
}

/// The lifecycle status of a workout.
///
/// - `Planned`: Scheduled but not started (not produced by the store today)
/// - `InProgress`: The current workout, still accepting exercises and sets
/// - `Completed`: Finished and appended to history; never changes again
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Planned,
    InProgress,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "planned" => Some(Self::Planned),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// An exercise as performed inside one workout.
///
/// Owns a copy of the catalog entry so later catalog changes never rewrite
/// logged history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub sets: Vec<ExerciseSet>,
    pub notes: Option<String>,
}

impl WorkoutExercise {
    /// Wrap an exercise with a single empty, incomplete set ready for input.
    pub fn from_exercise(exercise: Exercise) -> Self {
        Self {
            exercise,
            sets: vec![ExerciseSet::empty()],
            notes: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.exercise.name
    }

    pub fn category(&self) -> ExerciseCategory {
        self.exercise.category
    }

    /// Defaults for the next set, carried over from the last logged one.
    ///
    /// Strength carries weight and reps, cardio carries duration and
    /// distance. Flexibility starts blank.
    pub fn next_set_defaults(&self) -> SetUpdate {
        let Some(last) = self.sets.last() else {
            return SetUpdate::default();
        };

        match self.category() {
            ExerciseCategory::Strength => SetUpdate {
                weight: last.weight,
                reps: last.reps,
                ..SetUpdate::default()
            },
            ExerciseCategory::Cardio => SetUpdate {
                duration: last.duration,
                distance: last.distance,
                ..SetUpdate::default()
            },
            ExerciseCategory::Flexibility => SetUpdate::default(),
        }
    }
}

/// One logged unit of work within an exercise.
///
/// Which numeric fields are used depends on the exercise category; unused
/// fields simply stay `None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    /// Seconds.
    pub duration: Option<u32>,
    /// Meters.
    pub distance: Option<f64>,
    pub completed: bool,
}

impl ExerciseSet {
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            weight: None,
            reps: None,
            duration: None,
            distance: None,
            completed: false,
        }
    }
}

/// Partial set data. Every field present overwrites; absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SetUpdate {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub duration: Option<u32>,
    pub distance: Option<f64>,
    pub completed: Option<bool>,
}

impl SetUpdate {
    pub fn strength(weight: f64, reps: u32) -> Self {
        Self {
            weight: Some(weight),
            reps: Some(reps),
            ..Self::default()
        }
    }

    pub fn cardio(duration: u32, distance: f64) -> Self {
        Self {
            duration: Some(duration),
            distance: Some(distance),
            ..Self::default()
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Shallow merge into an existing set.
    pub fn apply_to(&self, set: &mut ExerciseSet) {
        if let Some(weight) = self.weight {
            set.weight = Some(weight);
        }
        if let Some(reps) = self.reps {
            set.reps = Some(reps);
        }
        if let Some(duration) = self.duration {
            set.duration = Some(duration);
        }
        if let Some(distance) = self.distance {
            set.distance = Some(distance);
        }
        if let Some(completed) = self.completed {
            set.completed = completed;
        }
    }

    /// A brand new set seeded with this data; incomplete unless stated.
    pub fn into_set(self) -> ExerciseSet {
        let mut set = ExerciseSet::empty();
        self.apply_to(&mut set);
        set
    }
}
