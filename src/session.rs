//! Interactive command session driving a [`WorkoutStore`].
//!
//! Each input line is parsed with clap as one command. The session borrows the
//! store from the application root; it never owns workout state itself.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::catalog::{BodyRegion, ExerciseCatalog};
use crate::config::AppConfig;
use crate::models::*;
use crate::render;
use crate::store::WorkoutStore;

const PROMPT: &str = "liftlog> ";

#[derive(Debug, Parser)]
#[command(name = "liftlog", no_binary_name = true, disable_version_flag = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Subcommand)]
enum SessionCommand {
    /// Start a new workout (replaces any workout in progress)
    Start {
        /// Workout name. Defaults to "Workout <today's date>"
        name: Vec<String>,
    },
    /// Add an exercise to the current workout
    Add {
        /// Catalog exercise name, or a new exercise name
        #[arg(required = true)]
        exercise: Vec<String>,
        #[command(flatten)]
        details: NewExercise,
    },
    /// Update a set, or append one by using the next set number
    Set {
        /// Exercise number (1-based)
        exercise: usize,
        /// Set number (1-based)
        set: usize,
        #[arg(short, long)]
        weight: Option<f64>,
        #[arg(short, long)]
        reps: Option<u32>,
        /// Seconds
        #[arg(long)]
        duration: Option<u32>,
        /// Meters
        #[arg(long)]
        distance: Option<f64>,
        /// Mark the set completed
        #[arg(long, conflicts_with = "undone")]
        done: bool,
        /// Mark the set not completed
        #[arg(long)]
        undone: bool,
    },
    /// Append a set pre-filled from the previous one
    AddSet {
        /// Exercise number (1-based)
        exercise: usize,
    },
    /// Finish the current workout
    Complete,
    /// Discard the current workout
    Cancel,
    /// Show or update workout goals
    Goals {
        /// Workouts per week
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=7))]
        weekly: Option<u32>,
        /// Workouts per month
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
        monthly: Option<u32>,
    },
    /// Show the current workout
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Weekly and monthly progress plus recent workouts
    Dashboard,
    /// List completed workouts
    History {
        #[arg(long)]
        json: bool,
    },
    /// Browse the exercise catalog
    Catalog {
        /// Name filter
        query: Vec<String>,
        /// Body region: chest, back, legs, shoulders, arms, core, cardio, olympic, flexibility
        #[arg(long)]
        region: Option<String>,
    },
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Details for an exercise that is not in the catalog.
#[derive(Debug, Args)]
struct NewExercise {
    /// Exercise category
    #[arg(short, long, default_value = "strength", value_parser = ["strength", "cardio", "flexibility"])]
    category: String,
    /// Free-text description (rest of the line up to the next option)
    #[arg(long, num_args = 1..)]
    description: Vec<String>,
    /// Comma-separated equipment, e.g. `--equipment mat,band`
    #[arg(long, value_delimiter = ',')]
    equipment: Vec<String>,
    /// Comma-separated muscle groups
    #[arg(long, value_delimiter = ',')]
    muscles: Vec<String>,
}

impl NewExercise {
    fn into_exercise(self, name: &str) -> Exercise {
        let category = ExerciseCategory::from_str(&self.category).unwrap_or(ExerciseCategory::Strength);
        let mut exercise = Exercise::new(name, category);
        exercise.muscle_groups = list(self.muscles);
        exercise.equipment = list(self.equipment);
        if !self.description.is_empty() {
            exercise.description = Some(self.description.join(" "));
        }
        exercise
    }
}

fn list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit,
}

pub struct Session<'a> {
    store: &'a mut WorkoutStore,
    catalog: &'a ExerciseCatalog,
    config: &'a AppConfig,
}

impl<'a> Session<'a> {
    pub fn new(
        store: &'a mut WorkoutStore,
        catalog: &'a ExerciseCatalog,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Read commands until end of input or `quit`.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match self.execute(&line)? {
                Outcome::Continue(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{}", text.trim_end())?;
                    }
                }
                Outcome::Quit => return Ok(()),
            }
            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }

    /// Execute a single command line.
    ///
    /// Usage mistakes and rejected store operations come back as text; only
    /// serialization failures are errors.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Outcome::Continue(String::new()));
        }

        let command = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => return Ok(Outcome::Continue(e.to_string())),
        };

        let text = match command {
            SessionCommand::Start { name } => self.start(name),
            SessionCommand::Add { exercise, details } => self.add(&exercise.join(" "), details),
            SessionCommand::Set {
                exercise,
                set,
                weight,
                reps,
                duration,
                distance,
                done,
                undone,
            } => {
                let completed = match (done, undone) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
                let update = SetUpdate {
                    weight,
                    reps,
                    duration,
                    distance,
                    completed,
                };
                self.set(exercise, set, update)
            }
            SessionCommand::AddSet { exercise } => self.add_set(exercise),
            SessionCommand::Complete => match self.store.complete_workout() {
                Ok(workout) => format!(
                    "Completed {} in {} minutes",
                    workout.name,
                    workout.duration.unwrap_or(0)
                ),
                Err(e) => error_text(e),
            },
            SessionCommand::Cancel => match self.store.cancel_workout() {
                Ok(workout) => format!("Cancelled {}", workout.name),
                Err(e) => error_text(e),
            },
            SessionCommand::Goals { weekly, monthly } => self.goals(weekly, monthly),
            SessionCommand::Show { json } => match self.store.current_workout() {
                Some(workout) if json => serde_json::to_string_pretty(workout)?,
                Some(workout) => render::render_workout(workout, self.now_utc()),
                None => "No workout in progress. Use `start` to begin one.".to_string(),
            },
            SessionCommand::Dashboard => {
                let now = self.store.now();
                render::render_dashboard(
                    &self.store.progress_report(),
                    self.store.goals(),
                    self.store.workout_history(),
                    &now,
                    self.config.recent_workouts_limit,
                )
            }
            SessionCommand::History { json } => self.history(json)?,
            SessionCommand::Catalog { query, region } => self.catalog(&query.join(" "), region),
            SessionCommand::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Continue(text))
    }

    fn now_utc(&self) -> chrono::DateTime<chrono::Utc> {
        self.store.now().with_timezone(&chrono::Utc)
    }

    fn start(&mut self, name: Vec<String>) -> String {
        let name = if name.is_empty() {
            format!("Workout {}", self.store.now().format("%-m/%-d/%Y"))
        } else {
            name.join(" ")
        };

        let mut text = String::new();
        if let Some(old) = self.store.start_new_workout(&name) {
            text.push_str(&format!("Discarded {}\n", old.name));
        }
        text.push_str(&format!("Started {}", name));
        text
    }

    fn add(&mut self, name: &str, details: NewExercise) -> String {
        let exercise = match self.catalog.find_by_name(name) {
            Some(known) => known.clone(),
            None => details.into_exercise(name),
        };

        match self.store.add_exercise_to_workout(exercise) {
            Ok(added) => format!("Added {} ({})", added.name(), added.category().as_str()),
            Err(e) => error_text(e),
        }
    }

    fn set(&mut self, exercise: usize, set: usize, update: SetUpdate) -> String {
        let (Some(exercise_index), Some(set_index)) =
            (exercise.checked_sub(1), set.checked_sub(1))
        else {
            return "Exercise and set numbers start at 1".to_string();
        };

        let category = self
            .store
            .current_workout()
            .and_then(|w| w.exercises.get(exercise_index))
            .map(|e| e.category());

        match self.store.update_set(exercise_index, set_index, update) {
            Ok(updated) => format!(
                "Set {}: {}",
                set,
                render::format_set(
                    category.unwrap_or(ExerciseCategory::Strength),
                    updated
                )
            ),
            Err(e) => error_text(e),
        }
    }

    fn add_set(&mut self, exercise: usize) -> String {
        let Some(exercise_index) = exercise.checked_sub(1) else {
            return "Exercise numbers start at 1".to_string();
        };

        if let Err(e) = self.store.add_set(exercise_index) {
            return error_text(e);
        }

        let Some(exercise) = self
            .store
            .current_workout()
            .and_then(|w| w.exercises.get(exercise_index))
        else {
            return String::new();
        };
        let count = exercise.sets.len();
        format!(
            "Set {}: {}",
            count,
            render::format_set(exercise.category(), &exercise.sets[count - 1])
        )
    }

    fn goals(&mut self, weekly: Option<u32>, monthly: Option<u32>) -> String {
        let goals = if weekly.is_some() || monthly.is_some() {
            self.store.update_goals(GoalsUpdate {
                weekly_workouts: weekly,
                monthly_workouts: monthly,
            })
        } else {
            self.store.goals()
        };

        if !goals.has_set_initial_goals {
            return "No goals set yet. Use `goals --weekly N --monthly N`.".to_string();
        }
        format!(
            "Weekly goal: {} workouts per week\nMonthly goal: {} workouts per month",
            goals.targets.weekly_workouts, goals.targets.monthly_workouts
        )
    }

    fn history(&self, json: bool) -> Result<String> {
        let history = self.store.workout_history();
        if json {
            return Ok(serde_json::to_string_pretty(history)?);
        }
        if history.is_empty() {
            return Ok("No workouts yet.".to_string());
        }

        let tz = self.store.now().timezone();
        let lines: Vec<String> = history
            .iter()
            .map(|w| {
                format!(
                    "{} {} ({} exercises, {} minutes)",
                    w.date.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
                    w.name,
                    w.exercises.len(),
                    w.duration.unwrap_or(0)
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    fn catalog(&self, query: &str, region: Option<String>) -> String {
        if let Some(region) = region {
            let Some(region) = BodyRegion::from_str(&region.to_lowercase()) else {
                return format!("Unknown region: {}", region);
            };
            return list_exercises(self.catalog, self.catalog.by_region(region));
        }

        if query.is_empty() {
            return render::render_catalog_tree(&self.catalog.tree());
        }

        let matches = self.catalog.search(query);
        if matches.is_empty() {
            return format!("No exercises match \"{}\"", query);
        }
        list_exercises(self.catalog, matches)
    }
}

fn list_exercises(catalog: &ExerciseCatalog, exercises: Vec<&Exercise>) -> String {
    exercises
        .iter()
        .map(|e| match catalog.parent(e.id) {
            Some(parent) => format!("{} ({}, variation of {})", e.name, e.category.as_str(), parent.name),
            None => format!("{} ({})", e.name, e.category.as_str()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn error_text(e: crate::error::StoreError) -> String {
    tracing::debug!("Rejected command: {}", e);
    format!("Error: {}", e)
}
