//! Plain-text rendering for the catalog, workouts and the dashboard.

use std::fmt::Write;

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{ExerciseCategory, ExerciseSet, ExerciseTreeNode, Goals, Workout};
use crate::progress::{self, GoalProgress, ProgressReport};

const STRENGTH: char = '●';
const CARDIO: char = '○';
const FLEXIBILITY: char = '◇';

/// Get the symbol for an exercise category.
fn category_symbol(category: ExerciseCategory) -> char {
    match category {
        ExerciseCategory::Strength => STRENGTH,
        ExerciseCategory::Cardio => CARDIO,
        ExerciseCategory::Flexibility => FLEXIBILITY,
    }
}

/// Render the exercise catalog as an ASCII tree with category symbols.
///
/// Example output:
/// ```text
/// Cardio
/// ├── ○ Running
/// │   ├── ○ Treadmill Running
/// │   └── ○ Outdoor Running
/// └── ○ Jump Rope
/// ```
pub fn render_catalog_tree(nodes: &[ExerciseTreeNode]) -> String {
    let mut output = String::new();
    for root in nodes {
        // Family names stand alone; branches start at their variations
        output.push_str(&root.exercise.name);
        output.push('\n');
        render_variations(&mut output, &root.variations, "");
    }
    output
}

/// Draw one level of variations, then recurse one indent deeper.
fn render_variations(output: &mut String, variations: &[ExerciseTreeNode], prefix: &str) {
    let last = variations.len().saturating_sub(1);
    for (i, node) in variations.iter().enumerate() {
        let (branch, continuation) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = writeln!(
            output,
            "{}{}{} {}",
            prefix,
            branch,
            category_symbol(node.exercise.category),
            node.exercise.name
        );
        render_variations(output, &node.variations, &format!("{}{}", prefix, continuation));
    }
}

/// One set as "100 x 5" or "600s / 2000m", with `-` for missing values.
pub fn format_set(category: ExerciseCategory, set: &ExerciseSet) -> String {
    fn or_dash<T: ToString>(value: Option<T>) -> String {
        value.map_or_else(|| "-".to_string(), |v| v.to_string())
    }

    let body = match category {
        ExerciseCategory::Strength => format!("{} x {}", or_dash(set.weight), or_dash(set.reps)),
        ExerciseCategory::Cardio => {
            format!("{}s / {}m", or_dash(set.duration), or_dash(set.distance))
        }
        ExerciseCategory::Flexibility => match set.duration {
            Some(seconds) => format!("{}s", seconds),
            None => "-".to_string(),
        },
    };

    if set.completed {
        format!("{} [done]", body)
    } else {
        body
    }
}

fn exercise_count(count: usize) -> String {
    match count {
        0 => "No exercises".to_string(),
        1 => "1 exercise".to_string(),
        n => format!("{} exercises", n),
    }
}

/// The current workout with its exercises and sets.
pub fn render_workout(workout: &Workout, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}, {}m, {} sets done]",
        workout.name,
        workout.status.as_str().replace('_', " "),
        progress::elapsed_minutes(workout, now),
        workout.completed_sets()
    );
    let _ = writeln!(out, "{}", exercise_count(workout.exercises.len()));

    for (i, exercise) in workout.exercises.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({})",
            i + 1,
            exercise.name(),
            exercise.category().as_str()
        );
        for (j, set) in exercise.sets.iter().enumerate() {
            let _ = writeln!(
                out,
                "   {}. {}",
                j + 1,
                format_set(exercise.category(), set)
            );
        }
        if let Some(ref notes) = exercise.notes {
            let _ = writeln!(out, "   notes: {}", notes);
        }
    }
    out
}

fn goal_block(
    out: &mut String,
    title: &str,
    progress: &GoalProgress,
    configured: bool,
    unset_hint: &str,
    met_message: &str,
    remaining_suffix: &str,
) {
    let percent = if progress.target > 0 {
        format!("{}%", progress.percent.round())
    } else {
        "-".to_string()
    };
    let _ = writeln!(
        out,
        "{}: {} of {} workouts completed ({})",
        title, progress.completed, progress.target, percent
    );

    let message = if !configured {
        unset_hint.to_string()
    } else if progress.percent >= 100.0 {
        met_message.to_string()
    } else {
        format!("{} more workouts {}", progress.remaining(), remaining_suffix)
    };
    let _ = writeln!(out, "  {}", message);
}

/// Dashboard: goal progress, today's workout and the most recent workouts.
pub fn render_dashboard<Tz: TimeZone>(
    report: &ProgressReport,
    goals: &Goals,
    history: &[Workout],
    now: &DateTime<Tz>,
    recent_limit: usize,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();

    if !goals.has_set_initial_goals {
        let _ = writeln!(
            out,
            "Welcome! Set your workout goals with `goals --weekly N --monthly N` to start tracking."
        );
    }

    match history.last() {
        Some(latest) if progress::is_same_day(latest, now) => {
            let _ = writeln!(out, "Today's workout: {}", latest.name);
        }
        _ => {
            let _ = writeln!(out, "Ready to start your workout?");
        }
    }

    goal_block(
        &mut out,
        "Weekly progress",
        &report.weekly,
        goals.has_set_initial_goals,
        "Set your weekly goal",
        "Great job! You've hit your weekly goal!",
        "to reach your goal",
    );
    goal_block(
        &mut out,
        "Monthly goals",
        &report.monthly,
        goals.has_set_initial_goals,
        "Set your monthly goal",
        "Amazing! You've achieved your monthly goal!",
        "this month",
    );

    let _ = writeln!(out, "Recent workouts:");
    let recent = progress::recent_workouts(history, recent_limit);
    if recent.is_empty() {
        let _ = writeln!(
            out,
            "  No workouts yet. Start your first workout to track your progress!"
        );
    }
    for workout in recent {
        let date = workout.date.with_timezone(&now.timezone()).format("%Y-%m-%d");
        let mut line = format!(
            "  {} ({}) {}",
            workout.name,
            date,
            exercise_count(workout.exercises.len()).to_lowercase()
        );
        if let Some(minutes) = workout.duration {
            let _ = write!(line, ", {} minutes", minutes);
        }
        let _ = writeln!(out, "{}", line);

        let summary = progress::exercise_summary(workout, 2);
        if !summary.is_empty() {
            let _ = writeln!(out, "    {}", summary);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, GoalCounts, SetUpdate, WorkoutExercise, WorkoutStatus};
    use crate::progress::Boundaries;
    use chrono::Weekday;

    fn make_node(
        name: &str,
        category: ExerciseCategory,
        variations: Vec<ExerciseTreeNode>,
    ) -> ExerciseTreeNode {
        ExerciseTreeNode {
            exercise: Exercise::new(name, category),
            variations,
        }
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_single_root() {
        let tree = vec![make_node("Squat", ExerciseCategory::Strength, vec![])];
        assert_eq!(render_catalog_tree(&tree), "Squat\n");
    }

    #[test]
    fn test_nested_variations() {
        let tree = vec![make_node(
            "Cardio",
            ExerciseCategory::Cardio,
            vec![
                make_node(
                    "Running",
                    ExerciseCategory::Cardio,
                    vec![
                        make_node("Treadmill Running", ExerciseCategory::Cardio, vec![]),
                        make_node("Outdoor Running", ExerciseCategory::Cardio, vec![]),
                    ],
                ),
                make_node("Hip Opener", ExerciseCategory::Flexibility, vec![]),
            ],
        )];
        let expected = "Cardio\n├── ○ Running\n│   ├── ○ Treadmill Running\n│   └── ○ Outdoor Running\n└── ◇ Hip Opener\n";
        assert_eq!(render_catalog_tree(&tree), expected);
    }

    #[test]
    fn test_format_set() {
        let set = SetUpdate::strength(100.0, 5).completed(true).into_set();
        assert_eq!(format_set(ExerciseCategory::Strength, &set), "100 x 5 [done]");

        let set = SetUpdate {
            duration: Some(600),
            ..SetUpdate::default()
        }
        .into_set();
        assert_eq!(format_set(ExerciseCategory::Cardio, &set), "600s / -m");
    }

    #[test]
    fn test_workout_summary_line() {
        let mut workout = Workout::start("Leg Day", at(16, 10));
        let mut squat = WorkoutExercise::from_exercise(Exercise::new("Squat", ExerciseCategory::Strength));
        squat.sets[0] = SetUpdate::strength(100.0, 5).completed(true).into_set();
        workout.exercises.push(squat);

        let text = render_workout(&workout, at(16, 11));
        assert!(text.starts_with("Leg Day [in progress, 60m, 1 sets done]\n1 exercise\n"));
        assert!(text.contains("1. Squat (strength)\n   1. 100 x 5 [done]\n"));
    }

    #[test]
    fn test_dashboard_without_goals() {
        let goals = Goals::default();
        let now = at(16, 12);
        let report = ProgressReport::compute(&[], &goals, &Boundaries::at(&now, Weekday::Sun));

        let text = render_dashboard(&report, &goals, &[], &now, 3);
        assert!(text.contains("Weekly progress: 0 of 0 workouts completed (-)"));
        assert!(text.contains("Set your weekly goal"));
        assert!(text.contains("No workouts yet."));
    }

    #[test]
    fn test_dashboard_with_history() {
        let goals = Goals {
            targets: GoalCounts {
                weekly_workouts: 2,
                monthly_workouts: 8,
            },
            progress: GoalCounts::default(),
            has_set_initial_goals: true,
        };
        let mut done = Workout::start("Push", at(16, 7));
        done.status = WorkoutStatus::Completed;
        done.duration = Some(50);
        let history = vec![done];
        let now = at(16, 12);
        let report = ProgressReport::compute(&history, &goals, &Boundaries::at(&now, Weekday::Sun));

        let text = render_dashboard(&report, &goals, &history, &now, 3);
        assert!(text.contains("Today's workout: Push"));
        assert!(text.contains("Weekly progress: 1 of 2 workouts completed (50%)"));
        assert!(text.contains("1 more workouts to reach your goal"));
        assert!(text.contains("7 more workouts this month"));
        assert!(text.contains("Push (2026-10-16) no exercises, 50 minutes"));
    }
}
