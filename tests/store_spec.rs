use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use liftlog::models::*;
use liftlog::store::{ManualClock, WorkoutStore};
use liftlog::StoreError;
use speculate2::speculate;

fn friday_evening() -> DateTime<FixedOffset> {
    // 2026-10-16 is a Friday
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 16, 18, 0, 0)
        .unwrap()
}

fn squat() -> Exercise {
    Exercise::new("Squat", ExerciseCategory::Strength)
}

fn log_workout(store: &mut WorkoutStore, name: &str) {
    store.start_new_workout(name);
    store.add_exercise_to_workout(squat()).expect("Failed to add exercise");
    store.complete_workout().expect("Failed to complete workout");
}

speculate! {
    before {
        let clock = ManualClock::new(friday_evening());
        let mut store = WorkoutStore::with_clock(clock.clone());
    }

    describe "start_new_workout" {
        it "creates an empty in-progress workout" {
            let replaced = store.start_new_workout("Morning");
            assert!(replaced.is_none());

            let workout = store.current_workout().expect("No current workout");
            assert_eq!(workout.name, "Morning");
            assert_eq!(workout.status, WorkoutStatus::InProgress);
            assert!(workout.exercises.is_empty());
            assert!(workout.duration.is_none());
            assert_eq!(workout.date, friday_evening().with_timezone(&chrono::Utc));
        }

        it "replaces an active workout without recording it" {
            store.start_new_workout("First");
            store.add_exercise_to_workout(squat()).expect("Failed to add exercise");

            let replaced = store.start_new_workout("Second").expect("Nothing replaced");
            assert_eq!(replaced.name, "First");
            assert_eq!(replaced.exercises.len(), 1);
            assert_eq!(store.current_workout().unwrap().name, "Second");
            assert!(store.workout_history().is_empty());
        }
    }

    describe "add_exercise_to_workout" {
        it "rejects when no workout is active" {
            let result = store.add_exercise_to_workout(squat());
            assert_eq!(result.unwrap_err(), StoreError::NoActiveWorkout);
            assert!(store.current_workout().is_none());
        }

        it "appends in order with one empty set each" {
            store.start_new_workout("W");
            store.add_exercise_to_workout(squat()).expect("Failed to add");
            store
                .add_exercise_to_workout(Exercise::new("Rowing", ExerciseCategory::Cardio))
                .expect("Failed to add");

            let exercises = &store.current_workout().unwrap().exercises;
            assert_eq!(exercises.len(), 2);
            assert_eq!(exercises[0].name(), "Squat");
            assert_eq!(exercises[1].name(), "Rowing");
            for exercise in exercises {
                assert_eq!(exercise.sets.len(), 1);
                assert!(!exercise.sets[0].completed);
                assert!(exercise.sets[0].weight.is_none());
            }
        }
    }

    describe "update_set" {
        before {
            store.start_new_workout("W");
            store.add_exercise_to_workout(squat()).expect("Failed to add");
        }

        it "merges into an existing set" {
            store.update_set(0, 0, SetUpdate::strength(100.0, 5)).expect("Failed to update");
            store
                .update_set(0, 0, SetUpdate { completed: Some(true), ..SetUpdate::default() })
                .expect("Failed to update");

            let set = &store.current_workout().unwrap().exercises[0].sets[0];
            assert_eq!(set.weight, Some(100.0));
            assert_eq!(set.reps, Some(5));
            assert!(set.completed);
        }

        it "keeps the set id when merging" {
            let id = store.current_workout().unwrap().exercises[0].sets[0].id;
            let updated = store.update_set(0, 0, SetUpdate::strength(60.0, 12)).expect("Failed to update");
            assert_eq!(updated.id, id);
        }

        it "appends when the index is one past the end" {
            for n in 1..=4u32 {
                let len = store.current_workout().unwrap().exercises[0].sets.len();
                store
                    .update_set(0, len, SetUpdate::strength(f64::from(n) * 10.0, n))
                    .expect("Failed to append");
            }

            let sets = &store.current_workout().unwrap().exercises[0].sets;
            assert_eq!(sets.len(), 5);
            let reps: Vec<Option<u32>> = sets.iter().map(|s| s.reps).collect();
            assert_eq!(reps, vec![None, Some(1), Some(2), Some(3), Some(4)]);
            assert!(sets.iter().all(|s| !s.completed));
        }

        it "rejects indexes past the append position" {
            let result = store.update_set(0, 2, SetUpdate::strength(100.0, 5));
            assert_eq!(result.unwrap_err(), StoreError::SetIndexOutOfRange { index: 2, len: 1 });
            assert_eq!(store.current_workout().unwrap().exercises[0].sets.len(), 1);
        }

        it "rejects a bad exercise index" {
            let result = store.update_set(1, 0, SetUpdate::strength(100.0, 5));
            assert_eq!(
                result.unwrap_err(),
                StoreError::ExerciseIndexOutOfRange { index: 1, len: 1 }
            );
        }
    }

    describe "update_set without a workout" {
        it "rejects with no active workout" {
            let result = store.update_set(0, 0, SetUpdate::strength(100.0, 5));
            assert_eq!(result.unwrap_err(), StoreError::NoActiveWorkout);
        }
    }

    describe "add_set" {
        it "copies cardio duration and distance" {
            store.start_new_workout("Run");
            store
                .add_exercise_to_workout(Exercise::new("Running", ExerciseCategory::Cardio))
                .expect("Failed to add");
            store.update_set(0, 0, SetUpdate::cardio(1200, 3000.0).completed(true)).expect("Failed to update");

            let set = store.add_set(0).expect("Failed to add set").clone();
            assert_eq!(set.duration, Some(1200));
            assert_eq!(set.distance, Some(3000.0));
            assert!(!set.completed);
        }

        it "rejects a bad exercise index" {
            store.start_new_workout("W");
            assert_eq!(
                store.add_set(0).unwrap_err(),
                StoreError::ExerciseIndexOutOfRange { index: 0, len: 0 }
            );
        }
    }

    describe "complete_workout" {
        it "records the Workout A scenario" {
            store.start_new_workout("Workout A");
            store.add_exercise_to_workout(squat()).expect("Failed to add");
            store.update_set(0, 0, SetUpdate::strength(100.0, 5)).expect("Failed to update");
            store.update_set(0, 1, SetUpdate::strength(100.0, 5)).expect("Failed to append");
            clock.advance(Duration::minutes(42));
            store.complete_workout().expect("Failed to complete");

            assert!(store.current_workout().is_none());
            let history = store.workout_history();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].name, "Workout A");
            assert_eq!(history[0].status, WorkoutStatus::Completed);
            assert_eq!(history[0].duration, Some(42));

            let sets = &history[0].exercises[0].sets;
            assert_eq!(sets.len(), 2);
            for set in sets {
                assert_eq!(set.weight, Some(100.0));
                assert_eq!(set.reps, Some(5));
            }
        }

        it "only applies once" {
            log_workout(&mut store, "Once");
            let history = store.workout_history().to_vec();
            let goals = store.goals().clone();

            assert_eq!(store.complete_workout().unwrap_err(), StoreError::NoActiveWorkout);
            assert_eq!(store.workout_history(), history.as_slice());
            assert_eq!(store.goals(), &goals);
        }

        it "records progress without touching targets" {
            store.update_goals(GoalsUpdate { weekly_workouts: Some(3), monthly_workouts: Some(10) });
            log_workout(&mut store, "One");
            log_workout(&mut store, "Two");

            let goals = store.goals();
            assert_eq!(goals.targets.weekly_workouts, 3);
            assert_eq!(goals.targets.monthly_workouts, 10);
            assert_eq!(goals.progress.weekly_workouts, 2);
            assert_eq!(goals.progress.monthly_workouts, 2);
        }

        it "resets the weekly count in a new week" {
            log_workout(&mut store, "Friday");
            clock.advance(Duration::days(3));
            log_workout(&mut store, "Monday");

            let progress = store.goals().progress;
            assert_eq!(progress.weekly_workouts, 1);
            assert_eq!(progress.monthly_workouts, 2);
        }

        it "honours a Monday week start" {
            let mut store = WorkoutStore::with_clock(clock.clone()).first_day_of_week(chrono::Weekday::Mon);
            log_workout(&mut store, "Friday");
            clock.advance(Duration::days(2));
            log_workout(&mut store, "Sunday");

            assert_eq!(store.goals().progress.weekly_workouts, 2);
            clock.advance(Duration::days(1));
            assert_eq!(store.progress_report().weekly.completed, 0);
        }
    }

    describe "cancel_workout" {
        it "discards the workout and its exercises" {
            store.start_new_workout("W");
            store.add_exercise_to_workout(squat()).expect("Failed to add");

            let cancelled = store.cancel_workout().expect("Failed to cancel");
            assert_eq!(cancelled.name, "W");
            assert!(store.current_workout().is_none());
            assert!(store.workout_history().is_empty());
        }

        it "rejects when no workout is active" {
            assert_eq!(store.cancel_workout().unwrap_err(), StoreError::NoActiveWorkout);
        }
    }

    describe "goals" {
        it "defaults to unset zero targets" {
            let goals = store.goals();
            assert_eq!(goals.targets, GoalCounts::default());
            assert!(!goals.has_set_initial_goals);

            let report = store.progress_report();
            assert_eq!(report.weekly.completed, 0);
            assert_eq!(report.weekly.target, 0);
            assert_eq!(report.weekly.percent, 0.0);
            assert_eq!(report.monthly.percent, 0.0);
        }

        it "merges partial updates and marks goals as set" {
            store.update_goals(GoalsUpdate { weekly_workouts: Some(2), monthly_workouts: Some(8) });
            let goals = store.update_goals(GoalsUpdate { weekly_workouts: Some(4), monthly_workouts: None });

            assert!(goals.has_set_initial_goals);
            assert_eq!(goals.targets.weekly_workouts, 4);
            assert_eq!(goals.targets.monthly_workouts, 8);
        }

        it "marks goals as set even for an empty update" {
            let goals = store.update_goals(GoalsUpdate::default());
            assert!(goals.has_set_initial_goals);
            assert_eq!(goals.targets, GoalCounts::default());
        }

        it "reports capped progress" {
            store.update_goals(GoalsUpdate { weekly_workouts: Some(2), monthly_workouts: Some(20) });
            for name in ["A", "B", "C"] {
                log_workout(&mut store, name);
            }

            let report = store.progress_report();
            assert_eq!(report.weekly.completed, 3);
            assert_eq!(report.weekly.percent, 100.0);
            assert!(report.weekly.is_met());
            assert_eq!(report.monthly.percent.round(), 15.0);
            assert_eq!(report.monthly.remaining(), 17);
        }
    }

    describe "invariants" {
        it "never holds a finished workout as current" {
            let steps: [fn(&mut WorkoutStore); 6] = [
                |s| { s.start_new_workout("A"); },
                |s| { let _ = s.add_exercise_to_workout(squat()); },
                |s| { let _ = s.add_set(0); },
                |s| { let _ = s.complete_workout(); },
                |s| { let _ = s.cancel_workout(); },
                |s| { s.update_goals(GoalsUpdate::default()); },
            ];

            // Walk a fixed pseudo-random order through every operation
            let mut seed: usize = 7;
            for _ in 0..200 {
                seed = (seed * 31 + 11) % 997;
                steps[seed % steps.len()](&mut store);

                if let Some(current) = store.current_workout() {
                    assert_eq!(current.status, WorkoutStatus::InProgress);
                }
                assert!(store.workout_history().iter().all(|w| w.is_completed()));
            }
        }

        it "only grows history by appending" {
            log_workout(&mut store, "First");
            let first = store.workout_history()[0].clone();
            log_workout(&mut store, "Second");

            assert_eq!(store.workout_history()[0], first);
            assert_eq!(store.workout_history()[1].name, "Second");
        }
    }
}
