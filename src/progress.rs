//! Derived progress calculations over the workout history.
//!
//! Nothing here is stored. Week and month boundaries are computed fresh for a
//! local calendar day, with each boundary date resolved to the instant its own
//! midnight began.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::Serialize;

use crate::models::{GoalCounts, Goals, Workout};

/// Number of history entries shown in "recent workouts" views.
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// The instants the current week and month began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Boundaries {
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
}

impl Boundaries {
    /// Boundaries for `now`, resolved in `now`'s own timezone.
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, first_day: Weekday) -> Self {
        let tz = now.timezone();
        Self::resolve(now.date_naive(), first_day, |date| local_midnight(&tz, date))
    }

    /// Boundaries for the local calendar day `today`.
    ///
    /// `midnight` maps a local date to the instant that date began, so the
    /// caller decides which zone rules apply on each boundary date.
    pub fn resolve(
        today: NaiveDate,
        first_day: Weekday,
        midnight: impl Fn(NaiveDate) -> DateTime<Utc>,
    ) -> Self {
        Self {
            week_start: midnight(week_start_date(today, first_day)),
            month_start: midnight(month_start_date(today)),
        }
    }
}

/// The most recent `first_day` on or before `today`.
pub fn week_start_date(today: NaiveDate, first_day: Weekday) -> NaiveDate {
    let back = (today.weekday().num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7;
    today - Duration::days(i64::from(back))
}

pub fn month_start_date(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

/// Midnight on the most recent `first_day` on or before `now`.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>, first_day: Weekday) -> DateTime<Utc> {
    Boundaries::at(now, first_day).week_start
}

/// Midnight on the 1st of `now`'s calendar month.
pub fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    local_midnight(&now.timezone(), month_start_date(now.date_naive()))
}

/// The instant `date` began in `tz`, using the offset in force on that date.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    // A DST jump can skip midnight; the day then starts an hour later.
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// History entries dated on or after `start`, regardless of status.
pub fn workouts_since(history: &[Workout], start: DateTime<Utc>) -> Vec<&Workout> {
    history.iter().filter(|w| w.date >= start).collect()
}

/// Completed workouts since each boundary.
pub fn completed_counts(history: &[Workout], bounds: &Boundaries) -> GoalCounts {
    let count_since = |start: DateTime<Utc>| {
        history
            .iter()
            .filter(|w| w.is_completed() && w.date >= start)
            .count() as u32
    };

    GoalCounts {
        weekly_workouts: count_since(bounds.week_start),
        monthly_workouts: count_since(bounds.month_start),
    }
}

/// The last `limit` history entries, most recent first.
pub fn recent_workouts(history: &[Workout], limit: usize) -> Vec<&Workout> {
    history.iter().rev().take(limit).collect()
}

/// Whole minutes between the workout's start and `now`, rounded, never negative.
pub fn elapsed_minutes(workout: &Workout, now: DateTime<Utc>) -> i64 {
    let millis = (now - workout.date).num_milliseconds();
    ((millis as f64) / 60_000.0).round().max(0.0) as i64
}

/// Whether the workout started on the same calendar day as `now`.
pub fn is_same_day<Tz: TimeZone>(workout: &Workout, now: &DateTime<Tz>) -> bool {
    workout.date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// "Squat, Bench Press +1 more"
pub fn exercise_summary(workout: &Workout, shown: usize) -> String {
    let names: Vec<&str> = workout
        .exercises
        .iter()
        .take(shown)
        .map(|e| e.name())
        .collect();
    let mut summary = names.join(", ");
    let hidden = workout.exercises.len().saturating_sub(shown);
    if hidden > 0 {
        summary.push_str(&format!(" +{} more", hidden));
    }
    summary
}

/// Progress toward a single target.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GoalProgress {
    pub completed: usize,
    pub target: u32,
    /// 0 to 100. Zero when no target is set.
    pub percent: f64,
}

impl GoalProgress {
    pub fn new(completed: usize, target: u32) -> Self {
        let percent = if target == 0 {
            0.0
        } else {
            (completed as f64 / f64::from(target) * 100.0).min(100.0)
        };

        Self {
            completed,
            target,
            percent,
        }
    }

    pub fn is_met(&self) -> bool {
        self.target > 0 && self.completed >= self.target as usize
    }

    pub fn remaining(&self) -> usize {
        (self.target as usize).saturating_sub(self.completed)
    }
}

/// Dashboard numbers for the current week and month.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
    pub weekly: GoalProgress,
    pub monthly: GoalProgress,
}

impl ProgressReport {
    pub fn compute(history: &[Workout], goals: &Goals, bounds: &Boundaries) -> Self {
        Self {
            week_start: bounds.week_start,
            month_start: bounds.month_start,
            weekly: GoalProgress::new(
                workouts_since(history, bounds.week_start).len(),
                goals.targets.weekly_workouts,
            ),
            monthly: GoalProgress::new(
                workouts_since(history, bounds.month_start).len(),
                goals.targets.monthly_workouts,
            ),
        }
    }
}
