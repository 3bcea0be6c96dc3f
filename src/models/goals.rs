use serde::{Deserialize, Serialize};

/// User-configured workout goals.
///
/// Targets are what the user asked for; progress is what the store counted
/// the last time a workout was completed. The two never share a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goals {
    pub targets: GoalCounts,
    pub progress: GoalCounts,
    /// Distinguishes "never configured" from "configured to zero".
    pub has_set_initial_goals: bool,
}

/// A pair of weekly and monthly workout counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalCounts {
    pub weekly_workouts: u32,
    pub monthly_workouts: u32,
}

/// Input for updating goal targets. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalsUpdate {
    pub weekly_workouts: Option<u32>,
    pub monthly_workouts: Option<u32>,
}

impl Goals {
    /// Merge new targets and mark the goals as configured.
    pub fn apply(&mut self, update: &GoalsUpdate) {
        if let Some(weekly) = update.weekly_workouts {
            self.targets.weekly_workouts = weekly;
        }
        if let Some(monthly) = update.monthly_workouts {
            self.targets.monthly_workouts = monthly;
        }
        self.has_set_initial_goals = true;
    }
}
