use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable catalog entry describing a movement.
///
/// Exercises form a variation tree via `parent_id`: "Front Squat" points at
/// "Squat". The link is a lookup key into the catalog, never ownership, so a
/// variation can be copied into a workout without dragging its parent along.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    /// Base exercise this is a variation of. `None` for catalog roots and
    /// for ad-hoc exercises entered by the user.
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub category: ExerciseCategory,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    pub description: Option<String>,
}

impl Exercise {
    /// Build an ad-hoc exercise that is not part of the catalog.
    pub fn new(name: impl Into<String>, category: ExerciseCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: None,
            name: name.into(),
            category,
            muscle_groups: Vec::new(),
            equipment: Vec::new(),
            description: None,
        }
    }

    pub fn works(&self, muscle_group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle_group))
    }
}

/// The kind of training an exercise belongs to.
///
/// The category decides which set fields are meaningful:
/// - `Strength`: weight and reps
/// - `Cardio`: duration and distance
/// - `Flexibility`: none in particular
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Flexibility,
}

impl ExerciseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "strength" => Some(Self::Strength),
            "cardio" => Some(Self::Cardio),
            "flexibility" => Some(Self::Flexibility),
            _ => None,
        }
    }
}

/// A catalog exercise with its nested variations, used for tree views.
///
/// The `exercise` fields are flattened into JSON output, with an additional
/// `variations` array containing nested nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseTreeNode {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub variations: Vec<ExerciseTreeNode>,
}
