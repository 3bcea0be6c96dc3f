//! The built-in exercise catalog.
//!
//! Exercises are kept in a flat arena in depth-first order. Variations point
//! at their base exercise through `parent_id`; the catalog keeps a child index
//! for walking downwards. Neither direction owns the other.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Exercise, ExerciseCategory, ExerciseTreeNode};

use ExerciseCategory::{Cardio, Strength};

/// Input for deriving a variation from a base exercise.
#[derive(Debug, Clone, Default)]
pub struct VariationInput {
    pub name: String,
    pub description: Option<String>,
    /// Empty means "same muscles as the base exercise".
    pub muscle_groups: Vec<String>,
    /// Added on top of the base exercise's equipment.
    pub equipment: Vec<String>,
}

/// Coarse body-region grouping used to browse the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRegion {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
    Cardio,
    Olympic,
    Flexibility,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 9] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
        Self::Cardio,
        Self::Olympic,
        Self::Flexibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Legs => "legs",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Core => "core",
            Self::Cardio => "cardio",
            Self::Olympic => "olympic",
            Self::Flexibility => "flexibility",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }

    pub fn contains(&self, exercise: &Exercise) -> bool {
        match self {
            Self::Chest => exercise.works("chest"),
            Self::Back => exercise.works("back"),
            Self::Legs => ["quadriceps", "hamstrings", "glutes"]
                .iter()
                .any(|m| exercise.works(m)),
            Self::Shoulders => exercise.works("shoulders"),
            Self::Arms => ["biceps", "triceps"].iter().any(|m| exercise.works(m)),
            Self::Core => exercise.works("core"),
            Self::Cardio => exercise.category == ExerciseCategory::Cardio,
            Self::Olympic => exercise.works("full body"),
            Self::Flexibility => exercise.category == ExerciseCategory::Flexibility,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
    index: HashMap<Uuid, usize>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl ExerciseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard catalog shipped with liftlog.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for def in BUILTIN {
            catalog.insert_def(None, def);
        }
        catalog
    }

    /// Add a root exercise. Its `parent_id` is cleared.
    pub fn add_root(&mut self, mut exercise: Exercise) -> Uuid {
        exercise.parent_id = None;
        self.push(exercise)
    }

    /// Derive a variation from `base_id`.
    ///
    /// The variation inherits the base category, falls back to the base muscle
    /// groups when none are given, and lists the base equipment followed by
    /// its own. Returns `None` if the base is unknown.
    pub fn add_variation(&mut self, base_id: Uuid, input: VariationInput) -> Option<Uuid> {
        let base = self.get(base_id)?;

        let muscle_groups = if input.muscle_groups.is_empty() {
            base.muscle_groups.clone()
        } else {
            input.muscle_groups
        };
        let mut equipment = base.equipment.clone();
        for item in input.equipment {
            if !equipment.contains(&item) {
                equipment.push(item);
            }
        }

        let variation = Exercise {
            id: Uuid::new_v4(),
            parent_id: Some(base_id),
            name: input.name,
            category: base.category,
            muscle_groups,
            equipment,
            description: input.description,
        };
        Some(self.push(variation))
    }

    fn push(&mut self, exercise: Exercise) -> Uuid {
        let id = exercise.id;
        if let Some(parent_id) = exercise.parent_id {
            self.children.entry(parent_id).or_default().push(id);
        }
        self.index.insert(id, self.exercises.len());
        self.exercises.push(exercise);
        id
    }

    /// Load a built-in entry as written. Variations take the base category
    /// and fall back to its muscles; their equipment is used verbatim.
    fn insert_def(&mut self, parent: Option<Uuid>, def: &Def) {
        let mut exercise = Exercise::new(def.name, def.category);
        exercise.muscle_groups = strings(def.muscles);
        exercise.equipment = strings(def.equipment);
        exercise.description = non_empty(def.description);

        if let Some(base_id) = parent {
            let Some(base) = self.get(base_id) else {
                return;
            };
            exercise.parent_id = Some(base_id);
            exercise.category = base.category;
            if exercise.muscle_groups.is_empty() {
                exercise.muscle_groups = base.muscle_groups.clone();
            }
        }

        let id = self.push(exercise);
        for variation in def.variations {
            self.insert_def(Some(id), variation);
        }
    }

    // ============================================================
    // Lookups
    // ============================================================

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Exercise> {
        self.index.get(&id).map(|&i| &self.exercises[i])
    }

    /// Every exercise, each base followed by its variations.
    pub fn all(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn roots(&self) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.parent_id.is_none())
            .collect()
    }

    pub fn children(&self, id: Uuid) -> Vec<&Exercise> {
        self.children
            .get(&id)
            .map(|ids| ids.iter().filter_map(|c| self.get(*c)).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: Uuid) -> Option<&Exercise> {
        self.get(id)?.parent_id.and_then(|p| self.get(p))
    }

    pub fn is_leaf(&self, id: Uuid) -> bool {
        self.children.get(&id).map_or(true, |c| c.is_empty())
    }

    /// Case-insensitive exact name match.
    pub fn find_by_name(&self, name: &str) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Case-insensitive substring match on the name.
    pub fn search(&self, query: &str) -> Vec<&Exercise> {
        let query = query.trim().to_lowercase();
        self.exercises
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn by_category(&self, category: ExerciseCategory) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn by_region(&self, region: BodyRegion) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| region.contains(e)).collect()
    }

    /// The catalog as nested nodes for tree views.
    pub fn tree(&self) -> Vec<ExerciseTreeNode> {
        fn build_subtree(catalog: &ExerciseCatalog, exercise: &Exercise) -> ExerciseTreeNode {
            ExerciseTreeNode {
                exercise: exercise.clone(),
                variations: catalog
                    .children(exercise.id)
                    .into_iter()
                    .map(|child| build_subtree(catalog, child))
                    .collect(),
            }
        }

        self.roots()
            .into_iter()
            .map(|root| build_subtree(self, root))
            .collect()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

// ============================================================
// Built-in data
// ============================================================

struct Def {
    name: &'static str,
    category: ExerciseCategory,
    /// Empty on a variation means the same muscles as its base.
    muscles: &'static [&'static str],
    equipment: &'static [&'static str],
    description: &'static str,
    variations: &'static [Def],
}

macro_rules! v {
    ($name:expr, $muscles:expr, $equipment:expr, $description:expr $(,)?) => {
        Def {
            name: $name,
            category: Strength,
            muscles: $muscles,
            equipment: $equipment,
            description: $description,
            variations: &[],
        }
    };
}

macro_rules! family {
    ($name:expr, $category:expr, $muscles:expr, $equipment:expr, $description:expr, $variations:expr $(,)?) => {
        Def {
            name: $name,
            category: $category,
            muscles: $muscles,
            equipment: $equipment,
            description: $description,
            variations: $variations,
        }
    };
}

const BUILTIN: &[Def] = &[
    family!(
        "Bench Press",
        Strength,
        &["chest", "shoulders", "triceps"],
        &["bench"],
        "Fundamental chest pressing movement",
        &[
            v!("Barbell Flat Bench Press", &[], &["barbell"], "Classic flat bench press with barbell"),
            v!(
                "Barbell Incline Bench Press",
                &["upper chest", "shoulders", "triceps"],
                &["barbell", "incline bench"],
                "Incline press targeting upper chest",
            ),
            v!(
                "Barbell Decline Bench Press",
                &["lower chest", "shoulders", "triceps"],
                &["barbell", "decline bench"],
                "Decline press targeting lower chest",
            ),
            v!(
                "Dumbbell Flat Bench Press",
                &[],
                &["dumbbells"],
                "Flat press with dumbbells for greater range of motion",
            ),
            v!(
                "Dumbbell Incline Bench Press",
                &["upper chest", "shoulders", "triceps"],
                &["dumbbells", "incline bench"],
                "Incline press with dumbbells",
            ),
            v!("Close-Grip Bench Press", &["chest", "triceps"], &["barbell"], "Narrow grip press emphasizing triceps"),
        ],
    ),
    family!(
        "Deadlift",
        Strength,
        &["back", "hamstrings", "glutes", "core"],
        &["barbell"],
        "Fundamental hip-hinge movement",
        &[
            v!("Conventional Deadlift", &[], &[], "Traditional deadlift stance"),
            v!("Sumo Deadlift", &[], &[], "Wide stance deadlift variation"),
            v!(
                "Romanian Deadlift",
                &["back", "hamstrings", "glutes"],
                &[],
                "Stiff-legged variation focusing on hamstrings",
            ),
            v!(
                "Single-Leg Romanian Deadlift",
                &[],
                &["dumbbell"],
                "Unilateral Romanian deadlift for balance and stability",
            ),
            v!("Trap Bar Deadlift", &[], &["trap bar"], "Deadlift using hexagonal bar"),
        ],
    ),
    family!(
        "Squat",
        Strength,
        &["quadriceps", "hamstrings", "glutes", "core"],
        &[],
        "Fundamental lower body movement",
        &[
            v!("Back Squat", &[], &["barbell", "squat rack"], "Traditional barbell back squat"),
            v!("Front Squat", &["quadriceps", "core"], &["barbell", "squat rack"], "Barbell squat with front rack position"),
            v!(
                "Bulgarian Split Squat",
                &["quadriceps", "hamstrings", "glutes"],
                &["dumbbells", "bench"],
                "Unilateral squat with rear foot elevated",
            ),
            v!("Goblet Squat", &[], &["dumbbell", "kettlebell"], "Squat holding weight at chest"),
            v!(
                "Overhead Squat",
                &["quadriceps", "hamstrings", "glutes", "shoulders", "core"],
                &["barbell"],
                "Squat while holding weight overhead",
            ),
        ],
    ),
    family!(
        "Pull-up",
        Strength,
        &["back", "biceps", "shoulders"],
        &["pull-up bar"],
        "Vertical pulling movement",
        &[
            v!("Wide-Grip Pull-up", &[], &["pull-up bar"], "Pull-up with wide hand placement"),
            v!("Chin-up", &[], &["pull-up bar"], "Pull-up with underhand grip"),
            v!("Neutral-Grip Pull-up", &[], &["pull-up bar"], "Pull-up with parallel grip"),
            v!("Weighted Pull-up", &[], &["pull-up bar", "weight belt"], "Pull-up with added weight"),
        ],
    ),
    family!(
        "Push-up",
        Strength,
        &["chest", "shoulders", "triceps"],
        &[],
        "Fundamental pushing movement",
        &[
            v!("Standard Push-up", &[], &[], "Classic push-up form"),
            v!("Diamond Push-up", &["chest", "triceps"], &[], "Close hand placement for triceps emphasis"),
            v!("Wide Push-up", &["chest", "shoulders"], &[], "Wide hand placement for chest emphasis"),
            v!("Decline Push-up", &["upper chest", "shoulders", "triceps"], &["bench"], "Feet elevated push-up"),
            v!(
                "Incline Push-up",
                &["lower chest", "shoulders", "triceps"],
                &["bench"],
                "Hands elevated push-up for reduced difficulty",
            ),
        ],
    ),
    family!(
        "Shoulder Press",
        Strength,
        &["shoulders", "triceps"],
        &[],
        "Vertical pressing movement",
        &[
            v!("Standing Military Press", &[], &["barbell"], "Standing overhead press with barbell"),
            v!("Seated Dumbbell Press", &[], &["dumbbells", "bench"], "Seated overhead press with dumbbells"),
            v!("Arnold Press", &[], &["dumbbells"], "Rotational dumbbell press"),
            v!("Push Press", &["shoulders", "triceps", "legs"], &["barbell"], "Explosive overhead press with leg drive"),
        ],
    ),
    family!(
        "Row",
        Strength,
        &["back", "biceps"],
        &[],
        "Horizontal pulling movement",
        &[
            v!("Barbell Row", &[], &["barbell"], "Traditional bent-over row"),
            v!("Pendlay Row", &[], &["barbell"], "Explosive row from floor"),
            v!("Dumbbell Row", &[], &["dumbbell", "bench"], "Single-arm row with support"),
            v!("Seated Cable Row", &[], &["cable machine"], "Machine-based rowing movement"),
            v!("Meadows Row", &[], &["barbell"], "Unilateral row with landmine attachment"),
        ],
    ),
    family!(
        "Olympic Lifts",
        Strength,
        &["full body"],
        &["barbell"],
        "Explosive weightlifting movements",
        &[
            v!("Clean and Jerk", &[], &["barbell"], "Two-part Olympic lift"),
            v!("Snatch", &[], &["barbell"], "Single-movement Olympic lift"),
            v!("Power Clean", &[], &["barbell"], "Clean variation with higher catch"),
            v!("Hang Clean", &[], &["barbell"], "Clean from hanging position"),
        ],
    ),
    family!(
        "Core",
        Strength,
        &["core", "abs", "obliques"],
        &[],
        "Core strengthening movements",
        &[
            v!("Plank", &["core", "abs"], &[], "Isometric core hold"),
            v!("Side Plank", &["core", "obliques"], &[], "Lateral core hold"),
            v!("Russian Twist", &["core", "obliques"], &["weight plate", "dumbbell"], "Rotational core movement"),
            v!("Cable Woodchopper", &["core", "obliques"], &["cable machine"], "Dynamic rotational movement"),
            v!("Ab Wheel Rollout", &["core", "abs"], &["ab wheel"], "Dynamic core stability exercise"),
        ],
    ),
    family!(
        "Cardio",
        Cardio,
        &["full body"],
        &[],
        "Cardiovascular exercises",
        &[
            family!(
                "Running",
                Cardio,
                &["legs", "core"],
                &[],
                "",
                &[
                    v!("Treadmill Running", &[], &["treadmill"], "Indoor running"),
                    v!("Outdoor Running", &[], &[], "Running on various terrains"),
                    v!("Sprint Intervals", &[], &[], "High-intensity running intervals"),
                ],
            ),
            family!(
                "Cycling",
                Cardio,
                &["legs"],
                &[],
                "",
                &[
                    v!("Stationary Bike", &[], &["stationary bike"], "Indoor cycling"),
                    v!("Spin Class", &[], &["spin bike"], "Group cycling workout"),
                ],
            ),
            v!("Rowing", &["back", "legs", "core", "arms"], &["rowing machine"], "Full-body cardio on rower"),
            v!("Jump Rope", &["legs", "shoulders"], &["jump rope"], "High-intensity rope jumping"),
        ],
    ),
];
