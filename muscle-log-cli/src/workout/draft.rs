use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::models::{NewExerciseSet, NewLiftRecord, NewWorkoutSession};

/// One set line as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub exercise_id: Option<i64>,
    pub weight_kg: f64,
    pub reps: i64,
}

/// Unsaved workout: a date, an optional note and ordered set lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutDraft {
    pub performed_on: Option<NaiveDate>,
    pub note: Option<String>,
    pub entries: Vec<SetEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    MissingDate,
    NoEntries,
    MissingExercise,
    InvalidWeight,
    InvalidReps,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::MissingDate => write!(f, "choose the date of the workout"),
            ValidationReason::NoEntries => write!(f, "add at least one set"),
            ValidationReason::MissingExercise => write!(f, "choose an exercise"),
            ValidationReason::InvalidWeight => write!(f, "weight (kg) must be greater than 0"),
            ValidationReason::InvalidReps => write!(f, "reps must be greater than 0"),
        }
    }
}

/// Draft rejected before anything was sent. `entry` is the 1-based set
/// line at fault, when the problem belongs to one line.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub entry: Option<usize>,
    pub reason: ValidationReason,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.entry {
            Some(entry) => write!(f, "Set #{}: {}", entry, self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Requests a validated draft turns into: one session with its nested sets,
/// then one lift record per set in the same order
#[derive(Debug, Clone, PartialEq)]
pub struct SavePlan {
    pub performed_on: NaiveDate,
    pub session: NewWorkoutSession,
    pub lifts: Vec<NewLiftRecord>,
}

impl WorkoutDraft {
    pub fn new(performed_on: NaiveDate) -> Self {
        Self {
            performed_on: Some(performed_on),
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn push(&mut self, exercise_id: i64, weight_kg: f64, reps: i64) {
        self.entries.push(SetEntry {
            exercise_id: Some(exercise_id),
            weight_kg,
            reps,
        });
    }

    /// Validate and number the sets 1..N in input order
    pub fn plan(&self) -> Result<SavePlan, ValidationError> {
        let performed_on = self.performed_on.ok_or(ValidationError {
            entry: None,
            reason: ValidationReason::MissingDate,
        })?;

        if self.entries.is_empty() {
            return Err(ValidationError {
                entry: None,
                reason: ValidationReason::NoEntries,
            });
        }

        let mut sets = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            let line = index + 1;
            let fail = |reason| ValidationError {
                entry: Some(line),
                reason,
            };

            let exercise_id = entry
                .exercise_id
                .filter(|id| *id > 0)
                .ok_or_else(|| fail(ValidationReason::MissingExercise))?;

            if !(entry.weight_kg > 0.0) || !entry.weight_kg.is_finite() {
                return Err(fail(ValidationReason::InvalidWeight));
            }

            let reps = u32::try_from(entry.reps)
                .ok()
                .filter(|reps| *reps > 0)
                .ok_or_else(|| fail(ValidationReason::InvalidReps))?;

            sets.push(NewExerciseSet {
                exercise_id,
                set_no: line as u32,
                weight_kg: entry.weight_kg,
                reps,
            });
        }

        let lifts = sets
            .iter()
            .map(|set| NewLiftRecord {
                exercise_id: set.exercise_id,
                performed_at: performed_on,
                weight_kg: set.weight_kg,
                reps: set.reps,
            })
            .collect();

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Ok(SavePlan {
            performed_on,
            session: NewWorkoutSession {
                performed_at: performed_on.and_time(chrono::NaiveTime::MIN),
                note,
                sets,
            },
            lifts,
        })
    }
}
