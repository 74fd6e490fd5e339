use anyhow::{Context, Result};
use regex::Regex;

use crate::models::Exercise;
use crate::workout::SetEntry;

/// Parse set lines such as `bench press 80x5`, `squat 100kg x 3 reps` or
/// `3:60x10` (exercise id, weight, reps)
pub struct SetParser {
    line_pattern: Regex,
    exercises: Vec<Exercise>,
}

impl SetParser {
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        let line_pattern = Regex::new(
            r"(?i)^\s*(?P<exercise>.+?)\s*[:\s]\s*(?P<weight>\d+(?:\.\d+)?)\s*(?:kg)?\s*[x×*]\s*(?P<reps>-?\d+)\s*(?:reps?)?\s*$",
        )
        .context("Failed to compile set line pattern")?;

        Ok(Self {
            line_pattern,
            exercises,
        })
    }

    /// Turn one line into a set entry. An exercise that matches nothing in
    /// the catalogue is left unset so validation reports the line.
    pub fn parse(&self, line: &str) -> Result<SetEntry> {
        let captures = self
            .line_pattern
            .captures(line)
            .with_context(|| format!("Could not read set '{}' (expected e.g. 'bench 80x5')", line))?;

        let weight_kg: f64 = captures["weight"]
            .parse()
            .with_context(|| format!("Invalid weight in '{}'", line))?;
        let reps: i64 = captures["reps"]
            .parse()
            .with_context(|| format!("Invalid reps in '{}'", line))?;

        Ok(SetEntry {
            exercise_id: self.resolve(captures["exercise"].trim()),
            weight_kg,
            reps,
        })
    }

    fn resolve(&self, exercise: &str) -> Option<i64> {
        if let Ok(id) = exercise.parse::<i64>() {
            return self.exercises.iter().find(|ex| ex.id == id).map(|ex| ex.id);
        }

        self.exercises
            .iter()
            .find(|ex| ex.name.eq_ignore_ascii_case(exercise))
            .map(|ex| ex.id)
    }
}
