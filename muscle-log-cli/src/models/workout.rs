use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};

/// Workout session as returned by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: i64,
    #[serde(with = "timestamp")]
    pub performed_at: Timestamp,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

/// One performed set inside a session; `set_no` is 1-based
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseSet {
    pub exercise_id: i64,
    pub set_no: u32,
    pub weight_kg: f64,
    pub reps: u32,
}

/// Body of `POST /workouts`: the session and all of its sets in one request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewWorkoutSession {
    pub performed_at: NaiveDateTime,
    pub note: String,
    pub sets: Vec<NewExerciseSet>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewExerciseSet {
    pub exercise_id: i64,
    pub set_no: u32,
    pub weight_kg: f64,
    pub reps: u32,
}

impl WorkoutSession {
    /// Total weight moved across all sets
    pub fn volume_kg(&self) -> f64 {
        self.sets
            .iter()
            .map(|set| set.weight_kg * f64::from(set.reps))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_session_from_server_json() {
        let json = r#"{
            "id": 7,
            "performed_at": "2024-05-02T00:00:00",
            "note": null,
            "sets": [
                {"exercise_id": 1, "set_no": 1, "weight_kg": 60.0, "reps": 10},
                {"exercise_id": 1, "set_no": 2, "weight_kg": 62.5, "reps": 8}
            ]
        }"#;

        let session: WorkoutSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.id, 7);
        assert_eq!(
            session.performed_at.date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
        );
        assert!(session.note.is_none());
        assert_eq!(session.sets[1].set_no, 2);
        assert_eq!(session.volume_kg(), 1100.0);
    }

    #[test]
    fn test_new_session_wire_format() {
        let body = NewWorkoutSession {
            performed_at: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            note: String::new(),
            sets: vec![NewExerciseSet {
                exercise_id: 3,
                set_no: 1,
                weight_kg: 40.0,
                reps: 12,
            }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["performed_at"], "2024-05-02T00:00:00");
        assert_eq!(value["sets"][0]["set_no"], 1);
    }
}
