use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::series::{MemberSeries, SeriesPoint};

/// Stand-alone lift sample kept for trend charts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiftRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub exercise_id: i64,
    pub performed_at: NaiveDate,
    pub weight_kg: f64,
    pub reps: u32,
}

/// Body of `POST /lifts`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLiftRecord {
    pub exercise_id: i64,
    pub performed_at: NaiveDate,
    pub weight_kg: f64,
    pub reps: u32,
}

/// Estimated 1RM trend for one exercise (`GET /lifts/series`)
#[derive(Debug, Clone, Deserialize)]
pub struct LiftSeries {
    #[serde(default)]
    pub exercise_id: Option<i64>,
    #[serde(default)]
    pub exercise_name: Option<String>,
    #[serde(default)]
    pub series: Vec<SeriesPoint>,
}

impl LiftSeries {
    /// Wrap the trend as a one-member series so it can go through alignment
    pub fn into_member_series(self) -> MemberSeries {
        let name = self
            .exercise_name
            .unwrap_or_else(|| "exercise".to_string());

        MemberSeries {
            label: format!("{} 1RM(kg)", name),
            points: self.series,
        }
    }
}
