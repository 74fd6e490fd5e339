use serde::{Deserialize, Serialize};

use super::timestamp::{self, Timestamp};

/// One (timestamp, value) sample
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    #[serde(with = "timestamp")]
    pub t: Timestamp,
    pub v: f64,
}

/// Irregular series belonging to one member; members need not share
/// timestamps
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberSeries {
    #[serde(alias = "username")]
    pub label: String,
    #[serde(default)]
    pub points: Vec<SeriesPoint>,
}
