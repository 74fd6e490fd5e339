use serde::{Deserialize, Serialize};

/// Exercise catalogue entry owned by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NewExercise {
    pub name: String,
}
