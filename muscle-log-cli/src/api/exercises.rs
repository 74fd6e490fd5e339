use reqwest::Method;

use super::{ApiClient, ApiError, Payload};
use crate::models::{Exercise, NewExercise};

impl ApiClient {
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        let exercises: Option<Vec<Exercise>> =
            self.fetch(Method::GET, "/exercises", Payload::None).await?;
        Ok(exercises.unwrap_or_default())
    }

    pub async fn create_exercise(&self, name: &str) -> Result<Exercise, ApiError> {
        let body = NewExercise {
            name: name.trim().to_string(),
        };
        let created: Exercise = self
            .fetch(Method::POST, "/exercises", Payload::json(&body)?)
            .await?;

        tracing::info!("Created exercise {} (id={})", created.name, created.id);
        Ok(created)
    }
}
