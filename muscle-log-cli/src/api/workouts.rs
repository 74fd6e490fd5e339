use reqwest::Method;

use super::{ApiClient, ApiError, Payload};
use crate::models::{NewWorkoutSession, WorkoutSession};

impl ApiClient {
    /// All sessions of the signed-in user, newest first
    pub async fn list_sessions(&self) -> Result<Vec<WorkoutSession>, ApiError> {
        let sessions: Option<Vec<WorkoutSession>> =
            self.fetch(Method::GET, "/workouts", Payload::None).await?;

        let mut sessions = sessions.unwrap_or_default();
        sessions.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));

        tracing::debug!("Fetched {} workout sessions", sessions.len());
        Ok(sessions)
    }

    /// Create a session together with its sets in one request
    pub async fn create_session(&self, session: &NewWorkoutSession) -> Result<WorkoutSession, ApiError> {
        let created: WorkoutSession = self
            .fetch(Method::POST, "/workouts", Payload::json(session)?)
            .await?;

        tracing::info!(
            "Created workout session {} with {} sets",
            created.id,
            session.sets.len()
        );
        Ok(created)
    }
}
