use reqwest::Method;

use super::{ApiClient, ApiError, Payload, Reply};
use crate::models::{LiftSeries, NewLiftRecord};

impl ApiClient {
    /// Append one sample to the lift log. Any 2xx counts as stored,
    /// whatever the body says.
    pub async fn create_lift(&self, lift: &NewLiftRecord) -> Result<(), ApiError> {
        self.require_token()?;

        let reply = self
            .call(Method::POST, "/lifts", Payload::json(lift)?)
            .await?;
        if reply == Reply::Unauthenticated {
            return Err(ApiError::AuthExpired);
        }

        tracing::debug!(
            "Logged lift exercise={} {}kg x {}",
            lift.exercise_id,
            lift.weight_kg,
            lift.reps
        );
        Ok(())
    }

    /// Estimated 1RM trend for one exercise
    pub async fn lift_series(&self, exercise_id: i64) -> Result<LiftSeries, ApiError> {
        let exercise_id_param = exercise_id.to_string();
        let series: Option<LiftSeries> = self
            .fetch_with_query(
                Method::GET,
                "/lifts/series",
                &[("exercise_id", exercise_id_param.as_str())],
                Payload::None,
            )
            .await?;

        Ok(series.unwrap_or(LiftSeries {
            exercise_id: Some(exercise_id),
            exercise_name: None,
            series: Vec::new(),
        }))
    }
}
