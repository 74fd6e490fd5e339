use reqwest::Method;

use super::{ApiClient, ApiError, Payload};
use crate::models::{JoinTeam, JoinedTeam, NewTeam, Team, TeamSeries};

/// Metric charted when none is chosen; a 0-100 score
pub const DEFAULT_TEAM_METRIC: &str = "level";

impl ApiClient {
    /// Teams the signed-in user belongs to
    pub async fn my_teams(&self) -> Result<Vec<Team>, ApiError> {
        let teams: Option<Vec<Team>> = self.fetch(Method::GET, "/teams/my", Payload::None).await?;
        Ok(teams.unwrap_or_default())
    }

    /// Create a team; the response carries the invite code to share
    pub async fn create_team(&self, name: &str) -> Result<Team, ApiError> {
        let body = NewTeam {
            name: name.trim().to_string(),
        };
        let team: Team = self
            .fetch(Method::POST, "/teams", Payload::json(&body)?)
            .await?;

        tracing::info!("Created team {}", team);
        Ok(team)
    }

    pub async fn join_team(&self, invite_code: &str) -> Result<JoinedTeam, ApiError> {
        let body = JoinTeam {
            invite_code: invite_code.trim().to_string(),
        };
        let joined: Option<JoinedTeam> = self
            .fetch(Method::POST, "/teams/join_by_code", Payload::json(&body)?)
            .await?;

        Ok(joined.unwrap_or(JoinedTeam { team_id: None }))
    }

    /// Raw per-member series for one metric; align before charting
    pub async fn team_series(&self, team_id: i64, metric: &str) -> Result<TeamSeries, ApiError> {
        let path = format!("/teams/{}/series", team_id);
        let series: Option<TeamSeries> = self
            .fetch_with_query(Method::GET, &path, &[("metric", metric)], Payload::None)
            .await?;

        Ok(series.unwrap_or(TeamSeries {
            metric: Some(metric.to_string()),
            series: Vec::new(),
        }))
    }
}
