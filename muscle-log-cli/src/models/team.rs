use serde::{Deserialize, Serialize};

use super::series::MemberSeries;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub invite_code: Option<String>,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} (id:{})", name, self.id),
            None => write!(f, "team {}", self.id),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewTeam {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct JoinTeam {
    pub invite_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinedTeam {
    #[serde(default)]
    pub team_id: Option<i64>,
}

/// Per-member metric trend for one team (`GET /teams/{id}/series`)
#[derive(Debug, Clone, Deserialize)]
pub struct TeamSeries {
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub series: Vec<MemberSeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_series_accepts_username_labels() {
        let json = r#"{"series": [
            {"username": "aki", "points": [{"t": "2024-01-01T00:00:00", "v": 40}]},
            {"username": "ren", "points": []}
        ]}"#;

        let parsed: TeamSeries = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.series.len(), 2);
        assert_eq!(parsed.series[0].label, "aki");
        assert_eq!(parsed.series[0].points[0].v, 40.0);
        assert!(parsed.series[1].points.is_empty());
    }

    #[test]
    fn test_team_display() {
        let team = Team {
            id: 3,
            name: Some("Bench Club".to_string()),
            invite_code: None,
        };
        assert_eq!(team.to_string(), "Bench Club (id:3)");
    }
}
