use serde::{Deserialize, Serialize};

/// Registration payload
#[derive(Debug, Serialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Login response from API
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// User information
#[derive(Debug, Deserialize, Clone)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl UserInfo {
    /// Name shown in the header; falls back to the email address
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.clone())
    }
}
