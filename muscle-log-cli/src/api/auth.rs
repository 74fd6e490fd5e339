use reqwest::{Method, StatusCode};

use super::{decode, parse_body, ApiClient, ApiError, Payload};
use crate::models::{NewUser, TokenResponse, UserInfo};

impl ApiClient {
    /// Exchange credentials for a token and install it in the session.
    ///
    /// Wrong credentials come back as 401 and surface as
    /// `InvalidCredentials`; the session state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        tracing::debug!("Logging in as {}", email);

        let form = Payload::Form(vec![
            ("username", email.to_string()),
            ("password", password.to_string()),
        ]);
        let (status, text) = self.send(Method::POST, "/auth/login", &[], form).await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("Login refused for {}", email);
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(ApiError::request_failed("/auth/login", status, text));
        }

        let token: TokenResponse = decode("/auth/login", parse_body(text))?;

        self.session().sign_in(token.access_token.clone());
        tracing::info!("Successfully logged in as {}", email);
        Ok(token)
    }

    pub async fn register(&self, user: &NewUser) -> Result<UserInfo, ApiError> {
        let reply = self
            .call(Method::POST, "/auth/register", Payload::json(user)?)
            .await?;
        decode("/auth/register", reply)
    }

    /// Get current user information
    pub async fn whoami(&self) -> Result<UserInfo, ApiError> {
        self.fetch(Method::GET, "/auth/me", Payload::None).await
    }
}
