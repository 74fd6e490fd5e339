use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::session::SessionContext;

mod auth;
mod error;
mod exercises;
mod lifts;
mod teams;
mod workouts;

pub use error::ApiError;
pub use teams::DEFAULT_TEAM_METRIC;

/// What a gateway call produced.
///
/// `Unauthenticated` is not a body: the token has been cleared and the
/// caller must abort instead of treating it as "no data".
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Unauthenticated,
    Empty,
    Json(Value),
    /// Non-empty body that was not JSON, kept for diagnostics
    Raw(String),
}

/// Request body variants the service accepts
#[derive(Debug, Clone)]
pub enum Payload {
    None,
    Json(Value),
    Form(Vec<(&'static str, String)>),
}

impl Payload {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        serde_json::to_value(body)
            .map(Payload::Json)
            .map_err(|e| ApiError::Decode {
                path: "<request>".to_string(),
                message: e.to_string(),
            })
    }
}

/// Authenticated request gateway for the Muscle Log service
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Create a new API client bound to a session
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Send one request with the current bearer token.
    ///
    /// A 401 clears the session and yields `Reply::Unauthenticated` rather
    /// than an error. Any other non-2xx fails with `RequestFailed` carrying
    /// the raw body.
    pub async fn call(&self, method: Method, path: &str, payload: Payload) -> Result<Reply, ApiError> {
        self.call_with_query(method, path, &[], payload).await
    }

    /// `call` with query parameters; values are URL-encoded
    pub async fn call_with_query(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Payload,
    ) -> Result<Reply, ApiError> {
        let (status, text) = self.send(method.clone(), path, query, payload).await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("{} {} returned 401, signing out", method, path);
            self.session.expire();
            return Ok(Reply::Unauthenticated);
        }

        if !status.is_success() {
            tracing::warn!("{} {} returned {}", method, path, status);
            return Err(ApiError::request_failed(path, status, text));
        }

        tracing::debug!("{} {} returned {} ({} bytes)", method, path, status, text.len());
        Ok(parse_body(text))
    }

    /// Raw exchange: status and body text, no session side effects
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Payload,
    ) -> Result<(StatusCode, String), ApiError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!("{} {}", method, path);

        let mut request = self.client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request = match payload {
            Payload::None => request,
            Payload::Json(body) => request.json(&body),
            Payload::Form(fields) => request.form(&fields),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed to send: {}", method, path, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        Ok((status, text))
    }

    /// Protected call decoded into `T`; short-circuits when no token is held
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> Result<T, ApiError> {
        self.fetch_with_query(method, path, &[], payload).await
    }

    pub(crate) async fn fetch_with_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        payload: Payload,
    ) -> Result<T, ApiError> {
        self.require_token()?;

        let reply = self.call_with_query(method, path, query, payload).await?;
        decode(path, reply)
    }

    fn require_token(&self) -> Result<(), ApiError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NotLoggedIn)
        }
    }
}

fn parse_body(text: String) -> Reply {
    if text.is_empty() {
        return Reply::Empty;
    }

    match serde_json::from_str(&text) {
        Ok(value) => Reply::Json(value),
        Err(_) => Reply::Raw(text),
    }
}

fn decode<T: DeserializeOwned>(path: &str, reply: Reply) -> Result<T, ApiError> {
    let value = match reply {
        Reply::Unauthenticated => return Err(ApiError::AuthExpired),
        Reply::Empty => Value::Null,
        Reply::Json(value) => value,
        Reply::Raw(text) => {
            return Err(ApiError::Decode {
                path: path.to_string(),
                message: format!("body is not JSON: {}", text),
            })
        }
    };

    serde_json::from_value(value).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_api_client_creation() {
        let config = Config::default();
        let client = ApiClient::new(&config.api, SessionContext::new(None));
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(String::new()), Reply::Empty);
        assert_eq!(
            parse_body("{\"id\":1}".to_string()),
            Reply::Json(serde_json::json!({"id": 1}))
        );
        assert_eq!(
            parse_body("Internal Server Error".to_string()),
            Reply::Raw("Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_decode_empty_into_option() {
        let decoded: Option<Vec<i64>> = decode("/x", Reply::Empty).unwrap();
        assert!(decoded.is_none());

        let err = decode::<Vec<i64>>("/x", Reply::Unauthenticated).unwrap_err();
        assert_eq!(err, ApiError::AuthExpired);

        let err = decode::<Vec<i64>>("/x", Reply::Raw("oops".to_string())).unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }
}
