use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by calls through the gateway.
///
/// `Clone` so a single failed fetch can be handed to every caller that
/// joined it through the single-flight coordinator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered 401. The session token has already been cleared.
    #[error("Authentication expired, please log in again")]
    AuthExpired,

    /// Login was refused; there was no session to expire
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No token is held, so the call was never sent
    #[error("Not logged in")]
    NotLoggedIn,

    /// Any non-2xx answer other than 401; `body` is kept verbatim
    #[error("{path} {status}\n{body}")]
    RequestFailed {
        path: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx answer whose body did not have the expected shape
    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },
}

impl ApiError {
    pub fn request_failed(path: &str, status: StatusCode, body: String) -> Self {
        ApiError::RequestFailed {
            path: path.to_string(),
            status: status.as_u16(),
            body,
        }
    }

    /// Errors after which the caller must stop and send the user to login
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired | ApiError::NotLoggedIn)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::AuthExpired | ApiError::InvalidCredentials => {
                Some(StatusCode::UNAUTHORIZED.as_u16())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}
