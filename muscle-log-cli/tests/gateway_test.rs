use muscle_log_cli::api::{ApiClient, ApiError, Payload, Reply};
use muscle_log_cli::config::ApiConfig;
use muscle_log_cli::session::{AuthState, SessionContext};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

fn client(url: String, token: Option<&str>) -> (ApiClient, Arc<SessionContext>) {
    let session = SessionContext::new(token.map(str::to_string));
    let config = ApiConfig {
        base_url: url,
        timeout_seconds: 5,
    };
    let client = ApiClient::new(&config, Arc::clone(&session)).unwrap();
    (client, session)
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/exercises")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body(r#"[{"id":1,"name":"Squat"}]"#)
        .create_async()
        .await;

    let (client, _) = client(server.url(), Some("tok-1"));
    let reply = client
        .call(Method::GET, "/exercises", Payload::None)
        .await
        .unwrap();

    assert_eq!(reply, Reply::Json(json!([{"id": 1, "name": "Squat"}])));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/register")
        .match_header("authorization", mockito::Matcher::Missing)
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    let (client, _) = client(server.url(), None);
    let reply = client
        .call(Method::POST, "/auth/register", Payload::Json(json!({"email": "a@b.c"})))
        .await
        .unwrap();

    assert_eq!(reply, Reply::Empty);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/workouts")
        .with_status(401)
        .with_body(r#"{"detail":"Could not validate credentials"}"#)
        .create_async()
        .await;

    let (client, session) = client(server.url(), Some("stale"));
    let state = session.subscribe();

    let reply = client
        .call(Method::GET, "/workouts", Payload::None)
        .await
        .unwrap();

    assert_eq!(reply, Reply::Unauthenticated);
    assert!(session.token().is_none());
    assert_eq!(*state.borrow(), AuthState::Expired);
}

#[tokio::test]
async fn test_typed_call_maps_unauthorized_to_auth_expired() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/workouts")
        .with_status(401)
        .create_async()
        .await;

    let (client, session) = client(server.url(), Some("stale"));

    let err = client.list_sessions().await.unwrap_err();
    assert_eq!(err, ApiError::AuthExpired);

    // Token is gone, so the next call is refused locally
    let err = client.list_sessions().await.unwrap_err();
    assert_eq!(err, ApiError::NotLoggedIn);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_error_body_kept_verbatim() {
    let body = r#"{"detail":[{"loc":["body","sets",0,"reps"],"msg":"ensure this value is greater than 0"}]}"#;

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/workouts")
        .with_status(422)
        .with_body(body)
        .create_async()
        .await;

    let (client, session) = client(server.url(), Some("tok"));
    let err = client
        .call(Method::POST, "/workouts", Payload::Json(json!({})))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::RequestFailed {
            path: "/workouts".to_string(),
            status: 422,
            body: body.to_string(),
        }
    );
    // Only 401 touches the session
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_non_json_success_body_is_raw() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/auth/me")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let (client, _) = client(server.url(), Some("tok"));
    let reply = client
        .call(Method::GET, "/auth/me", Payload::None)
        .await
        .unwrap();

    assert_eq!(reply, Reply::Raw("ok".to_string()));
}

#[tokio::test]
async fn test_network_failure() {
    // Nothing listens on port 9 of localhost
    let (client, _) = client("http://127.0.0.1:9".to_string(), Some("tok"));
    let err = client
        .call(Method::GET, "/workouts", Payload::None)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn test_login_installs_token() {
    let mut server = mockito::Server::new_async().await;
    let login = server
        .mock("POST", "/auth/login")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("username".into(), "lee@example.com".into()),
            mockito::Matcher::UrlEncoded("password".into(), "secret".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"fresh","token_type":"bearer"}"#)
        .create_async()
        .await;
    let me = server
        .mock("GET", "/auth/me")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(r#"{"id":7,"email":"lee@example.com","username":"lee"}"#)
        .create_async()
        .await;

    let (client, session) = client(server.url(), None);
    client.login("lee@example.com", "secret").await.unwrap();
    assert_eq!(session.token().as_deref(), Some("fresh"));

    let user = client.whoami().await.unwrap();
    assert_eq!(user.display_name(), "lee");

    login.assert_async().await;
    me.assert_async().await;
}

#[tokio::test]
async fn test_team_series_query() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/teams/3/series")
        .match_query(mockito::Matcher::UrlEncoded("metric".into(), "level".into()))
        .with_status(200)
        .with_body(
            r#"{"metric":"level","series":[{"username":"ann","points":[{"t":"2024-01-01T00:00:00Z","v":2}]}]}"#,
        )
        .create_async()
        .await;

    let (client, _) = client(server.url(), Some("tok"));
    let series = client.team_series(3, "level").await.unwrap();

    assert_eq!(series.series.len(), 1);
    assert_eq!(series.series[0].label, "ann");
    assert_eq!(series.series[0].points[0].v, 2.0);
}

#[tokio::test]
async fn test_free_form_metric_is_url_encoded() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/teams/1/series")
        .match_query(mockito::Matcher::UrlEncoded(
            "metric".into(),
            "bench & squat #2".into(),
        ))
        .with_status(200)
        .with_body(r#"{"metric":"bench & squat #2","series":[]}"#)
        .create_async()
        .await;

    let (client, _) = client(server.url(), Some("tok"));
    let series = client.team_series(1, "bench & squat #2").await.unwrap();

    assert_eq!(series.metric.as_deref(), Some("bench & squat #2"));
    assert!(series.series.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_lift_series_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/lifts/series")
        .match_query(mockito::Matcher::UrlEncoded("exercise_id".into(), "4".into()))
        .with_status(200)
        .with_body(r#"{"exercise_id":4,"exercise_name":"Deadlift","series":[]}"#)
        .create_async()
        .await;

    let (client, _) = client(server.url(), Some("tok"));
    let series = client.lift_series(4).await.unwrap();

    assert_eq!(series.exercise_name.as_deref(), Some("Deadlift"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_wrong_credentials_do_not_expire_session() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"detail":"Incorrect username or password"}"#)
        .create_async()
        .await;

    let (client, session) = client(server.url(), None);
    let state = session.subscribe();

    let err = client.login("lee@example.com", "wrong").await.unwrap_err();

    assert_eq!(err, ApiError::InvalidCredentials);
    assert!(!err.is_auth_expired());
    assert_eq!(*state.borrow(), AuthState::Unauthenticated);
    assert!(!state.has_changed().unwrap());
}
