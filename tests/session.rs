mod common;

use ailab_cli::commands::auth::types::RegisterRequest;
use ailab_cli::session::SessionStatus;
use ailab_cli::state::route::Route;
use mockito::Matcher;

use common::{state, ME};

#[tokio::test]
async fn login_stores_tokens_and_fetches_user_once() {
    let mut server = mockito::Server::new_async().await;

    let login = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(serde_json::json!({
            "email": "test@ailab.com",
            "password": "hunter22"
        })))
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "abc", "refresh_token": "def", "token_type": "bearer"}"#)
        .create_async()
        .await;

    let me = server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer abc")
        .with_header("content-type", "application/json")
        .with_body(ME)
        .expect(1)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), None).await;
    state.navigator.navigate(Route::Login);

    let user = state
        .session
        .login("test@ailab.com", "hunter22")
        .await
        .unwrap();

    login.assert_async().await;
    me.assert_async().await;

    assert_eq!(user.email, "test@ailab.com");
    assert!(state.session.is_authenticated());
    assert_eq!(state.navigator.current(), Route::Dashboard);

    let tokens = state.http.tokens().snapshot().await;
    assert_eq!(tokens.access_token.as_deref(), Some("abc"));
    assert_eq!(tokens.refresh_token.as_deref(), Some("def"));
}

#[tokio::test]
async fn failed_login_surfaces_detail() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Incorrect email or password"}"#)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), None).await;

    let err = state
        .session
        .login("test@ailab.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Incorrect email or password");
    assert!(!state.session.is_authenticated());
    assert_eq!(state.http.tokens().access_token().await, None);
}

#[tokio::test]
async fn register_then_logs_in() {
    let mut server = mockito::Server::new_async().await;

    let register = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "name": "Test User",
            "email": "test@ailab.com"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(ME)
        .create_async()
        .await;

    let login = server
        .mock("POST", "/api/auth/login")
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "abc", "refresh_token": "def"}"#)
        .create_async()
        .await;

    server
        .mock("GET", "/api/auth/me")
        .with_header("content-type", "application/json")
        .with_body(ME)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), None).await;

    state
        .session
        .register(&RegisterRequest {
            name: "Test User".to_string(),
            email: "test@ailab.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

    register.assert_async().await;
    login.assert_async().await;
    assert!(state.session.is_authenticated());
}

#[tokio::test]
async fn logout_is_local_only() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/auth/me")
        .with_header("content-type", "application/json")
        .with_body(ME)
        .create_async()
        .await;

    let anything_else = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), Some("abc")).await;

    state.session.initialize().await;
    assert!(state.session.is_authenticated());

    state.session.logout().await.unwrap();

    anything_else.assert_async().await;
    assert!(!state.session.is_authenticated());
    assert_eq!(state.session.status(), SessionStatus::Anonymous);
    assert_eq!(state.http.tokens().access_token().await, None);
    assert_eq!(state.http.tokens().refresh_token().await, None);
}

#[tokio::test]
async fn initialize_without_token_skips_network() {
    let mut server = mockito::Server::new_async().await;

    let me = server
        .mock("GET", "/api/auth/me")
        .expect(0)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), None).await;
    let mut status = state.session.subscribe();

    state.session.initialize().await;

    me.assert_async().await;
    assert_eq!(*status.borrow_and_update(), SessionStatus::Anonymous);
}

#[tokio::test]
async fn initialize_with_rejected_token_goes_anonymous() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/auth/me")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Could not validate credentials"}"#)
        .create_async()
        .await;

    let (state, dir) = state(server.url(), Some("expired")).await;

    state.session.initialize().await;

    assert_eq!(state.session.status(), SessionStatus::Anonymous);
    assert_eq!(state.http.tokens().access_token().await, None);

    let raw = tokio::fs::read_to_string(dir.path().join("tokens.json"))
        .await
        .unwrap();
    assert!(!raw.contains("expired"));
}

#[tokio::test]
async fn state_login_requires_a_user() {
    let server = mockito::Server::new_async().await;
    let (state, _dir) = state(server.url(), None).await;

    let err = state.login().await.unwrap_err();

    assert!(err.to_string().contains("auth login"));
}

#[tokio::test]
async fn refresh_swaps_tokens() {
    let mut server = mockito::Server::new_async().await;

    let refresh = server
        .mock("POST", "/api/auth/refresh")
        .match_body(Matcher::Json(serde_json::json!({"refresh_token": "refresh"})))
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "fresh"}"#)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), Some("stale")).await;

    state.session.refresh().await.unwrap();

    refresh.assert_async().await;

    let tokens = state.http.tokens().snapshot().await;
    assert_eq!(tokens.access_token.as_deref(), Some("fresh"));
    assert_eq!(tokens.refresh_token.as_deref(), Some("refresh"));
}

#[tokio::test]
async fn login_leaves_state_alone_when_user_fetch_fails() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/auth/login")
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "abc", "refresh_token": "def"}"#)
        .create_async()
        .await;

    server
        .mock("GET", "/api/auth/me")
        .with_status(500)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), None).await;

    assert!(state
        .session
        .login("test@ailab.com", "hunter22")
        .await
        .is_err());

    assert_eq!(state.session.status(), SessionStatus::Uninitialized);
    assert_eq!(state.http.tokens().snapshot().await, Default::default());
}

#[tokio::test]
async fn relogin_rejected_by_user_fetch_goes_anonymous() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer old")
        .with_header("content-type", "application/json")
        .with_body(ME)
        .create_async()
        .await;

    server
        .mock("POST", "/api/auth/login")
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "new", "refresh_token": "def"}"#)
        .create_async()
        .await;

    server
        .mock("GET", "/api/auth/me")
        .match_header("authorization", "Bearer new")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "User is disabled"}"#)
        .create_async()
        .await;

    let (state, _dir) = state(server.url(), Some("old")).await;

    state.session.initialize().await;
    assert!(state.session.is_authenticated());

    assert!(state
        .session
        .login("test@ailab.com", "hunter22")
        .await
        .is_err());

    assert!(!state.session.is_authenticated());
    assert_eq!(state.session.status(), SessionStatus::Anonymous);
    assert_eq!(state.http.tokens().access_token().await, None);
    assert_eq!(state.navigator.current(), Route::Login);
}
