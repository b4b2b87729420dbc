mod common;

use common::{MockResponse, MockServer, test_app};
use okulpanel::modules::AuthService;
use okulpanel::modules::auth::service::LOGIN_PATH;
use okulpanel::utils::errors::LoginError;
use okulpanel_client::REFRESH_PATH;
use okulpanel_models::{LoginRequest, NewSession, Role};
use serde_json::json;

#[tokio::test]
async fn test_login_success_teacher() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::ok(json!({"token": "abc", "rol": "2"}))],
    );
    let (app, backend) = test_app(&server);
    app.restore().await;
    app.session.update_school_code(Some("AHUIHO")).await;

    let role = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap();

    assert_eq!(role, Role::Teacher);
    let call = &server.calls_to(LOGIN_PATH)[0];
    assert_eq!(call.body, json!({"username": "x", "password": "y"}));
    assert_eq!(call.authorization, None);

    let session = app.session.snapshot();
    assert!(session.is_authenticated());
    assert_eq!(session.role, Some(Role::Teacher));
    assert_eq!(session.school_code.as_deref(), Some("AHUIHO"));

    let stored = backend.snapshot().await;
    assert_eq!(stored.get("accessToken").map(String::as_str), Some("abc"));
    assert_eq!(stored.get("role").map(String::as_str), Some("teacher"));
    assert!(!stored.contains_key("refreshToken"));
}

#[tokio::test]
async fn test_login_role_codes() {
    for (code, expected) in [
        ("1", Role::Admin),
        ("2", Role::Teacher),
        ("3", Role::Parent),
        ("9", Role::Parent),
    ] {
        let server = MockServer::start().await;
        server.respond(
            LOGIN_PATH,
            vec![MockResponse::ok(json!({"token": "abc", "rol": code}))],
        );
        let (app, _) = test_app(&server);
        app.restore().await;

        let role = AuthService::login(&app.api, &app.session, LoginRequest::new("u", "p"))
            .await
            .unwrap();
        assert_eq!(role, expected, "rol {}", code);
    }
}

#[tokio::test]
async fn test_login_numeric_role_code() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::ok(json!({"token": "abc", "rol": 1}))],
    );
    let (app, _) = test_app(&server);
    app.restore().await;

    let role = AuthService::login(&app.api, &app.session, LoginRequest::new("u", "p"))
        .await
        .unwrap();
    assert_eq!(role, Role::Admin);
}

#[tokio::test]
async fn test_login_persists_refresh_token() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::ok(
            json!({"token": "abc", "rol": "3", "refreshToken": "r1"}),
        )],
    );
    let (app, _) = test_app(&server);
    app.restore().await;

    AuthService::login(&app.api, &app.session, LoginRequest::new("u", "p"))
        .await
        .unwrap();

    assert_eq!(app.store.refresh_token().await.as_deref(), Some("r1"));
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    server.respond(LOGIN_PATH, vec![MockResponse::ok(json!(false))]);
    let (app, backend) = test_app(&server);
    app.restore().await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::InvalidCredentials));
    assert!(!app.session.snapshot().is_authenticated());
    assert!(backend.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_login_rejected_with_error_status() {
    let server = MockServer::start().await;
    server.respond(LOGIN_PATH, vec![MockResponse::status(401, json!(false))]);
    server.respond(
        REFRESH_PATH,
        vec![MockResponse::ok(json!({"accessToken": "new"}))],
    );
    let (app, backend) = test_app(&server);
    app.restore().await;
    app.session.update_school_code(Some("AHUIHO")).await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::InvalidCredentials));
    assert_eq!(err.user_message(), "Kullanıcı adı veya şifre yanlış.");
    assert_eq!(server.count(REFRESH_PATH), 0);
    assert_eq!(server.count(LOGIN_PATH), 1);

    let session = app.session.snapshot();
    assert!(!session.is_authenticated());
    assert_eq!(session.school_code.as_deref(), Some("AHUIHO"));
    let stored = backend.snapshot().await;
    assert_eq!(stored.get("schoolCode").map(String::as_str), Some("AHUIHO"));
}

#[tokio::test]
async fn test_login_failure_never_refreshes_or_signs_out() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::status(401, json!({"message": "Unauthorized"}))],
    );
    server.respond(
        REFRESH_PATH,
        vec![MockResponse::ok(json!({"accessToken": "new"}))],
    );
    let (app, _) = test_app(&server);
    app.restore().await;
    app.session
        .set_session(
            NewSession::new()
                .access_token("stale")
                .refresh_token("r1")
                .role(Role::Parent)
                .school_code("AHUIHO"),
        )
        .await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::Api(_)));
    assert_eq!(server.count(REFRESH_PATH), 0);
    assert_eq!(server.count(LOGIN_PATH), 1);
    assert_eq!(
        app.session.snapshot().school_code.as_deref(),
        Some("AHUIHO")
    );
}

#[tokio::test]
async fn test_login_bad_request_message() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::status(400, json!({"message": "eksik alan"}))],
    );
    let (app, _) = test_app(&server);
    app.restore().await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap_err();

    match &err {
        LoginError::Api(api) => assert_eq!(api.status().map(|s| s.as_u16()), Some(400)),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(
        err.user_message(),
        "Bilgiler boş veya yanlış gönderilmiştir."
    );
}

#[tokio::test]
async fn test_login_empty_fields_never_reach_server() {
    let server = MockServer::start().await;
    let (app, _) = test_app(&server);
    app.restore().await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("  ", ""))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::Validation(_)));
    assert!(server.calls().is_empty());
}

#[tokio::test]
async fn test_login_missing_token_is_malformed() {
    let server = MockServer::start().await;
    server.respond(LOGIN_PATH, vec![MockResponse::ok(json!({"rol": "2"}))]);
    let (app, _) = test_app(&server);
    app.restore().await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap_err();

    assert!(matches!(err, LoginError::MalformedResponse(_)));
    assert!(!app.session.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_login_server_error() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::status(500, json!({"message": "db down"}))],
    );
    let (app, _) = test_app(&server);
    app.restore().await;

    let err = AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap_err();

    match err {
        LoginError::Api(api) => assert_eq!(api.server_message(), Some("db down")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    server.respond(
        LOGIN_PATH,
        vec![MockResponse::ok(json!({"token": "abc", "rol": "1"}))],
    );
    let (app, _) = test_app(&server);
    app.restore().await;
    AuthService::login(&app.api, &app.session, LoginRequest::new("x", "y"))
        .await
        .unwrap();

    AuthService::logout(&app.session).await;

    assert!(!app.session.snapshot().is_authenticated());
    assert_eq!(app.store.access_token().await, None);
    assert_eq!(app.store.role().await, None);
}
