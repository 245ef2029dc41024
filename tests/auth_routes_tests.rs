mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

#[tokio::test]
async fn user_lifecycle() {
    let app = common::spawn_app("user-lifecycle").await;
    let token = app.login("diana", "pw1").await;
    let auth = Some(token.as_str());

    let (status, body) = app
        .json(
            "POST",
            "/auth/users",
            None,
            Some(json!({"username": "diana", "password": "other"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Username already registered");

    let (status, body) = app.json("GET", "/auth/users", auth, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"User": {"username": "diana", "id": 1}}));

    let (status, body) = app.json("GET", "/auth/users/1", auth, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "username": "diana"}));

    let (status, _) = app
        .json(
            "PUT",
            "/auth/users/1",
            auth,
            Some(json!({"username": "diana2", "password": "pw2"})),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.token("diana", "pw1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = app.token("diana2", "pw2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let (status, _) = app.json("DELETE", "/auth/users/1", auth, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.json("DELETE", "/auth/users/1", auth, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.json("GET", "/auth/users/1", auth, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = common::spawn_app("bad-login").await;
    app.login("eva", "right").await;

    let (status, body) = app.token("eva", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect username or password");

    let (status, _) = app.token("nobody", "right").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn renaming_onto_a_taken_username_conflicts() {
    let app = common::spawn_app("rename-conflict").await;
    let token = app.login("fabio", "pw").await;
    app.login("gabi", "pw").await;

    let (status, _) = app
        .json(
            "PUT",
            "/auth/users/1",
            Some(token.as_str()),
            Some(json!({"username": "gabi", "password": "pw"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_routes_other_than_signup_require_a_token() {
    let app = common::spawn_app("users-unauthorized").await;

    let (status, _) = app.json("GET", "/auth/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.json("DELETE", "/auth/users/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_signup_and_login_answer_with_detail() {
    let app = common::spawn_app("auth-malformed").await;

    let (status, body) = app
        .json("POST", "/auth/users", None, Some(json!({"username": "kiko"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let req = Request::builder()
        .method("POST")
        .uri("/auth/token")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("username=kiko"))
        .expect("failed to build request");
    let (status, body) = common::read_json(app.send(req).await).await;
    assert!(status.is_client_error(), "{status}");
    assert!(body["detail"].is_string());
}
