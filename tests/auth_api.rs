mod common;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    routing::get,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{PASSWORD, USERNAME, app, basic};
use expense_api::{api::extractors::AuthCtxExtractor, middleware::auth::bearer};

async fn token(app: &common::TestApp) -> String {
    let res = app.login(USERNAME, PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK);
    res.json()["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn login_issues_a_bearer_token() {
    let app = app();

    let res = app.login(USERNAME, PASSWORD).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(
        body["access_token"].as_str().unwrap().split('.').count(),
        3
    );
}

#[tokio::test]
async fn login_with_wrong_credentials_is_challenged() {
    let app = app();

    for (user, pass) in [(USERNAME, "wrong"), ("someone", PASSWORD), ("", "")] {
        let res = app.login(user, pass).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{user}:{pass}");
        assert!(
            res.header(header::WWW_AUTHENTICATE)
                .unwrap()
                .starts_with("Basic")
        );
        assert!(res.json()["error"].is_string());
    }
}

#[tokio::test]
async fn login_without_or_with_malformed_header_is_challenged() {
    let app = app();

    for authorization in [None, Some("Basic !!!not-base64"), Some("Bearer abc")] {
        let mut req = Request::builder().method(Method::POST).uri("/login");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        let res = app.send(req.body(Body::empty()).unwrap()).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert!(
            res.header(header::WWW_AUTHENTICATE)
                .unwrap()
                .starts_with("Basic")
        );
    }
}

#[tokio::test]
async fn secure_returns_the_login_identity() {
    let app = app();
    let token = token(&app).await;

    let res = app.secure(Some(&format!("Bearer {token}"))).await;
    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["message"], "Welcome to the secure area");
    assert_eq!(body["user"], USERNAME);
    assert_eq!(
        body["_links"]["self"]["href"],
        "http://localhost:3000/secure"
    );
    assert_eq!(
        body["_links"]["login"]["href"],
        "http://localhost:3000/login"
    );
}

#[tokio::test]
async fn secure_without_token_is_challenged() {
    let app = app();

    for authorization in [None, Some("Bearer"), Some(basic(USERNAME, PASSWORD).as_str())] {
        let res = app.secure(authorization).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert!(
            res.header(header::WWW_AUTHENTICATE)
                .unwrap()
                .starts_with("Bearer")
        );
    }
}

#[tokio::test]
async fn challenge_reports_invalid_token_only_when_one_was_sent() {
    let app = app();

    let res = app.secure(None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        res.header(header::WWW_AUTHENTICATE),
        Some(r#"Bearer realm="expenses""#)
    );

    for authorization in ["Bearer not.a.jwt", "Bearer"] {
        let res = app.secure(Some(authorization)).await;
        assert_eq!(res.status, StatusCode::UNAUTHORIZED, "{authorization}");
        assert_eq!(
            res.header(header::WWW_AUTHENTICATE),
            Some(r#"Bearer realm="expenses", error="invalid_token""#),
            "{authorization}"
        );
    }
}

#[tokio::test]
async fn bearer_guard_carries_the_token_id() {
    let app = app();
    let token = token(&app).await;
    let now = chrono::Utc::now().timestamp();
    let jti = app
        .state
        .auth
        .tokens()
        .verify(&token, now)
        .unwrap()
        .jti
        .unwrap();

    async fn whoami(AuthCtxExtractor(ctx): AuthCtxExtractor) -> String {
        format!("{}|{}", ctx.subject, ctx.token_id.unwrap_or_default())
    }
    let router = Router::new()
        .route("/whoami", bearer::guard(get(whoami), app.state.clone()))
        .with_state(app.state.clone());

    let res = router
        .oneshot(
            Request::builder()
                .uri("/whoami")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body, format!("{USERNAME}|{jti}").as_bytes());
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = app();
    let long_ago = chrono::Utc::now().timestamp() - 2 * 3600;
    let expired = app.state.auth.tokens().issue(USERNAME, long_ago).unwrap();

    let res = app.secure(Some(&format!("Bearer {expired}"))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(
        res.header(header::WWW_AUTHENTICATE)
            .unwrap()
            .starts_with("Bearer")
    );
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = app();
    let token = token(&app).await;

    // flip one character of the signature
    let mut chars: Vec<char> = token.chars().collect();
    let last = chars.len() - 2;
    chars[last] = if chars[last] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    let res = app.secure(Some(&format!("Bearer {tampered}"))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let app = app();
    let other = expense_api::services::auth::TokenService::new(
        b"another-secret-that-is-also-32-bytes-long",
        3600,
    );
    let forged = other
        .issue(USERNAME, chrono::Utc::now().timestamp())
        .unwrap();

    let res = app.secure(Some(&format!("Bearer {forged}"))).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn auth_paths_report_allowed_methods() {
    let app = app();

    for (method, uri, allow) in [(Method::GET, "/login", "POST"), (Method::POST, "/secure", "GET")] {
        let res = app
            .send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(res.header(header::ALLOW), Some(allow));
    }
}

#[tokio::test]
async fn negotiation_runs_before_authentication() {
    let app = app();
    let res = app
        .send(
            Request::builder()
                .method(Method::GET)
                .uri("/secure")
                .header(header::ACCEPT, "text/html")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_ACCEPTABLE);
}
