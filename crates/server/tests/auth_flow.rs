mod support;

use axum::http::{header, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;

use support::*;

#[tokio::test]
async fn login_issues_bearer_token() -> anyhow::Result<()> {
    let app = TestApp::new();
    let (status, body) = app
        .send_json(json_request("POST", "/auth/login", None, &json!({"username": ADMIN_USER, "password": ADMIN_PASSWORD})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().expect("token");
    assert!(body["expires_at"].is_string());

    // the issued token opens admin routes
    let (status, body) = app.send_json(empty_request("GET", "/admin/messages", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn login_rejects_bad_credentials() -> anyhow::Result<()> {
    let app = TestApp::new();
    for (user, pass) in [(ADMIN_USER, "wrong"), ("root", ADMIN_PASSWORD)] {
        let req = json_request("POST", "/auth/login", None, &json!({"username": user, "password": pass}));
        let (status, body) = app.send_json(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "invalid credentials");
    }

    let (status, _) = app.send_json(json_request("POST", "/auth/login", None, &json!({"username": ADMIN_USER}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_bad_tokens_without_mutation() -> anyhow::Result<()> {
    let app = TestApp::new();
    let admin = app.admin_token();

    // seed one product so update/delete have a real target
    let (status, product) = app
        .send_json(multipart_request("POST", "/products", Some(&admin), &[("name", "Rose Oil"), ("description", "Cold pressed")], None))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = product["id"].as_str().expect("id").to_string();
    let before = app.data_snapshot();
    assert!(before.is_some());

    let expired = app.token_for(ADMIN_USER, Utc::now() - Duration::hours(9));
    let stranger = app.token_for("editor", Utc::now());
    let cases: [(Option<String>, StatusCode, &str); 5] = [
        (None, StatusCode::UNAUTHORIZED, "missing bearer token"),
        (Some("not-a-jwt".into()), StatusCode::UNAUTHORIZED, "invalid token"),
        (Some(format!("{admin}x")), StatusCode::UNAUTHORIZED, "invalid token"),
        (Some(expired), StatusCode::UNAUTHORIZED, "token expired"),
        (Some(stranger), StatusCode::FORBIDDEN, "admin access required"),
    ];

    let product_uri = format!("/products/{id}");
    for (token, expected, detail) in &cases {
        let token = token.as_deref();
        let requests = [
            json_request("PUT", "/site", token, &json!({"brand_name": "Hijacked"})),
            multipart_request("POST", "/products", token, &[("name", "X"), ("description", "Y")], None),
            multipart_request("PUT", &product_uri, token, &[("name", "X"), ("description", "Y")], None),
            empty_request("DELETE", &product_uri, token),
            empty_request("GET", "/admin/messages", token),
        ];
        for req in requests {
            let uri = req.uri().clone();
            let (status, body) = app.send_json(req).await;
            assert_eq!(status, *expected, "{uri}");
            assert_eq!(body["detail"], *detail, "{uri}");
        }
    }

    assert_eq!(app.data_snapshot(), before);
    Ok(())
}

#[tokio::test]
async fn unauthorized_responses_carry_bearer_challenge() -> anyhow::Result<()> {
    let app = TestApp::new();
    let resp = {
        use tower::ServiceExt;
        app.router.clone().oneshot(empty_request("GET", "/admin/messages", None)).await?
    };
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get(header::WWW_AUTHENTICATE).map(|v| v.as_bytes()), Some(&b"Bearer"[..]));
    Ok(())
}

#[tokio::test]
async fn public_reads_need_no_token() -> anyhow::Result<()> {
    let app = TestApp::new();
    for uri in ["/health", "/site", "/products", "/api-docs/openapi.json"] {
        let (status, _) = app.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
    }
    let (_, health) = app.send_json(get("/health")).await;
    assert_eq!(health, json!({"status": "ok"}));
    Ok(())
}
