use axum::{body::Body, http::StatusCode};
use linkkeeper_backend::auth::{TOKEN_INVALID_MESSAGE, TOKEN_REQUIRED_MESSAGE};
use tower::ServiceExt;

use crate::test_utils::{body_json, form_request, request, setup_test_app, ALICE_TOKEN, BOB_TOKEN};

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(request("GET", "/health", None).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_token_gets_400_with_reason() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(request("GET", "/links", None).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], TOKEN_REQUIRED_MESSAGE);
}

#[tokio::test]
async fn test_unknown_token_gets_validator_reason() {
    let (app, store) = setup_test_app();
    let response = app
        .oneshot(form_request("/links", Some("stolen"), "url=https%3A%2F%2Fx.io&description=x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], TOKEN_INVALID_MESSAGE);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_create_list_get_delete_flow() {
    let (app, store) = setup_test_app();

    let response = app
        .clone()
        .oneshot(form_request(
            "/links/",
            Some(ALICE_TOKEN),
            "url=https%3A%2F%2Frust-lang.org&description=Rust&image_url=https%3A%2F%2Frust-lang.org%2Flogo.png",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["result"]["id"].as_u64().unwrap();
    assert_eq!(created["result"]["user_id"], "1");
    assert_eq!(created["result"]["image_url"], "https://rust-lang.org/logo.png");

    let response = app
        .clone()
        .oneshot(request("GET", "/links", Some(ALICE_TOKEN)).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["result"].as_array().unwrap().len(), 1);
    assert_eq!(listed["result"][0]["url"], "https://rust-lang.org");

    let response = app
        .clone()
        .oneshot(
            request("GET", &format!("/links/{id}"), Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"]["description"], "Rust");

    let response = app
        .clone()
        .oneshot(
            request("DELETE", &format!("/links/{id}"), Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(store.is_empty());

    let response = app
        .oneshot(
            request("GET", &format!("/links/{id}"), Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_requires_fields() {
    let (app, store) = setup_test_app();
    let response = app
        .oneshot(form_request("/links", Some(ALICE_TOKEN), "url=https%3A%2F%2Fx.io"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_bulk_delete_only_touches_own_links() {
    let (app, store) = setup_test_app();

    for (token, url) in [
        (ALICE_TOKEN, "https%3A%2F%2Fa.io"),
        (ALICE_TOKEN, "https%3A%2F%2Fb.io"),
        (BOB_TOKEN, "https%3A%2F%2Fc.io"),
    ] {
        let response = app
            .clone()
            .oneshot(form_request("/links", Some(token), &format!("url={url}&description=d")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(
            request("DELETE", "/links?ids=1,2,3", Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);

    let response = app
        .oneshot(request("GET", "/links", Some(BOB_TOKEN)).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["result"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_bulk_delete_rejects_non_integer_ids() {
    let (app, _) = setup_test_app();
    let response = app
        .clone()
        .oneshot(
            request("DELETE", "/links?ids=1,abc", Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(request("DELETE", "/links", Some(ALICE_TOKEN)).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_users_link_is_not_found() {
    let (app, _) = setup_test_app();
    let response = app
        .clone()
        .oneshot(form_request("/links", Some(BOB_TOKEN), "url=https%3A%2F%2Fb.io&description=d"))
        .await
        .unwrap();
    let id = body_json(response).await["result"]["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(
            request("GET", &format!("/links/{id}"), Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["code"], "NF_001");
}

#[tokio::test]
async fn test_single_delete_leaves_other_users_link() {
    let (app, store) = setup_test_app();
    let response = app
        .clone()
        .oneshot(form_request("/links", Some(BOB_TOKEN), "url=https%3A%2F%2Fb.io&description=d"))
        .await
        .unwrap();
    let id = body_json(response).await["result"]["id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(
            request("DELETE", &format!("/links/{id}"), Some(ALICE_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);

    let response = app
        .oneshot(
            request("GET", &format!("/links/{id}"), Some(BOB_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (app, _) = setup_test_app();
    let response = app
        .oneshot(request("GET", "/links/abc", Some(ALICE_TOKEN)).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
