//! End-to-end HTTP tests: router + permission gate + in-memory store,
//! driven with `oneshot` and a fake key provider.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{MintClaims, mint, test_app};

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("request completes");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn matcha() -> Value {
    json!({
        "title": "Iced Matcha",
        "recipe": [
            {"name": "matcha", "color": "green", "parts": 1},
            {"name": "milk", "color": "white", "parts": 3}
        ]
    })
}

#[tokio::test]
async fn get_drinks_on_empty_catalog_is_404_with_envelope() {
    let app = test_app();

    let (status, body) = send(&app, request(Method::GET, "/drinks", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "error": 404, "message": "resource not found"})
    );
}

#[tokio::test]
async fn create_then_list_round_trip_with_short_and_long_shapes() {
    let app = test_app();
    let creator = mint(&MintClaims::valid(&["post:drinks"]));
    let reader = mint(&MintClaims::valid(&["get:drinks-detail"]));

    let (status, body) = send(
        &app,
        request(Method::POST, "/drinks/create", Some(&creator), Some(matcha())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["created"][0]["title"], json!("Iced Matcha"));
    assert_eq!(body["created"][0]["recipe"][0]["name"], json!("matcha"));
    let id = body["created"][0]["id"].as_i64().expect("created id");

    // public listing: short representation, ingredient names withheld
    let (status, body) = send(&app, request(Method::GET, "/drinks", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let short = &body["drinks"][0]["recipe"][0];
    assert_eq!(short["color"], json!("green"));
    assert_eq!(short["parts"], json!(1));
    assert!(short.get("name").is_none());

    // gated listing: long representation
    let (status, body) = send(
        &app,
        request(Method::GET, "/drinks-detail", Some(&reader), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["id"], json!(id));
    assert_eq!(body["drinks"][0]["recipe"][1]["name"], json!("milk"));
}

#[tokio::test]
async fn drinks_detail_without_token_is_401() {
    let app = test_app();

    let (status, body) = send(&app, request(Method::GET, "/drinks-detail", None, None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(401));
}

#[tokio::test]
async fn drinks_detail_with_insufficient_permissions_is_403() {
    let app = test_app();
    let token = mint(&MintClaims::valid(&["post:drinks"]));

    let (status, body) = send(
        &app,
        request(Method::GET, "/drinks-detail", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!(403));
}

#[tokio::test]
async fn unscoped_token_is_401_not_403() {
    let app = test_app();
    let token = mint(&MintClaims::unscoped());

    let (status, _) = send(
        &app,
        request(Method::GET, "/drinks-detail", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_401_on_the_wire() {
    let app = test_app();
    let token = mint(&MintClaims::expired(&["get:drinks-detail"]));

    let (status, body) = send(
        &app,
        request(Method::GET, "/drinks-detail", Some(&token), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("token expired"));
}

#[tokio::test]
async fn create_requires_a_recipe() {
    let app = test_app();
    let token = mint(&MintClaims::valid(&["post:drinks"]));

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/drinks/create",
            Some(&token),
            Some(json!({"title": "Water"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body,
        json!({"success": false, "error": 422, "message": "unprocessable"})
    );
}

#[tokio::test]
async fn patch_unknown_id_is_404() {
    let app = test_app();
    let token = mint(&MintClaims::valid(&["patch:drinks"]));

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            "/drinks/999",
            Some(&token),
            Some(json!({"title": "Renamed"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_updates_title_and_keeps_recipe() {
    let app = test_app();
    let creator = mint(&MintClaims::valid(&["post:drinks"]));
    let patcher = mint(&MintClaims::valid(&["patch:drinks"]));

    let (_, body) = send(
        &app,
        request(Method::POST, "/drinks/create", Some(&creator), Some(matcha())),
    )
    .await;
    let id = body["created"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/drinks/{id}"),
            Some(&patcher),
            Some(json!({"title": "Hot Matcha"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], json!("Hot Matcha"));
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], json!("matcha"));
}

#[tokio::test]
async fn patch_with_empty_title_is_400() {
    let app = test_app();
    let creator = mint(&MintClaims::valid(&["post:drinks"]));
    let patcher = mint(&MintClaims::valid(&["patch:drinks"]));

    let (_, body) = send(
        &app,
        request(Method::POST, "/drinks/create", Some(&creator), Some(matcha())),
    )
    .await;
    let id = body["created"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/drinks/{id}"),
            Some(&patcher),
            Some(json!({"title": "   "})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("bad request"));
}

#[tokio::test]
async fn delete_removes_the_record_and_reports_the_id() {
    let app = test_app();
    let creator = mint(&MintClaims::valid(&["post:drinks"]));
    let deleter = mint(&MintClaims::valid(&["delete:drinks"]));

    let (_, body) = send(
        &app,
        request(Method::POST, "/drinks/create", Some(&creator), Some(matcha())),
    )
    .await;
    let id = body["created"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        request(Method::DELETE, &format!("/drinks/{id}"), Some(&deleter), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "deleted": id}));

    // the record is gone
    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/drinks/{id}"), Some(&deleter), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutating_routes_reject_tokens_scoped_for_other_verbs() {
    let app = test_app();
    // full read scope, no mutation scopes
    let token = mint(&MintClaims::valid(&["get:drinks-detail"]));

    let (status, _) = send(
        &app,
        request(Method::POST, "/drinks/create", Some(&token), Some(matcha())),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(Method::DELETE, "/drinks/1", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();

    let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
