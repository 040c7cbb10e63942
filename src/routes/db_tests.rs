//! Router tests against a real Postgres. `#[sqlx::test]` creates a fresh
//! database per test from `DATABASE_URL` and applies `./migrations`.
//! Run with `cargo test -- --ignored`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use super::create_router;
use crate::auth::jwt::sign_token;
use crate::error::is_unique_violation;
use crate::state::AppState;

const SECRET: &str = "test-secret";

struct Client {
    app: Router,
    token: String,
}

impl Client {
    fn new(pool: PgPool) -> Self {
        Self {
            app: create_router(AppState::new(pool, SECRET)),
            token: sign_token(1, "staff", "tester", SECRET).unwrap(),
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = self.app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn register_set(&self, set_id: &str) -> (StatusCode, Value) {
        let body = json!({
            "set_id": set_id,
            "set_name": "여름 세트",
            "product_codes": ["A1", "B2"],
            "remarks": "기본 구성"
        });
        self.send(Method::POST, "/api/dashboard/sets/register", Some(body)).await
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn registered_set_is_returned_and_duplicates_rejected(pool: PgPool) {
    let client = Client::new(pool);

    let (status, body) = client.register_set(" SET-001 ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["set_id"], "SET-001");
    assert_eq!(body["data"]["product_codes"], json!(["A1", "B2"]));
    assert_eq!(body["data"]["is_active"], true);
    assert!(body["data"]["id"].is_i64());

    let (status, body) = client.register_set("SET-001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "이미 존재하는 세트번호입니다.");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_insert_is_a_unique_violation(pool: PgPool) {
    let insert = "INSERT INTO set_products (set_id, set_name) VALUES ('SET-001', '여름 세트')";
    sqlx::query(insert).execute(&pool).await.unwrap();

    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();
    assert!(is_unique_violation(&err));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn deleted_set_leaves_the_list(pool: PgPool) {
    let client = Client::new(pool);
    let (_, body) = client.register_set("SET-001").await;
    let id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = client.send(Method::GET, "/api/dashboard/sets", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let uri = format!("/api/dashboard/sets/{id}");
    let (status, body) = client.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = client.send(Method::GET, "/api/dashboard/sets", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = client.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn inactive_sets_are_filtered(pool: PgPool) {
    let client = Client::new(pool);
    client.register_set("SET-001").await;
    let (_, body) = client.register_set("SET-002").await;
    let retired = body["data"]["id"].as_i64().unwrap();

    let (status, body) = client
        .send(
            Method::PUT,
            &format!("/api/dashboard/sets/{retired}/active"),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = client.send(Method::GET, "/api/dashboard/sets?active=true", None).await;
    let sets = body["data"].as_array().unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0]["set_id"], "SET-001");

    let (_, body) = client.send(Method::GET, "/api/dashboard/sets", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, _) = client
        .send(Method::PUT, "/api/dashboard/sets/999999/active", Some(json!({ "is_active": true })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn created_plan_is_fetched_with_set_info(pool: PgPool) {
    let client = Client::new(pool);
    let (_, set) = client.register_set("SET-001").await;
    let set_ref = set["data"]["id"].as_i64().unwrap();

    let (status, channel) = client
        .send(
            Method::POST,
            "/api/channels",
            Some(json!({ "channel_code": "LIVE", "channel_name": "라이브", "channel_details": ["오전"] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let channel_id = channel["data"]["id"].as_i64().unwrap();

    let (status, created) = client
        .send(
            Method::POST,
            "/api/sales/plans",
            Some(json!({
                "season_year": "24",
                "season_type": "FW",
                "plan_date": "2024-10-01",
                "plan_time": "20:00",
                "channel_id": channel_id,
                "channel_detail": "오전",
                "product_category": "아우터",
                "product_name": "패딩",
                "set_id": set_ref,
                "product_code": "P-1",
                "sale_price": "15,000원",
                "commission_rate": "12%",
                "target_quantity": 2500
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let plan_id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = client.send(Method::GET, &format!("/api/sales/plans/{plan_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let plan = &body["data"];
    assert_eq!(plan["season"], "24FW");
    assert_eq!(plan["plan_time"], "20:00:00");
    assert_eq!(plan["channel_code"], "LIVE");
    assert_eq!(plan["channel_name"], "라이브");
    assert_eq!(plan["set_info"], json!({ "id": set_ref, "set_id": "SET-001", "set_name": "여름 세트" }));
    assert_eq!(plan["sale_price"], 15000);
    assert_eq!(plan["sale_price_display"], "15,000원");
    assert_eq!(plan["commission_rate_display"], "12%");
    assert_eq!(plan["target_quantity_display"], "2,500개");

    // a set referenced by a plan cannot be deleted
    let (status, _) = client.send(Method::DELETE, &format!("/api/dashboard/sets/{set_ref}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn operational_quantity_lifecycle(pool: PgPool) {
    let client = Client::new(pool);
    client.register_set("SET-001").await;

    let (status, body) = client
        .send(
            Method::POST,
            "/api/operational-quantity",
            Some(json!({
                "set_id": "SET-001",
                "sizes": [{ "size": "M", "quantity": 1 }, { "size": "L", "quantity": "7개" }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["total_quantity"], 8);
    assert_eq!(body["data"]["sizes"][0]["percent"], 13);
    assert_eq!(body["data"]["sizes"][1]["percent"], 88);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = client.send(Method::GET, "/api/operational-quantity/list", None).await;
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["set_name"], "여름 세트");

    let (status, body) = client
        .send(Method::DELETE, &format!("/api/operational-quantity/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, body) = client.send(Method::GET, "/api/operational-quantity/list", None).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, body) = client
        .send(Method::DELETE, &format!("/api/operational-quantity/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}
