//! End-to-end item API tests against a real PostgreSQL.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p itembook-server -- --ignored
//!
//! Each test works inside its own random curriculum so tests can share one
//! table and run concurrently.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use itembook_server::create_pool;
use itembook_server::http::{build_router, AppState, ServerConfig};

async fn setup() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let options: PgConnectOptions = url.parse().expect("invalid DATABASE_URL");
    let pool = create_pool(options).await.expect("pool creation failed");

    sqlx::raw_sql(include_str!("../sql/schema.sql"))
        .execute(&pool)
        .await
        .expect("schema failed");

    let app = build_router(AppState::new(pool.clone()), &ServerConfig::default());
    (app, pool)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, item: Value) -> String {
    let (status, body) = call(app, "POST", "/items", Some(item)).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    body["id"].as_str().expect("id missing").to_owned()
}

async fn list(app: &Router, query: &str) -> Vec<Value> {
    let (status, body) = call(app, "GET", &format!("/items?{query}"), None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("list is not an array").clone()
}

fn curriculum() -> String {
    format!("test-{}", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "requires database"]
async fn created_item_listed_exactly_once() {
    let (app, _pool) = setup().await;
    let cur = curriculum();

    let id = create(&app, json!({"category": "math", "curriculum": cur, "title": "Algebra"})).await;
    assert!(!id.is_empty());

    let items = list(&app, &format!("curriculum={cur}")).await;
    let matching: Vec<_> = items.iter().filter(|item| item["id"] == id.as_str()).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0]["category"], "math");
    assert_eq!(matching[0]["title"], "Algebra");
    assert!(matching[0]["updated_day"].is_null());

    let all = list(&app, "").await;
    assert_eq!(all.iter().filter(|item| item["id"] == id.as_str()).count(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn curriculum_filter_is_exact() {
    let (app, _pool) = setup().await;
    let cur = curriculum();
    let other = curriculum();

    create(&app, json!({"category": "go", "curriculum": cur})).await;
    create(&app, json!({"category": "go", "curriculum": cur})).await;
    create(&app, json!({"category": "go", "curriculum": other})).await;

    let items = list(&app, &format!("curriculum={cur}")).await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["curriculum"] == cur.as_str()));
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_list_is_array() {
    let (app, _pool) = setup().await;
    let items = list(&app, &format!("curriculum={}", curriculum())).await;
    assert!(items.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn sort_is_monotonic() {
    let (app, _pool) = setup().await;
    let cur = curriculum();

    for title in ["delta", "alpha", "charlie", "bravo"] {
        create(&app, json!({"category": "rust", "curriculum": cur, "title": title})).await;
    }

    let asc = list(&app, &format!("curriculum={cur}&sort=title&order=asc")).await;
    let titles: Vec<&str> = asc.iter().map(|item| item["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["alpha", "bravo", "charlie", "delta"]);

    let desc = list(&app, &format!("curriculum={cur}&sort=title&order=DESC")).await;
    let titles: Vec<&str> = desc.iter().map(|item| item["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["delta", "charlie", "bravo", "alpha"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn default_sort_is_made_day_desc() {
    let (app, _pool) = setup().await;
    let cur = curriculum();

    for day in ["2024-01-02", "2024-03-01", "2023-12-31"] {
        create(&app, json!({"category": "c", "curriculum": cur, "made_day": day})).await;
    }

    let items = list(&app, &format!("curriculum={cur}")).await;
    let days: Vec<&str> = items.iter().map(|item| item["made_day"].as_str().unwrap()).collect();
    assert_eq!(days, ["2024-03-01", "2024-01-02", "2023-12-31"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_category_inserts_nothing() {
    let (app, _pool) = setup().await;
    let cur = curriculum();

    let (status, _) = call(
        &app,
        "POST",
        "/items",
        Some(json!({"category": "", "curriculum": cur})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(list(&app, &format!("curriculum={cur}")).await.is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn detail_and_not_found() {
    let (app, _pool) = setup().await;
    let cur = curriculum();
    let id = create(&app, json!({"category": "db", "curriculum": cur, "link": "https://x.test"})).await;

    let (status, item) = call(&app, "GET", &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["id"], id.as_str());
    assert_eq!(item["link"], "https://x.test");

    let (status, body) = call(&app, "GET", &format!("/items/{}", Uuid::now_v7()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_replaces_only_target_and_stamps_updated_day() {
    let (app, _pool) = setup().await;
    let cur = curriculum();
    let target = create(&app, json!({"category": "a", "curriculum": cur, "title": "Same"})).await;
    let sibling = create(&app, json!({"category": "a", "curriculum": cur, "title": "Same"})).await;

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/items/{target}"),
        Some(json!({
            "category": "b",
            "curriculum": cur,
            "title": "Changed",
            "link": "https://new.test",
            "summary": "s",
            "made_day": "2024-06-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (_, updated) = call(&app, "GET", &format!("/items/{target}"), None).await;
    assert_eq!(updated["category"], "b");
    assert_eq!(updated["title"], "Changed");
    assert_eq!(updated["made_day"], "2024-06-01");
    let stamp = updated["updated_day"].as_str().expect("updated_day not stamped");
    assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());

    let (_, untouched) = call(&app, "GET", &format!("/items/{sibling}"), None).await;
    assert_eq!(untouched["title"], "Same");
    assert!(untouched["updated_day"].is_null());
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_missing_is_404() {
    let (app, _pool) = setup().await;
    let (status, _) = call(
        &app,
        "PUT",
        &format!("/items/{}", Uuid::now_v7()),
        Some(json!({"category": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_removes_exactly_one() {
    let (app, _pool) = setup().await;
    let cur = curriculum();
    let doomed = create(&app, json!({"category": "a", "curriculum": cur, "title": "Twin"})).await;
    let kept = create(&app, json!({"category": "a", "curriculum": cur, "title": "Twin"})).await;

    let (status, _) = call(&app, "DELETE", &format!("/items/{doomed}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let items = list(&app, &format!("curriculum={cur}")).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], kept.as_str());

    let (status, _) = call(&app, "DELETE", &format!("/items/{doomed}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
