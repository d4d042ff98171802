//! Integration tests for the task endpoints.
//!
//! Runs the full router against a per-test database so the body shapes
//! and the due-date handling observed here are exactly what clients see.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use common::{body_json, build_test_app, get_auth, post_json_auth, put_json_auth, sign_in};

fn parse_due(value: &serde_json::Value) -> DateTime<Utc> {
    let text = value.as_str().expect("due_date is a string");
    DateTime::parse_from_rfc3339(text)
        .expect("due_date parses")
        .with_timezone(&Utc)
}

fn last_instant_of(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
        .and_utc()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_stores_due_date_as_end_of_day(pool: PgPool) {
    let token = sign_in(&pool, "ada@example.com").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/tasks",
        &token,
        serde_json::json!({
            "title": "Ship the release",
            "due_date": "2026-09-15",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let card = &body["data"];
    assert_eq!(card["title"], "Ship the release");

    // The calendar date is stored as the last instant of that day, so a
    // task stays "due today" until midnight.
    assert_eq!(parse_due(&card["due_date"]), last_instant_of(2026, 9, 15));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_stores_due_date_as_end_of_day(pool: PgPool) {
    let token = sign_in(&pool, "ada@example.com").await;
    let app = build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/v1/tasks",
        &token,
        serde_json::json!({ "title": "Draft the notes" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert!(created["data"]["due_date"].is_null());
    let id = created["data"]["id"].as_i64().expect("task id");

    let updated = put_json_auth(
        app,
        &format!("/api/v1/tasks/{id}"),
        &token,
        serde_json::json!({ "due_date": "2026-10-01" }),
    )
    .await;

    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(
        parse_due(&updated["data"]["due_date"]),
        last_instant_of(2026, 10, 1)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_a_malformed_due_date(pool: PgPool) {
    let token = sign_in(&pool, "ada@example.com").await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/tasks",
        &token,
        serde_json::json!({
            "title": "Ship the release",
            "due_date": "next tuesday",
        }),
    )
    .await;

    // Not a calendar date; body deserialization rejects it before any
    // handler code runs.
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bodies_are_wrapped_in_the_data_envelope(pool: PgPool) {
    let token = sign_in(&pool, "ada@example.com").await;
    let app = build_test_app(pool);

    let me = get_auth(app.clone(), "/api/v1/auth/me", &token).await;
    assert_eq!(me.status(), StatusCode::OK);
    let me = body_json(me).await;
    assert_eq!(me["data"]["email"], "ada@example.com");

    let created = post_json_auth(
        app.clone(),
        "/api/v1/clients",
        &token,
        serde_json::json!({ "name": "Acme" }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    assert_eq!(created["data"]["name"], "Acme");

    let listed = get_auth(app, "/api/v1/clients", &token).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await;
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn move_reports_its_outcome_in_the_envelope(pool: PgPool) {
    let token = sign_in(&pool, "ada@example.com").await;
    let app = build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/v1/tasks",
        &token,
        serde_json::json!({ "title": "Card under test" }),
    )
    .await;
    let created = body_json(created).await;
    let id = created["data"]["id"].as_i64().expect("task id");

    let moved = post_json_auth(
        app,
        "/api/v1/board/move",
        &token,
        serde_json::json!({
            "task_id": id,
            "source_column": "todo",
            "source_index": 0,
            "dest_column": "inProgress",
            "dest_index": 0,
        }),
    )
    .await;

    assert_eq!(moved.status(), StatusCode::OK);
    let moved = body_json(moved).await;
    assert_eq!(moved["data"]["applied"], true);
}
