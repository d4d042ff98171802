//! Integration tests for entity CRUD and the auth token tables.
//!
//! - Idempotent user creation by email
//! - Login tokens are consumed exactly once and expire
//! - Session lookup honours revocation
//! - Subtask toggle is a silent no-op for unknown rows
//! - Tag replacement and cascade deletes

use chrono::{Duration, Utc};
use sqlx::PgPool;
use tasklane_db::models::client::UpdateClient;
use tasklane_db::repositories::{
    ClientRepo, EventRepo, LoginTokenRepo, ProjectRepo, SessionRepo, SubtaskRepo, TaskRepo,
    UserRepo,
};

#[sqlx::test(migrations = "./migrations")]
async fn user_create_or_get_is_idempotent(pool: PgPool) {
    let first = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();
    let second = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();
    assert_eq!(first.id, second.id);

    let found = UserRepo::find_by_email(&pool, "ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn login_token_is_single_use(pool: PgPool) {
    let user = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();
    let expires = Utc::now() + Duration::minutes(15);
    LoginTokenRepo::create(&pool, user.id, "hash-a", expires)
        .await
        .unwrap();

    let consumed = LoginTokenRepo::consume(&pool, "hash-a").await.unwrap();
    assert_eq!(consumed.map(|t| t.user_id), Some(user.id));

    // Replay is rejected.
    assert!(LoginTokenRepo::consume(&pool, "hash-a").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_login_token_cannot_be_consumed(pool: PgPool) {
    let user = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();
    let expired = Utc::now() - Duration::minutes(1);
    LoginTokenRepo::create(&pool, user.id, "hash-b", expired)
        .await
        .unwrap();

    assert!(LoginTokenRepo::consume(&pool, "hash-b").await.unwrap().is_none());
    assert_eq!(LoginTokenRepo::cleanup_expired(&pool).await.unwrap(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn session_lookup_honours_revocation(pool: PgPool) {
    let user = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();
    let expires = Utc::now() + Duration::days(30);
    SessionRepo::create(&pool, user.id, "sess-hash", expires)
        .await
        .unwrap();

    let active = SessionRepo::find_active_by_hash(&pool, "sess-hash").await.unwrap();
    assert_eq!(active.map(|s| s.user_id), Some(user.id));

    assert!(SessionRepo::revoke_by_hash(&pool, "sess-hash").await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "sess-hash")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn subtask_toggle_unknown_id_is_noop(pool: PgPool) {
    let task = TaskRepo::create(
        &pool, "card", None, "todo", "medium", None, None, None, None, None,
    )
    .await
    .unwrap();

    let sub = SubtaskRepo::create(&pool, task.id, "step one").await.unwrap();
    assert!(!sub.completed);

    assert!(SubtaskRepo::toggle(&pool, task.id, sub.id).await.unwrap());
    let listed = SubtaskRepo::list_for_task(&pool, task.id).await.unwrap();
    assert!(listed[0].completed);

    // Unknown subtask id: no error, nothing changed.
    assert!(!SubtaskRepo::toggle(&pool, task.id, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn tag_replacement_and_cascade_delete(pool: PgPool) {
    let task = TaskRepo::create(
        &pool, "card", None, "todo", "medium", None, None, None, None, None,
    )
    .await
    .unwrap();

    TaskRepo::replace_tags(&pool, task.id, &["urgent".into(), "design".into()])
        .await
        .unwrap();
    assert_eq!(
        TaskRepo::tags_for(&pool, task.id).await.unwrap(),
        vec!["urgent", "design"]
    );

    TaskRepo::replace_tags(&pool, task.id, &["design".into()])
        .await
        .unwrap();
    assert_eq!(TaskRepo::tags_for(&pool, task.id).await.unwrap(), vec!["design"]);

    SubtaskRepo::create(&pool, task.id, "step").await.unwrap();
    assert!(TaskRepo::delete(&pool, task.id).await.unwrap());

    // Owned rows went with the task.
    assert!(TaskRepo::tags_for(&pool, task.id).await.unwrap().is_empty());
    assert!(SubtaskRepo::list_for_task(&pool, task.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_client_keeps_its_projects(pool: PgPool) {
    let client = ClientRepo::create(&pool, "Acme", None, None, None, None, None)
        .await
        .unwrap();
    let project = ProjectRepo::create(
        &pool, "Site", None, "high", Some(client.id), None, None,
    )
    .await
    .unwrap();
    assert_eq!(project.client_id, Some(client.id));

    let renamed = ClientRepo::update(
        &pool,
        client.id,
        &UpdateClient {
            name: Some("Acme Corp".into()),
            email: None,
            phone: None,
            company: None,
            notes: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.name, "Acme Corp");

    assert!(ClientRepo::delete(&pool, client.id).await.unwrap());

    let orphaned = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(orphaned.client_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn event_audit_records_newest_first(pool: PgPool) {
    let user = UserRepo::create_or_get(&pool, "ada@example.com").await.unwrap();

    EventRepo::insert(
        &pool,
        "task.created",
        "tasks",
        Some(1),
        Some(user.id),
        &serde_json::json!({}),
    )
    .await
    .unwrap();
    EventRepo::insert(
        &pool,
        "task.moved",
        "tasks",
        Some(1),
        Some(user.id),
        &serde_json::json!({ "new_status": "completed" }),
    )
    .await
    .unwrap();

    let recent = EventRepo::list_recent(&pool, 10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].event_type, "task.moved");
    assert_eq!(recent[1].event_type, "task.created");
    assert_eq!(recent[0].payload["new_status"], "completed");
}
