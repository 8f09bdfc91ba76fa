//! End-to-end request flows through the task API.

use http::StatusCode;
use rstest::rstest;
use serde_json::json;
use taskledger::task::domain::{OwnerId, TaskId};

use crate::in_memory::helpers::{MemoryApi, api, payload, render};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_lifecycle_over_json(api: MemoryApi) -> eyre::Result<()> {
    let owner = OwnerId::new();

    let created = api
        .create(owner, payload(json!({ "title": "t1", "description": "d1" }))?)
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let created_body = render(created.body)?;
    let id = created_body["id"]
        .as_i64()
        .ok_or_else(|| eyre::eyre!("created body should carry an id"))?;
    let task_id = TaskId::new(id);

    let updated = api
        .update(owner, Some(task_id), payload(json!({ "status": "FINISHED" }))?)
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(
        render(updated.body)?,
        json!({ "id": id, "title": "t1", "description": "d1", "status": "FINISHED" })
    );

    let listed = api.list(owner).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(
        render(listed.body)?,
        json!([{ "id": id, "title": "t1", "description": "d1", "status": "FINISHED" }])
    );

    let deleted = api.delete(owner, task_id).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(
        render(deleted.body)?,
        json!({ "id": id, "title": "t1", "description": "d1" })
    );

    let detail = api.detail(owner, task_id).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
    assert_eq!(render(detail.body)?, json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_users_cannot_reach_a_task(api: MemoryApi) -> eyre::Result<()> {
    let owner = OwnerId::new();
    let intruder = OwnerId::new();
    let created = api.create(owner, payload(json!({ "title": "private" }))?).await;
    let body = render(created.body)?;
    let task_id = TaskId::new(
        body["id"]
            .as_i64()
            .ok_or_else(|| eyre::eyre!("created body should carry an id"))?,
    );
    assert_eq!(body["description"], json!(null));

    assert_eq!(api.detail(intruder, task_id).await.status, StatusCode::NOT_FOUND);
    assert_eq!(render(api.list(intruder).await.body)?, json!([]));
    let update = api
        .update(intruder, Some(task_id), payload(json!({ "status": "RUNNING" }))?)
        .await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
    assert_eq!(api.delete(intruder, task_id).await.status, StatusCode::NOT_FOUND);

    assert_eq!(api.detail(owner, task_id).await.status, StatusCode::OK);
    Ok(())
}
