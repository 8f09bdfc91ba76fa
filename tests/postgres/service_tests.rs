//! Service flows over the `PostgreSQL` store.

use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use taskledger::task::{
    adapters::postgres::PostgresTaskStore,
    domain::OwnerId,
    services::{CreateTaskRequest, TaskService, UpdateOutcome, UpdateTaskRequest},
};

use crate::postgres::helpers::{BoxError, PreparedStore, prepared_store};

fn service(ctx: &PreparedStore) -> TaskService<PostgresTaskStore, DefaultClock> {
    TaskService::new(Arc::new(ctx.store.clone()), Arc::new(DefaultClock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_update_and_delete_round_trip(
    prepared_store: Result<PreparedStore, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_store?;
    let service = service(&ctx);
    let owner = OwnerId::new();

    let task = service
        .create(CreateTaskRequest::new(owner, "t1").with_description("d1"))
        .await?;
    let outcome = service
        .update_task(
            UpdateTaskRequest::new(owner, task.id())
                .with_description("d2")
                .with_status("RUNNING"),
        )
        .await?;
    let UpdateOutcome::Updated { task: updated, status } = outcome else {
        return Err(format!("expected an update, got {outcome:?}").into());
    };
    assert_eq!(updated.title().as_str(), "t1");
    assert_eq!(updated.description(), Some("d2"));
    assert_eq!(status.name().as_str(), "RUNNING");

    let tracked = service
        .get_task(owner, task.id())
        .await?
        .ok_or("updated task should be visible")?;
    assert_eq!(tracked.task(), &updated);
    assert_eq!(
        tracked.status().map(|current| current.name().as_str()),
        Some("RUNNING")
    );

    assert_eq!(service.delete_task(owner, task.id()).await?, Some(task.id()));
    assert!(service.get_task(owner, task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_status_leaves_row_untouched(
    prepared_store: Result<PreparedStore, BoxError>,
) -> Result<(), BoxError> {
    let ctx = prepared_store?;
    let service = service(&ctx);
    let owner = OwnerId::new();
    let task = service
        .create(CreateTaskRequest::new(owner, "t1").with_description("d1"))
        .await?;

    let outcome = service
        .update_task(
            UpdateTaskRequest::new(owner, task.id())
                .with_title("t2")
                .with_status("DONE"),
        )
        .await?;

    assert_eq!(outcome, UpdateOutcome::InvalidStatus(task.clone()));
    let history = service
        .status_history(owner, task.id())
        .await?
        .ok_or("owned task should have history")?;
    assert_eq!(history.len(), 1);
    let tracked = service
        .get_task(owner, task.id())
        .await?
        .ok_or("task should still exist")?;
    assert_eq!(tracked.task().title().as_str(), "t1");
    Ok(())
}
