//! Then steps for task tracking BDD scenarios.

use super::world::{TaskWorld, run_async};
use rstest_bdd_macros::then;
use taskledger::task::{ports::TaskStore, services::UpdateOutcome};

#[then(r#"the created task has title "{title}""#)]
fn created_task_has_title(world: &TaskWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.created_task()?;
    if task.title().as_str() != title {
        return Err(eyre::eyre!(
            "expected title {title}, found {}",
            task.title().as_str()
        ));
    }
    if task.id().value() < 1 {
        return Err(eyre::eyre!("expected a generated identifier, found {}", task.id()));
    }
    Ok(())
}

#[then(r#""{name}" sees the created task with status "{status}""#)]
fn user_sees_task_with_status(
    world: &TaskWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let created = world.created_task()?;
    let tracked = run_async(world.service.get_task(owner, created.id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("expected task {} to be visible to {name}", created.id()))?;

    if tracked.task().id() != created.id() {
        return Err(eyre::eyre!("lookup returned a different task"));
    }
    let current = tracked.status().map(|found| found.name().as_str());
    if current != Some(status.as_str()) {
        return Err(eyre::eyre!("expected status {status}, found {current:?}"));
    }
    Ok(())
}

#[then(r#""{name}" lists the titles "{titles}" all with status "{status}""#)]
fn user_lists_titles(
    world: &TaskWorld,
    name: String,
    titles: String,
    status: String,
) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let listed = run_async(world.service.get_tasks(owner))
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;

    let expected: Vec<&str> = titles.split(',').collect();
    let actual: Vec<&str> = listed
        .iter()
        .map(|tracked| tracked.task().title().as_str())
        .collect();
    if actual != expected {
        return Err(eyre::eyre!("expected titles {expected:?}, found {actual:?}"));
    }
    let all_match = listed
        .iter()
        .all(|tracked| tracked.status().map(|found| found.name().as_str()) == Some(status.as_str()));
    if !all_match {
        return Err(eyre::eyre!("expected every listed task to have status {status}"));
    }
    Ok(())
}

#[then(r#"the update reports status "{status}""#)]
fn update_reports_status(world: &TaskWorld, status: String) -> Result<(), eyre::Report> {
    match world.last_update.as_ref() {
        Some(UpdateOutcome::Updated { status: next, .. }) if next.name().as_str() == status => {
            Ok(())
        }
        other => Err(eyre::eyre!("expected update to {status}, found {other:?}")),
    }
}

#[then("the update reports not found")]
fn update_reports_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    match world.last_update.as_ref() {
        Some(UpdateOutcome::NotFound) => Ok(()),
        other => Err(eyre::eyre!("expected not found, found {other:?}")),
    }
}

#[then("the update reports an invalid status")]
fn update_reports_invalid_status(world: &TaskWorld) -> Result<(), eyre::Report> {
    let created = world.created_task()?;
    match world.last_update.as_ref() {
        Some(UpdateOutcome::InvalidStatus(task)) if task == created => Ok(()),
        other => Err(eyre::eyre!("expected invalid status with unchanged task, found {other:?}")),
    }
}

#[then("nothing was deleted")]
fn nothing_was_deleted(world: &TaskWorld) -> Result<(), eyre::Report> {
    match world.last_delete {
        Some(None) => Ok(()),
        other => Err(eyre::eyre!("expected no deletion, found {other:?}")),
    }
}

#[then("the task has {count:usize} status history entries")]
fn task_history_length(world: &TaskWorld, count: usize) -> Result<(), eyre::Report> {
    let created = world.created_task()?;
    let history = run_async(world.store.history(created.id()))
        .map_err(|err| eyre::eyre!("history lookup failed: {err}"))?;
    if history.len() != count {
        return Err(eyre::eyre!(
            "expected {count} history entries, found {}",
            history.len()
        ));
    }
    Ok(())
}
