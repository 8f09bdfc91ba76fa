//! Given steps for task tracking BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskledger::task::{domain::OwnerId, services::CreateTaskRequest};

#[given(r#"a user "{name}""#)]
fn a_user(world: &mut TaskWorld, name: String) {
    world.users.insert(name, OwnerId::new());
}

#[given(r#""{name}" owns a task titled "{title}""#)]
fn user_owns_task(world: &mut TaskWorld, name: String, title: String) -> Result<(), eyre::Report> {
    let owner = world.user(&name)?;
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(owner, title).with_description("seeded")),
    )
    .wrap_err("create task for scenario setup")?;
    world.last_created_task = Some(created);
    Ok(())
}
