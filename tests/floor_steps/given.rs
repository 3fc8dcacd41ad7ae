//! Given steps for floor block BDD scenarios.

use super::world::{FloorWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use shopfloor::machine::services::RegisterMachineRequest;

#[given(r#"machine "{name}" is already placed on block {block:i64}"#)]
fn machine_already_placed(
    world: &mut FloorWorld,
    name: String,
    block: i64,
) -> Result<(), eyre::Report> {
    let machine = run_async(
        world
            .registry
            .create(RegisterMachineRequest::new(name.clone(), Some(block)), None),
    )
    .wrap_err("place initial machine")?;
    world.placed.insert(name, machine);
    Ok(())
}
