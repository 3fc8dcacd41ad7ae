//! Then steps for floor block BDD scenarios.

use super::world::{FloorWorld, run_async};
use rstest_bdd_macros::then;
use shopfloor::machine::services::MachineRegistryError;

#[then("the placement is rejected because block {block:u16} is occupied")]
fn placement_rejected_as_occupied(world: &FloorWorld, block: u16) -> Result<(), eyre::Report> {
    let result = world
        .last_placement
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing placement result in scenario world"))?;
    match result {
        Err(MachineRegistryError::BlockOccupied(occupied)) if occupied.value() == block => Ok(()),
        other => Err(eyre::eyre!(
            "expected block {block} to be reported occupied, got {other:?}"
        )),
    }
}

#[then(r#"the placement is rejected with "{message}""#)]
fn placement_rejected_with(world: &FloorWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_placement
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing placement result in scenario world"))?;
    match result {
        Err(err @ MachineRegistryError::Domain(_)) if err.to_string() == message => Ok(()),
        other => Err(eyre::eyre!(
            "expected validation error {message:?}, got {other:?}"
        )),
    }
}

#[then(r#"machine "{name}" occupies block {block:u16}"#)]
fn machine_occupies_block(
    world: &FloorWorld,
    name: String,
    block: u16,
) -> Result<(), eyre::Report> {
    let machine = world.placed(&name)?;
    let slots = run_async(world.registry.block_map())
        .map_err(|err| eyre::eyre!("block map failed: {err}"))?;
    let slot = slots
        .iter()
        .find(|slot| slot.block_no().value() == block)
        .ok_or_else(|| eyre::eyre!("block {block} missing from block map"))?;

    if slot.occupant().map(|occupant| occupant.id()) != Some(machine.id()) {
        return Err(eyre::eyre!(
            "expected machine {name} on block {block}, found {:?}",
            slot.occupant()
        ));
    }
    Ok(())
}

#[then(r#"machine "{name}" keeps block {block:u16} as completed"#)]
fn machine_keeps_block(world: &FloorWorld, name: String, block: u16) -> Result<(), eyre::Report> {
    let id = world.placed(&name)?.id();
    let stored = run_async(world.registry.find_by_id(id))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?
        .ok_or_else(|| eyre::eyre!("machine {name} missing from registry"))?;

    if !stored.is_completed() || stored.block_no().value() != block {
        return Err(eyre::eyre!(
            "expected machine {name} completed on block {block}, found {stored:?}"
        ));
    }
    Ok(())
}

#[then("no machine is registered")]
fn no_machine_registered(world: &FloorWorld) -> Result<(), eyre::Report> {
    let machines = run_async(world.registry.list_all())
        .map_err(|err| eyre::eyre!("listing failed: {err}"))?;
    if !machines.is_empty() {
        return Err(eyre::eyre!("expected an empty floor, found {machines:?}"));
    }
    Ok(())
}
