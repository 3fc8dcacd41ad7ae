//! `PostgreSQL` machine repository behaviour.

use super::helpers::{BoxError, test_pool};
use rstest::rstest;
use shopfloor::document::domain::{DocumentKind, DocumentPath};
use shopfloor::machine::{
    adapters::postgres::PostgresMachineRepository,
    domain::{BlockGrid, Machine, MachineDetails},
    ports::{MachineRepository, MachineRepositoryError},
};

fn machine_in(block_no: i64, completed: bool) -> Result<Machine, BoxError> {
    let block = BlockGrid::default().block(Some(block_no))?;
    Ok(Machine::new(
        MachineDetails {
            name: format!("Machine {block_no}"),
            status: "Assembly".to_owned(),
            machine_no: "M-1".to_owned(),
            model: "HP-400".to_owned(),
            product_no: "P-1".to_owned(),
        },
        block,
        completed,
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_and_reload_round_trips_fields() -> Result<(), BoxError> {
    let Some(pool) = test_pool()? else {
        return Ok(());
    };
    let repository = PostgresMachineRepository::new(pool);
    let mut machine = machine_in(4, false)?;
    machine.attach_document(
        DocumentKind::MasterCard,
        DocumentPath::new("mastercards/1_mastercard_card.pdf"),
    );

    repository.store(&machine).await?;
    let loaded = repository.find_by_id(machine.id()).await?;

    assert_eq!(loaded, Some(machine));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_frees_block_in_database() -> Result<(), BoxError> {
    let Some(pool) = test_pool()? else {
        return Ok(());
    };
    let repository = PostgresMachineRepository::new(pool);
    let mut first = machine_in(9, false)?;
    repository.store(&first).await?;
    assert!(repository.exists_active_in_block(first.block_no()).await?);

    first.mark_complete();
    repository.update(&first).await?;
    assert!(!repository.exists_active_in_block(first.block_no()).await?);

    let second = machine_in(9, false)?;
    repository.store(&second).await?;
    let completed = repository.list_completed().await?;
    assert!(completed.contains(&first));
    assert!(!completed.contains(&second));

    assert!(repository.delete(second.id()).await?);
    assert!(!repository.delete(second.id()).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attach_document_writes_only_the_path_column() -> Result<(), BoxError> {
    let Some(pool) = test_pool()? else {
        return Ok(());
    };
    let repository = PostgresMachineRepository::new(pool);
    let machine = machine_in(11, false)?;
    repository.store(&machine).await?;
    let mut completed = machine.clone();
    completed.mark_complete();
    repository.update(&completed).await?;

    let path = DocumentPath::new("mastercards/1_mastercard_card.pdf");
    let attached = repository
        .attach_document(machine.id(), DocumentKind::MasterCard, &path)
        .await?;

    assert!(attached.is_completed());
    assert_eq!(attached.master_card_info(), Some(&path));
    assert_eq!(repository.find_by_id(machine.id()).await?, Some(attached));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_index_rejects_second_active_machine() -> Result<(), BoxError> {
    let Some(pool) = test_pool()? else {
        return Ok(());
    };
    let repository = PostgresMachineRepository::new(pool);
    repository.store(&machine_in(11, true)?).await?;
    repository.store(&machine_in(11, false)?).await?;

    // The violation aborts the test transaction, so it must come last.
    let result = repository.store(&machine_in(11, false)?).await;

    assert!(matches!(
        result,
        Err(MachineRepositoryError::BlockOccupied(block)) if block.value() == 11
    ));
    Ok(())
}
