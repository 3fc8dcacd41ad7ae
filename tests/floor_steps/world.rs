//! Shared world state for floor block BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use shopfloor::{
    document::adapters::InMemoryDocumentStore,
    machine::{
        adapters::memory::InMemoryMachineRepository,
        domain::{BlockGrid, Machine},
        services::{MachineRegistryError, MachineRegistryService},
    },
};

/// Service type used by the BDD world.
pub type TestRegistry =
    MachineRegistryService<InMemoryMachineRepository, InMemoryDocumentStore, DefaultClock>;

/// Scenario world for floor block behaviour tests.
pub struct FloorWorld {
    pub registry: TestRegistry,
    pub placed: HashMap<String, Machine>,
    pub last_placement: Option<Result<Machine, MachineRegistryError>>,
}

impl FloorWorld {
    /// Creates a world with an empty floor of the default grid size.
    #[must_use]
    pub fn new() -> Self {
        let registry = MachineRegistryService::new(
            Arc::new(InMemoryMachineRepository::new()),
            Arc::new(InMemoryDocumentStore::new()),
            Arc::new(DefaultClock),
            BlockGrid::default(),
        );
        Self {
            registry,
            placed: HashMap::new(),
            last_placement: None,
        }
    }

    /// Returns a machine placed earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no machine with `name` was placed.
    pub fn placed(&self, name: &str) -> Result<&Machine, eyre::Report> {
        self.placed
            .get(name)
            .ok_or_else(|| eyre::eyre!("machine {name} was not placed in this scenario"))
    }
}

impl Default for FloorWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> FloorWorld {
    FloorWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
