//! In-memory adapters for machine persistence.

mod machine;

pub use machine::InMemoryMachineRepository;
