//! Domain model for machines and floor-block occupancy.
//!
//! A machine holds one numbered block. At most one non-completed machine may
//! hold a given block; completed machines keep their block number but no
//! longer count as occupants.

mod block;
mod error;
mod ids;
mod machine;
mod occupancy;

pub use block::{BlockGrid, BlockNumber};
pub use error::MachineDomainError;
pub use ids::MachineId;
pub use machine::{COMPLETE_STATUS, Machine, MachineDetails, PersistedMachineData};
pub use occupancy::{BlockSlot, block_map};
