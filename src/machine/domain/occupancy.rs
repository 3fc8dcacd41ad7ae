//! Block map of the floor grid.

use super::{BlockGrid, BlockNumber, Machine};
use serde::Serialize;

/// One block of the floor grid with its active occupant, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlot {
    block_no: BlockNumber,
    machine: Option<Machine>,
}

impl BlockSlot {
    /// Returns the block number.
    #[must_use]
    pub const fn block_no(&self) -> BlockNumber {
        self.block_no
    }

    /// Returns the non-completed machine holding the block, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<&Machine> {
        self.machine.as_ref()
    }
}

/// Lays out `machines` on `grid`, one slot per block in ascending order.
///
/// Completed machines never appear as occupants. Active machines whose block
/// lies outside the grid (after the grid was shrunk) are left out.
#[must_use]
pub fn block_map(grid: BlockGrid, machines: &[Machine]) -> Vec<BlockSlot> {
    grid.blocks()
        .map(|block| BlockSlot {
            block_no: block,
            machine: machines
                .iter()
                .find(|machine| machine.occupies(block))
                .cloned(),
        })
        .collect()
}
