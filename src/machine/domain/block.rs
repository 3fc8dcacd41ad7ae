//! Floor block numbering.

use super::MachineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of a floor block, starting at 1.
///
/// A block number is only range-checked against the [`BlockGrid`] when a
/// machine is first placed. Persisted numbers are accepted as-is so that
/// completed machines keep their historical block after the grid shrinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockNumber(u16);

impl BlockNumber {
    /// Reconstructs a block number loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns [`MachineDomainError::InvalidPersistedBlock`] when the value is
    /// not in `1..=u16::MAX`.
    pub fn from_persisted(value: i64) -> Result<Self, MachineDomainError> {
        u16::try_from(value)
            .ok()
            .filter(|block| *block >= 1)
            .map(Self)
            .ok_or(MachineDomainError::InvalidPersistedBlock(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The numbered floor blocks machines can be placed on, `1..=size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGrid {
    size: u16,
}

impl BlockGrid {
    /// Grid size used when none is configured.
    pub const DEFAULT_SIZE: u16 = 12;

    /// Creates a grid with `size` blocks.
    ///
    /// # Errors
    ///
    /// Returns [`MachineDomainError::EmptyBlockGrid`] when `size` is zero.
    pub const fn new(size: u16) -> Result<Self, MachineDomainError> {
        if size == 0 {
            return Err(MachineDomainError::EmptyBlockGrid);
        }
        Ok(Self { size })
    }

    /// Returns the number of blocks in the grid.
    #[must_use]
    pub const fn size(self) -> u16 {
        self.size
    }

    /// Validates a requested block number against the grid.
    ///
    /// # Errors
    ///
    /// Returns [`MachineDomainError::MissingBlockNumber`] when `value` is
    /// `None`, or [`MachineDomainError::BlockOutOfRange`] when it lies outside
    /// `1..=size`.
    pub fn block(self, value: Option<i64>) -> Result<BlockNumber, MachineDomainError> {
        let requested = value.ok_or(MachineDomainError::MissingBlockNumber { max: self.size })?;
        u16::try_from(requested)
            .ok()
            .filter(|block| (1..=self.size).contains(block))
            .map(BlockNumber)
            .ok_or(MachineDomainError::BlockOutOfRange {
                value: requested,
                max: self.size,
            })
    }

    /// Iterates over every block in the grid in ascending order.
    pub fn blocks(self) -> impl Iterator<Item = BlockNumber> {
        (1..=self.size).map(BlockNumber)
    }
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}
