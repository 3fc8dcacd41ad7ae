//! Error types for machine domain validation.

use thiserror::Error;

/// Errors returned while constructing machine domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineDomainError {
    /// No block number was supplied.
    #[error("Block number must be between 1 and {max}.")]
    MissingBlockNumber {
        /// Largest valid block number.
        max: u16,
    },

    /// The block number lies outside the configured grid.
    #[error("Block number must be between 1 and {max}.")]
    BlockOutOfRange {
        /// Rejected block number.
        value: i64,
        /// Largest valid block number.
        max: u16,
    },

    /// The configured grid has no blocks.
    #[error("block grid size must be at least 1")]
    EmptyBlockGrid,

    /// A persisted block number is not a positive integer.
    #[error("invalid persisted block number {0}")]
    InvalidPersistedBlock(i64),
}
