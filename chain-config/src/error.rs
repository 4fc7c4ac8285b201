//! Error types for chain configuration loading and validation.

use thiserror::Error;

/// Errors detected while loading a chain configuration.
///
/// All of these are raised once, when the genesis configuration is turned into
/// a [`ChainConfig`](crate::ChainConfig). Resolving parameters for a height on
/// a loaded config never fails.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Transition records are not in ascending block order.
    #[error(
        "transitions must be sorted by block: transition {index} at block {block} follows block {previous}"
    )]
    UnsortedTransitions {
        index: usize,
        block: u64,
        previous: u64,
    },

    #[error("invalid beneficiary mode {0:?}, expected fixed|validator")]
    InvalidBeneficiaryMode(String),

    #[error("invalid proposer policy {0}, expected 0 (round-robin) or 1 (sticky)")]
    InvalidProposerPolicy(u64),

    #[error("invalid validator selection mode {0:?}, expected blockheader|contract")]
    InvalidValidatorSelectionMode(String),

    /// The block reward is neither a decimal nor a `0x`-prefixed hex quantity.
    #[error("invalid block reward {0:?}")]
    InvalidBlockReward(String),

    #[error("blockperiodseconds must be > 0")]
    InvalidBlockPeriod,

    #[error("genesis config has no qbft section")]
    MissingQbftConfig,

    #[error("failed to parse genesis config: {0}")]
    Genesis(#[from] serde_json::Error),
}

/// Convenience result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
