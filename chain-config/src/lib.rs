//! QBFT chain configuration.
//!
//! A chain starts from a base parameter set (validators, block reward,
//! beneficiary policy, timeouts, ...) and changes it over time through an
//! ordered list of transitions, each activated at a block height and each
//! overriding only the fields it names.
//!
//! ```text
//!  genesis JSON ──► GenesisChainConfig ──► ChainConfig::new (validate once)
//!                                              │
//!                        height ──────────────►│ resolve: base ⊕ t₀ ⊕ t₁ ⊕ … (tᵢ.block ≤ height)
//!                                              ▼
//!                                        EffectiveParams
//! ```
//!
//! The [`ChainConfig`] is immutable once built and can be shared freely
//! between threads; resolution never mutates it.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`genesis`]  | Serde structs for the genesis read contract |
//! | [`config`]   | Validated `ChainConfig` and typed `ParamOverride` |
//! | [`params`]   | `EffectiveParams` and the typed policy enums |
//! | [`resolver`] | The height-indexed fold |
//! | [`error`]    | Crate-wide error enum |

pub mod config;
pub mod error;
pub mod genesis;
pub mod params;
pub mod resolver;

pub use {
    config::{ChainConfig, ParamOverride},
    error::{ConfigError, Result},
    genesis::{GenesisChainConfig, QbftConfig, Quantity, Transition},
    params::{
        Beneficiary, BeneficiaryMode, EffectiveParams, ProposerPolicy, QuorumRule,
        ValidatorSelectionMode,
    },
};
