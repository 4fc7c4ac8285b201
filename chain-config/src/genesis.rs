//! Genesis read contract.
//!
//! These structs mirror the `config` object of a genesis file field for field.
//! They are plain data: nothing here is validated. Mode strings, the proposer
//! policy and the block reward are checked and converted into typed values by
//! [`ChainConfig::new`](crate::ChainConfig::new).

use {
    crate::error::{ConfigError, Result},
    alloy_primitives::{Address, U256},
    serde::{Deserialize, Serialize},
    std::str::FromStr,
};

/// Base QBFT parameters, active from block 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QbftConfig {
    /// Number of blocks after which pending validator votes are reset.
    #[serde(rename = "epochlength")]
    pub epoch_length: u64,

    /// Minimum time between two consecutive blocks' timestamps.
    #[serde(rename = "blockperiodseconds")]
    pub block_period_seconds: u64,

    /// Minimum time between a block and a following empty block.
    #[serde(
        rename = "emptyblockperiodseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub empty_block_period_seconds: Option<u64>,

    /// Base timeout of round 0.
    #[serde(rename = "requesttimeoutseconds")]
    pub request_timeout_seconds: u64,

    /// Proposer selection policy: 0 = round-robin, 1 = sticky.
    #[serde(rename = "policy")]
    pub proposer_policy: u64,

    /// Block from which the quorum switches from 2F+1 to ceil(2N/3).
    #[serde(rename = "ceil2Nby3Block", skip_serializing_if = "Option::is_none")]
    pub ceil_2n_by_3_block: Option<u64>,

    #[serde(rename = "blockReward", skip_serializing_if = "Option::is_none")]
    pub block_reward: Option<Quantity>,

    /// `fixed` or `validator`.
    #[serde(rename = "beneficiaryMode", skip_serializing_if = "Option::is_none")]
    pub beneficiary_mode: Option<String>,

    /// Account credited with the block reward in fixed mode.
    #[serde(rename = "miningBeneficiary", skip_serializing_if = "Option::is_none")]
    pub mining_beneficiary: Option<Address>,

    /// `blockheader` or `contract`.
    #[serde(
        rename = "validatorselectionmode",
        skip_serializing_if = "Option::is_none"
    )]
    pub validator_selection_mode: Option<String>,

    pub validators: Vec<Address>,

    /// Upper bound for the exponential round timeout.
    #[serde(
        rename = "maxRequestTimeoutSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_request_timeout_seconds: Option<u64>,
}

impl Default for QbftConfig {
    fn default() -> Self {
        Self {
            epoch_length: 30_000,
            block_period_seconds: 1,
            empty_block_period_seconds: None,
            request_timeout_seconds: 10,
            proposer_policy: 0,
            ceil_2n_by_3_block: None,
            block_reward: None,
            beneficiary_mode: None,
            mining_beneficiary: None,
            validator_selection_mode: None,
            validators: Vec::new(),
            max_request_timeout_seconds: None,
        }
    }
}

/// A sparse override activated at `block`.
///
/// Numeric fields left at zero and an empty `validators` list count as unset,
/// matching how the genesis format omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transition {
    pub block: u64,

    #[serde(rename = "epochlength", skip_serializing_if = "is_zero")]
    pub epoch_length: u64,

    #[serde(rename = "blockperiodseconds", skip_serializing_if = "is_zero")]
    pub block_period_seconds: u64,

    #[serde(
        rename = "emptyblockperiodseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub empty_block_period_seconds: Option<u64>,

    #[serde(rename = "requesttimeoutseconds", skip_serializing_if = "is_zero")]
    pub request_timeout_seconds: u64,

    #[serde(rename = "contractsizelimit", skip_serializing_if = "is_zero")]
    pub contract_size_limit: u64,

    pub validators: Vec<Address>,

    #[serde(
        rename = "validatorselectionmode",
        skip_serializing_if = "Option::is_none"
    )]
    pub validator_selection_mode: Option<String>,

    #[serde(rename = "miner.gaslimit", skip_serializing_if = "is_zero")]
    pub miner_gas_limit: u64,

    #[serde(rename = "2FPlus1Enabled", skip_serializing_if = "Option::is_none")]
    pub two_f_plus_one_enabled: Option<bool>,

    #[serde(rename = "transactionSizeLimit", skip_serializing_if = "is_zero")]
    pub transaction_size_limit: u64,

    #[serde(rename = "blockReward", skip_serializing_if = "Option::is_none")]
    pub block_reward: Option<Quantity>,

    #[serde(rename = "beneficiaryMode", skip_serializing_if = "Option::is_none")]
    pub beneficiary_mode: Option<String>,

    #[serde(rename = "miningBeneficiary", skip_serializing_if = "Option::is_none")]
    pub mining_beneficiary: Option<Address>,

    #[serde(
        rename = "maxRequestTimeoutSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_request_timeout_seconds: Option<u64>,
}

/// The consensus-relevant part of a genesis `config` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisChainConfig {
    #[serde(rename = "chainId", default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qbft: Option<QbftConfig>,

    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// A 256-bit quantity written either as a JSON integer, a decimal string or a
/// `0x`-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    pub fn to_u256(&self) -> Result<U256> {
        match self {
            Self::Number(n) => Ok(U256::from(*n)),
            Self::Text(text) => {
                let trimmed = text.trim();
                let parsed = match trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                {
                    Some(hex) => U256::from_str_radix(hex, 16),
                    None => U256::from_str(trimmed),
                };
                parsed.map_err(|_| ConfigError::InvalidBlockReward(text.clone()))
            }
        }
    }
}

impl From<u64> for Quantity {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}
