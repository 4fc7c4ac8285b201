//! Typed consensus parameters in effect at a given height.

use {
    crate::error::ConfigError,
    alloy_primitives::{Address, U256},
    std::{fmt, str::FromStr, time::Duration},
};

/// Who receives the block reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BeneficiaryMode {
    /// The block's own coinbase.
    #[default]
    Validator,
    /// A configured mining beneficiary address.
    Fixed,
}

/// Matching ignores ASCII case, and `validators` is an alias of `validator`.
/// Base and transition modes go through this one parser, so both accept the
/// same spellings.
impl FromStr for BeneficiaryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "validator" | "validators" => Ok(Self::Validator),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ConfigError::InvalidBeneficiaryMode(s.to_string())),
        }
    }
}

impl fmt::Display for BeneficiaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeneficiaryMode::Validator => write!(f, "validator"),
            BeneficiaryMode::Fixed => write!(f, "fixed"),
        }
    }
}

/// Resolved beneficiary policy. `address` is only read in fixed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Beneficiary {
    pub mode: BeneficiaryMode,
    pub address: Address,
}

impl Beneficiary {
    /// Account credited with the reward of a block sealed by `coinbase`.
    pub fn reward_account(&self, coinbase: Address) -> Address {
        match self.mode {
            BeneficiaryMode::Fixed => self.address,
            BeneficiaryMode::Validator => coinbase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposerPolicy {
    #[default]
    RoundRobin,
    Sticky,
}

impl TryFrom<u64> for ProposerPolicy {
    type Error = ConfigError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::RoundRobin),
            1 => Ok(Self::Sticky),
            other => Err(ConfigError::InvalidProposerPolicy(other)),
        }
    }
}

/// Where the validator set is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidatorSelectionMode {
    /// Validators are carried in header extra-data and changed by votes.
    #[default]
    BlockHeader,
    /// Validators are read from a smart contract.
    Contract,
}

impl FromStr for ValidatorSelectionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blockheader" => Ok(Self::BlockHeader),
            "contract" => Ok(Self::Contract),
            _ => Err(ConfigError::InvalidValidatorSelectionMode(s.to_string())),
        }
    }
}

/// How many commit seals a block needs out of `n` validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuorumRule {
    /// `2F + 1` where `F = (n - 1) / 3`.
    #[default]
    TwoFPlusOne,
    /// `ceil(2n / 3)`.
    Ceil2NBy3,
}

impl QuorumRule {
    pub fn quorum_size(&self, validators: usize) -> usize {
        match self {
            QuorumRule::TwoFPlusOne => {
                let faulty = validators.saturating_sub(1) / 3;
                faulty.saturating_mul(2).saturating_add(1)
            }
            QuorumRule::Ceil2NBy3 => validators.saturating_mul(2).div_ceil(3),
        }
    }
}

/// The fully resolved parameter set at one height.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectiveParams {
    pub epoch_length: u64,
    pub block_period_seconds: u64,
    /// Unset means the empty-block period equals the block period.
    pub empty_block_period_seconds: Option<u64>,
    pub request_timeout_seconds: u64,
    pub max_request_timeout_seconds: Option<u64>,
    pub proposer_policy: ProposerPolicy,
    /// Ordered; the index of a validator is its position in header extra-data.
    pub validators: Vec<Address>,
    pub validator_selection_mode: ValidatorSelectionMode,
    pub block_reward: U256,
    pub beneficiary: Beneficiary,
    pub two_f_plus_one_enabled: bool,
    pub quorum_rule: QuorumRule,
    pub miner_gas_limit: Option<u64>,
    pub transaction_size_limit: Option<u64>,
    pub contract_size_limit: Option<u64>,
}

impl EffectiveParams {
    pub fn beneficiary_mode(&self) -> BeneficiaryMode {
        self.beneficiary.mode
    }

    pub fn reward_account(&self, coinbase: Address) -> Address {
        self.beneficiary.reward_account(coinbase)
    }

    pub fn block_period(&self) -> Duration {
        Duration::from_secs(self.block_period_seconds)
    }

    /// Never shorter than the block period.
    pub fn empty_block_period(&self) -> Duration {
        let seconds = self
            .empty_block_period_seconds
            .unwrap_or(self.block_period_seconds)
            .max(self.block_period_seconds);
        Duration::from_secs(seconds)
    }

    /// Timeout for `round`: the request timeout doubled once per round, capped
    /// by the max request timeout when one is configured.
    pub fn round_timeout(&self, round: u32) -> Duration {
        let multiplier = 1u64.checked_shl(round).unwrap_or(u64::MAX);
        let mut seconds = self.request_timeout_seconds.saturating_mul(multiplier);
        if let Some(max) = self.max_request_timeout_seconds {
            seconds = seconds.min(max);
        }
        Duration::from_secs(seconds)
    }

    /// Commit seals required for the current validator set.
    pub fn quorum_size(&self) -> usize {
        self.quorum_rule.quorum_size(self.validators.len())
    }

    pub fn is_validator(&self, address: &Address) -> bool {
        self.validators.contains(address)
    }
}
