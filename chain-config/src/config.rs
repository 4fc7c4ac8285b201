//! Validated, immutable chain configuration.
//!
//! A [`ChainConfig`] is built once from the genesis read contract. Building it
//! checks the transition ordering and converts every mode string, policy number
//! and reward quantity into typed values, so that resolving the parameters of
//! any height afterwards cannot fail.

use {
    crate::{
        error::{ConfigError, Result},
        genesis::{GenesisChainConfig, QbftConfig, Transition},
        params::{
            Beneficiary, BeneficiaryMode, EffectiveParams, ProposerPolicy, ValidatorSelectionMode,
        },
    },
    alloy_primitives::{Address, U256},
    log::info,
};

/// A typed transition: every field is `None` unless the record overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParamOverride {
    /// Activation height.
    pub block: u64,
    pub epoch_length: Option<u64>,
    pub block_period_seconds: Option<u64>,
    pub empty_block_period_seconds: Option<u64>,
    pub request_timeout_seconds: Option<u64>,
    pub max_request_timeout_seconds: Option<u64>,
    pub validators: Option<Vec<Address>>,
    pub validator_selection_mode: Option<ValidatorSelectionMode>,
    pub block_reward: Option<U256>,
    pub beneficiary_mode: Option<BeneficiaryMode>,
    pub mining_beneficiary: Option<Address>,
    pub two_f_plus_one_enabled: Option<bool>,
    pub miner_gas_limit: Option<u64>,
    pub transaction_size_limit: Option<u64>,
    pub contract_size_limit: Option<u64>,
}

impl ParamOverride {
    pub fn at(block: u64) -> Self {
        Self {
            block,
            ..Default::default()
        }
    }

    pub fn with_validators(mut self, validators: Vec<Address>) -> Self {
        self.validators = Some(validators);
        self
    }

    pub fn with_block_reward(mut self, reward: U256) -> Self {
        self.block_reward = Some(reward);
        self
    }

    pub fn with_beneficiary(
        mut self,
        mode: Option<BeneficiaryMode>,
        address: Option<Address>,
    ) -> Self {
        self.beneficiary_mode = mode;
        self.mining_beneficiary = address;
        self
    }

    fn from_transition(transition: &Transition) -> Result<Self> {
        Ok(Self {
            block: transition.block,
            epoch_length: non_zero(transition.epoch_length),
            block_period_seconds: non_zero(transition.block_period_seconds),
            empty_block_period_seconds: transition.empty_block_period_seconds,
            request_timeout_seconds: non_zero(transition.request_timeout_seconds),
            max_request_timeout_seconds: transition.max_request_timeout_seconds,
            validators: (!transition.validators.is_empty())
                .then(|| transition.validators.clone()),
            validator_selection_mode: transition
                .validator_selection_mode
                .as_deref()
                .map(str::parse)
                .transpose()?,
            block_reward: transition
                .block_reward
                .as_ref()
                .map(|reward| reward.to_u256())
                .transpose()?,
            beneficiary_mode: transition
                .beneficiary_mode
                .as_deref()
                .map(str::parse)
                .transpose()?,
            mining_beneficiary: transition.mining_beneficiary,
            two_f_plus_one_enabled: transition.two_f_plus_one_enabled,
            miner_gas_limit: non_zero(transition.miner_gas_limit),
            transaction_size_limit: non_zero(transition.transaction_size_limit),
            contract_size_limit: non_zero(transition.contract_size_limit),
        })
    }
}

/// Immutable consensus configuration: base parameters plus sorted overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    pub(crate) base: EffectiveParams,
    pub(crate) ceil_2n_by_3_block: Option<u64>,
    pub(crate) transitions: Vec<ParamOverride>,
}

impl ChainConfig {
    /// Validate the genesis records and build the config.
    pub fn new(qbft: &QbftConfig, transitions: &[Transition]) -> Result<Self> {
        let base = base_params(qbft)?;
        let transitions = transitions
            .iter()
            .map(ParamOverride::from_transition)
            .collect::<Result<Vec<_>>>()?;
        Self::from_parts(base, qbft.ceil_2n_by_3_block, transitions)
    }

    /// Build from already typed parts. Transitions must be sorted by block.
    pub fn from_parts(
        base: EffectiveParams,
        ceil_2n_by_3_block: Option<u64>,
        transitions: Vec<ParamOverride>,
    ) -> Result<Self> {
        if base.block_period_seconds == 0 {
            return Err(ConfigError::InvalidBlockPeriod);
        }
        check_sorted(&transitions)?;
        info!(
            "Loaded QBFT chain config: {} validators at genesis, {} transitions",
            base.validators.len(),
            transitions.len()
        );
        Ok(Self {
            base,
            ceil_2n_by_3_block,
            transitions,
        })
    }

    pub fn from_genesis(genesis: &GenesisChainConfig) -> Result<Self> {
        let qbft = genesis
            .qbft
            .as_ref()
            .ok_or(ConfigError::MissingQbftConfig)?;
        Self::new(qbft, &genesis.transitions)
    }

    /// Parse a genesis `config` JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let genesis: GenesisChainConfig = serde_json::from_str(json)?;
        Self::from_genesis(&genesis)
    }

    /// Parameters in effect before any transition.
    pub fn base(&self) -> &EffectiveParams {
        &self.base
    }

    pub fn transitions(&self) -> &[ParamOverride] {
        &self.transitions
    }

    pub fn ceil_2n_by_3_block(&self) -> Option<u64> {
        self.ceil_2n_by_3_block
    }
}

fn base_params(qbft: &QbftConfig) -> Result<EffectiveParams> {
    // A configured beneficiary implies fixed mode unless a mode is given.
    let mut beneficiary = Beneficiary::default();
    if let Some(address) = qbft.mining_beneficiary {
        beneficiary = Beneficiary {
            mode: BeneficiaryMode::Fixed,
            address,
        };
    }
    if let Some(mode) = qbft.beneficiary_mode.as_deref() {
        beneficiary.mode = mode.parse()?;
    }

    Ok(EffectiveParams {
        epoch_length: qbft.epoch_length,
        block_period_seconds: qbft.block_period_seconds,
        empty_block_period_seconds: qbft.empty_block_period_seconds,
        request_timeout_seconds: qbft.request_timeout_seconds,
        max_request_timeout_seconds: qbft.max_request_timeout_seconds,
        proposer_policy: ProposerPolicy::try_from(qbft.proposer_policy)?,
        validators: qbft.validators.clone(),
        validator_selection_mode: qbft
            .validator_selection_mode
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default(),
        block_reward: qbft
            .block_reward
            .as_ref()
            .map(|reward| reward.to_u256())
            .transpose()?
            .unwrap_or_default(),
        beneficiary,
        ..Default::default()
    })
}

fn check_sorted(transitions: &[ParamOverride]) -> Result<()> {
    for (index, pair) in transitions.windows(2).enumerate() {
        if pair[1].block < pair[0].block {
            return Err(ConfigError::UnsortedTransitions {
                index: index.saturating_add(1),
                block: pair[1].block,
                previous: pair[0].block,
            });
        }
    }
    Ok(())
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}
