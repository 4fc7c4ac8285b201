//! Height-indexed parameter resolution.
//!
//! The parameters at height `h` are the base parameters with every transition
//! whose activation block is `<= h` applied on top, in ascending order. Each
//! application only touches the fields the record sets, so a later record's
//! value always wins and unset fields fall through to earlier values.

use {
    crate::{
        config::{ChainConfig, ParamOverride},
        params::{Beneficiary, BeneficiaryMode, EffectiveParams, QuorumRule},
    },
    alloy_primitives::{Address, U256},
    log::trace,
};

impl ParamOverride {
    /// Apply the fields this record sets on top of `params`.
    pub fn apply(&self, mut params: EffectiveParams) -> EffectiveParams {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut params.epoch_length, &self.epoch_length);
        set(&mut params.block_period_seconds, &self.block_period_seconds);
        set(&mut params.request_timeout_seconds, &self.request_timeout_seconds);
        set(&mut params.validators, &self.validators);
        set(&mut params.validator_selection_mode, &self.validator_selection_mode);
        set(&mut params.block_reward, &self.block_reward);
        set(&mut params.two_f_plus_one_enabled, &self.two_f_plus_one_enabled);
        if self.empty_block_period_seconds.is_some() {
            params.empty_block_period_seconds = self.empty_block_period_seconds;
        }
        if self.max_request_timeout_seconds.is_some() {
            params.max_request_timeout_seconds = self.max_request_timeout_seconds;
        }
        if self.miner_gas_limit.is_some() {
            params.miner_gas_limit = self.miner_gas_limit;
        }
        if self.transaction_size_limit.is_some() {
            params.transaction_size_limit = self.transaction_size_limit;
        }
        if self.contract_size_limit.is_some() {
            params.contract_size_limit = self.contract_size_limit;
        }

        params.beneficiary = self.apply_beneficiary(params.beneficiary);
        params
    }

    // A mode of "fixed" without an address leaves the running policy as is.
    fn apply_beneficiary(&self, mut beneficiary: Beneficiary) -> Beneficiary {
        if self.beneficiary_mode == Some(BeneficiaryMode::Validator) {
            beneficiary.mode = BeneficiaryMode::Validator;
        }
        if let Some(address) = self.mining_beneficiary {
            if matches!(self.beneficiary_mode, None | Some(BeneficiaryMode::Fixed)) {
                beneficiary = Beneficiary {
                    mode: BeneficiaryMode::Fixed,
                    address,
                };
            }
        }
        beneficiary
    }
}

impl ChainConfig {
    /// Transitions active at `height`, in activation order.
    pub fn qualifying(&self, height: u64) -> impl Iterator<Item = &ParamOverride> {
        self.transitions
            .iter()
            .filter(move |transition| transition.block <= height)
    }

    /// Visit every transition active at `height`, in activation order.
    pub fn transition_value<F>(&self, height: u64, callback: F)
    where
        F: FnMut(&ParamOverride),
    {
        self.qualifying(height).for_each(callback);
    }

    /// Resolve the effective parameters at `height`.
    pub fn resolve(&self, height: u64) -> EffectiveParams {
        let mut params = self
            .qualifying(height)
            .fold(self.base.clone(), |params, transition| {
                transition.apply(params)
            });
        params.quorum_rule = self.quorum_rule(height, params.two_f_plus_one_enabled);
        params
    }

    pub fn validators(&self, height: u64) -> Vec<Address> {
        self.resolve(height).validators
    }

    /// Last configured reward at or before `height`, zero if none.
    pub fn block_reward(&self, height: u64) -> U256 {
        self.qualifying(height)
            .fold(self.base.block_reward, |reward, transition| {
                transition.block_reward.unwrap_or(reward)
            })
    }

    /// Account credited with the reward of the block at `height` sealed by
    /// `coinbase`.
    pub fn reward_account(&self, height: u64, coinbase: Address) -> Address {
        let beneficiary = self
            .qualifying(height)
            .fold(self.base.beneficiary, |beneficiary, transition| {
                transition.apply_beneficiary(beneficiary)
            });
        match beneficiary.mode {
            BeneficiaryMode::Fixed => {
                trace!("fixed beneficiary mode, miningBeneficiary {}", beneficiary.address);
            }
            BeneficiaryMode::Validator => {
                trace!("validator beneficiary mode, coinbase {coinbase}");
            }
        }
        beneficiary.reward_account(coinbase)
    }

    fn quorum_rule(&self, height: u64, two_f_plus_one_enabled: bool) -> QuorumRule {
        match self.ceil_2n_by_3_block {
            Some(block) if block <= height && !two_f_plus_one_enabled => QuorumRule::Ceil2NBy3,
            _ => QuorumRule::TwoFPlusOne,
        }
    }
}
