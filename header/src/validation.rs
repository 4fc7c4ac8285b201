//! Producing and checking headers against the chain configuration.
//!
//! Both paths resolve parameters at the header's own number, never at the
//! local head, so a proposer and a verifier agree on the validator set.

use {
    crate::{
        error::ValidationError,
        extra::{ExtraData, ValidatorVote},
        header::Header,
    },
    alloy_primitives::{Address, Bytes, U256},
    log::debug,
    qbft_chain_config::{ChainConfig, ValidatorSelectionMode},
};

/// Extra-data for a new block at `number`: the validators in effect there
/// and no seals yet.
pub fn build_extra(
    config: &ChainConfig,
    number: u64,
    vanity: Bytes,
    round: u32,
    vote: Option<ValidatorVote>,
) -> ExtraData {
    ExtraData {
        vanity,
        validators: config.validators(number),
        committed_seals: Vec::new(),
        round,
        vote,
    }
}

/// Fill in the extra-data of a proposal at round zero.
pub fn prepare_header(
    config: &ChainConfig,
    header: &Header,
    vanity: Bytes,
    vote: Option<ValidatorVote>,
) -> Result<Header, ValidationError> {
    let height = header
        .height()
        .ok_or_else(|| ValidationError::InvalidNumber(header.number.clone()))?;
    Ok(build_extra(config, height, vanity, 0, vote).apply_to(header))
}

/// A header that passed [`verify_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedHeader {
    pub height: u64,
    pub extra: ExtraData,
    pub block_reward: U256,
    /// Account credited with the block reward.
    pub reward_account: Address,
}

/// Check a received header: its extra-data must decode, list the validators
/// configured for its height and carry a quorum of commit seals over a
/// non-empty validator set. The genesis header carries no seals.
pub fn verify_header(
    config: &ChainConfig,
    header: &Header,
) -> Result<VerifiedHeader, ValidationError> {
    let height = header
        .height()
        .ok_or_else(|| ValidationError::InvalidNumber(header.number.clone()))?;
    let extra = ExtraData::from_header(header)?;
    let params = config.resolve(height);

    // Contract-selected validators are not known from the config alone.
    if params.validator_selection_mode == ValidatorSelectionMode::BlockHeader
        && extra.validators != params.validators
    {
        return Err(ValidationError::ValidatorSetMismatch {
            height,
            expected: params.validators,
            got: extra.validators,
        });
    }

    if height > 0 {
        if extra.validators.is_empty() {
            return Err(ValidationError::EmptyValidatorSet { height });
        }
        let required = params.quorum_rule.quorum_size(extra.validators.len());
        if extra.committed_seals.len() < required {
            return Err(ValidationError::InsufficientSeals {
                height,
                got: extra.committed_seals.len(),
                required,
            });
        }
    }

    let reward_account = params.reward_account(header.coinbase);
    debug!(
        "Verified header {height}: {} validators, {} seals, reward {} to {reward_account}",
        extra.validators.len(),
        extra.committed_seals.len(),
        params.block_reward,
    );
    Ok(VerifiedHeader {
        height,
        extra,
        block_reward: params.block_reward,
        reward_account,
    })
}
