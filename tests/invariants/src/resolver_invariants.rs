//! Property-based tests for height-indexed parameter resolution.
//!
//! Properties tested:
//! 1. Resolution only changes at transition heights.
//! 2. Each field is last-writer-wins over the qualifying transitions.
//! 3. Beneficiary defaults to the block coinbase when never configured.
//! 4. Quorum sizes stay within the validator set.
//! 5. Round timeouts never shrink as the round grows.

#[cfg(test)]
mod tests {
    use {
        alloy_primitives::{Address, U256},
        proptest::{collection::vec, option, prelude::*},
        qbft_chain_config::{ChainConfig, EffectiveParams, ParamOverride, QuorumRule},
    };

    // ── Helpers ──

    fn base() -> EffectiveParams {
        EffectiveParams {
            block_period_seconds: 1,
            request_timeout_seconds: 10,
            validators: vec![Address::repeat_byte(0xaa)],
            block_reward: U256::from(1),
            ..Default::default()
        }
    }

    fn transition() -> impl Strategy<Value = (u64, Option<Vec<Address>>, Option<u64>)> {
        (
            0..1_000u64,
            option::of(vec(any::<[u8; 20]>().prop_map(Address::from), 1..6)),
            option::of(any::<u64>()),
        )
    }

    /// A config with sorted transitions built from unsorted draws.
    fn config() -> impl Strategy<Value = ChainConfig> {
        vec(transition(), 0..8).prop_map(|mut draws| {
            draws.sort_by_key(|(block, _, _)| *block);
            let transitions = draws
                .into_iter()
                .map(|(block, validators, reward)| ParamOverride {
                    validators,
                    block_reward: reward.map(U256::from),
                    ..ParamOverride::at(block)
                })
                .collect();
            ChainConfig::from_parts(base(), None, transitions).unwrap()
        })
    }

    // ── Properties ──

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn resolution_constant_between_transitions(
            config in config(),
            a in 0..1_200u64,
            b in 0..1_200u64,
        ) {
            let (low, high) = (a.min(b), a.max(b));
            let activates_between = config
                .transitions()
                .iter()
                .any(|t| t.block > low && t.block <= high);
            if !activates_between {
                prop_assert_eq!(config.resolve(low), config.resolve(high));
            }
        }

        #[test]
        fn last_writer_wins(config in config(), height in 0..1_200u64) {
            let resolved = config.resolve(height);
            let qualifying: Vec<_> = config
                .transitions()
                .iter()
                .filter(|t| t.block <= height)
                .collect();

            let expected_validators = qualifying
                .iter()
                .rev()
                .find_map(|t| t.validators.clone())
                .unwrap_or_else(|| config.base().validators.clone());
            prop_assert_eq!(&resolved.validators, &expected_validators);
            prop_assert_eq!(config.validators(height), expected_validators);

            let expected_reward = qualifying
                .iter()
                .rev()
                .find_map(|t| t.block_reward)
                .unwrap_or(config.base().block_reward);
            prop_assert_eq!(resolved.block_reward, expected_reward);
            prop_assert_eq!(config.block_reward(height), expected_reward);
        }

        #[test]
        fn default_beneficiary_is_coinbase(
            config in config(),
            height in 0..1_200u64,
            coinbase in any::<[u8; 20]>().prop_map(Address::from),
        ) {
            prop_assert_eq!(config.reward_account(height, coinbase), coinbase);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn quorum_within_validator_set(n in 1..1_000usize) {
            let two_n = n.saturating_mul(2);
            let faulty = n.saturating_sub(1) / 3;
            let strict = QuorumRule::TwoFPlusOne.quorum_size(n);
            prop_assert_eq!(strict, faulty.saturating_mul(2).saturating_add(1));
            prop_assert!(strict <= n);
            if n % 3 == 1 {
                // n = 3F + 1: any two quorums share an honest validator.
                prop_assert!(strict.saturating_mul(2) > n.saturating_add(faulty));
            }

            let ceil = QuorumRule::Ceil2NBy3.quorum_size(n);
            prop_assert!(ceil.saturating_mul(3) >= two_n);
            prop_assert!(ceil <= n);
        }

        #[test]
        fn round_timeout_is_monotonic(
            timeout in 1..120u64,
            max in option::of(1..10_000u64),
            round_a in 0..80u32,
            round_b in 0..80u32,
        ) {
            let params = EffectiveParams {
                request_timeout_seconds: timeout,
                max_request_timeout_seconds: max,
                ..base()
            };
            let (low, high) = (round_a.min(round_b), round_a.max(round_b));
            prop_assert!(params.round_timeout(low) <= params.round_timeout(high));
            if let Some(max) = max {
                prop_assert!(params.round_timeout(high).as_secs() <= max);
            }
        }
    }
}
