//! Property-based tests for the header and extra-data codecs.
//!
//! Properties tested:
//! 1. Header round trip for canonical headers.
//! 2. Every optional field before the last set one is present on the wire.
//! 3. Extra-data round trip, including empty validator and seal lists.
//! 4. Negative heights never produce bytes.
//! 5. Decoding arbitrary bytes returns an error instead of panicking.

#[cfg(test)]
mod tests {
    use {
        alloy_primitives::{Address, Bloom, Bytes, B256, B64},
        alloy_rlp::Header as RlpHeader,
        num_bigint::BigInt,
        proptest::{collection::vec, option, prelude::*},
        qbft_header::{
            EncodeError, ExtraData, Header, ValidatorVote, VoteType, OPTIONAL_FIELDS,
        },
    };

    // ── Strategies ──

    fn b256() -> impl Strategy<Value = B256> {
        any::<[u8; 32]>().prop_map(B256::from)
    }

    fn address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>().prop_map(Address::from)
    }

    fn big() -> impl Strategy<Value = BigInt> {
        any::<u128>().prop_map(BigInt::from)
    }

    fn bytes(max: usize) -> impl Strategy<Value = Bytes> {
        vec(any::<u8>(), 0..max).prop_map(Bytes::from)
    }

    fn mandatory() -> impl Strategy<Value = Header> {
        (
            (b256(), b256(), address(), b256(), b256(), b256()),
            (
                vec(any::<u8>(), 256),
                big(),
                big(),
                any::<u64>(),
                any::<u64>(),
                any::<u64>(),
                bytes(96),
                b256(),
                any::<[u8; 8]>(),
            ),
        )
            .prop_map(|(roots, rest)| {
                let (
                    parent_hash,
                    ommers_hash,
                    coinbase,
                    state_root,
                    transactions_root,
                    receipts_root,
                ) = roots;
                let (
                    bloom,
                    difficulty,
                    number,
                    gas_limit,
                    gas_used,
                    timestamp,
                    extra_data,
                    mix_hash,
                    nonce,
                ) = rest;
                Header {
                    parent_hash,
                    ommers_hash,
                    coinbase,
                    state_root,
                    transactions_root,
                    receipts_root,
                    logs_bloom: Bloom::from_slice(&bloom),
                    difficulty,
                    number,
                    gas_limit,
                    gas_used,
                    timestamp,
                    extra_data,
                    mix_hash,
                    nonce: B64::from(nonce),
                    ..Default::default()
                }
            })
    }

    /// Headers whose optional tail is a prefix of the schema: integer slots
    /// inside the prefix are always set, hash and byte slots may be empty.
    fn canonical_header() -> impl Strategy<Value = Header> {
        (
            mandatory(),
            0..=OPTIONAL_FIELDS.len(),
            (big(), option::of(b256()), any::<u64>(), any::<u64>(), option::of(b256())),
            (big(), bytes(64), bytes(64), bytes(65)),
        )
            .prop_map(|(header, present, standard, legacy)| {
                let (base_fee, withdrawals_root, blob_gas_used, excess_blob_gas, beacon_root) =
                    standard;
                let (fees, rewards, miner_node_id, miner_node_sig) = legacy;
                Header {
                    base_fee: (present > 0).then_some(base_fee),
                    withdrawals_root: withdrawals_root.filter(|_| present > 1),
                    blob_gas_used: (present > 2).then_some(blob_gas_used),
                    excess_blob_gas: (present > 3).then_some(excess_blob_gas),
                    parent_beacon_root: beacon_root.filter(|_| present > 4),
                    fees: (present > 5).then_some(fees),
                    rewards: if present > 6 { rewards } else { Bytes::new() },
                    miner_node_id: if present > 7 { miner_node_id } else { Bytes::new() },
                    miner_node_sig: if present > 8 { miner_node_sig } else { Bytes::new() },
                    ..header
                }
            })
    }

    fn extra_data() -> impl Strategy<Value = ExtraData> {
        (
            bytes(64),
            vec(address(), 0..12),
            vec(bytes(80), 0..12),
            any::<u32>(),
            option::of((address(), any::<bool>())),
        )
            .prop_map(|(vanity, validators, committed_seals, round, vote)| ExtraData {
                vanity,
                validators,
                committed_seals,
                round,
                vote: vote.map(|(recipient, add)| ValidatorVote {
                    recipient,
                    vote: if add { VoteType::Add } else { VoteType::Drop },
                }),
            })
    }

    /// Number of top-level items in an RLP list.
    fn list_items(encoded: &[u8]) -> usize {
        let mut buf = encoded;
        let outer = RlpHeader::decode(&mut buf).unwrap();
        let mut payload = &buf[..outer.payload_length];
        let mut count = 0usize;
        while !payload.is_empty() {
            let item = RlpHeader::decode(&mut payload).unwrap();
            payload = &payload[item.payload_length..];
            count = count.saturating_add(1);
        }
        count
    }

    // ── Properties ──

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn header_roundtrip(header in canonical_header()) {
            let encoded = header.encode().unwrap();
            let decoded = Header::decode(&encoded).unwrap();
            prop_assert_eq!(&decoded, &header);
            prop_assert_eq!(decoded.hash().unwrap(), header.hash().unwrap());
        }

        #[test]
        fn header_tail_has_no_gaps(header in canonical_header()) {
            let last_set = OPTIONAL_FIELDS.iter().rposition(|field| (field.is_set)(&header));
            let expected = 15usize.saturating_add(last_set.map_or(0, |i| i.saturating_add(1)));
            prop_assert_eq!(list_items(&header.encode().unwrap()), expected);
        }

        #[test]
        fn extra_roundtrip(extra in extra_data()) {
            let encoded = extra.encode();
            prop_assert_eq!(ExtraData::decode(&encoded).unwrap(), extra);
        }

        #[test]
        fn seal_hash_ignores_seals_and_round(
            header in mandatory(),
            extra in extra_data(),
            round in any::<u32>(),
            seals in vec(bytes(65), 0..8),
        ) {
            let proposed = extra.filtered(false).apply_to(&header);
            let committed = ExtraData { round, committed_seals: seals, ..extra }.apply_to(&header);
            prop_assert_eq!(proposed.seal_hash().unwrap(), committed.seal_hash().unwrap());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn negative_number_never_encodes(header in mandatory(), number in i64::MIN..0i64) {
            let header = Header { number: BigInt::from(number), ..header };
            prop_assert_eq!(header.encode(), Err(EncodeError::NegativeValue("number")));
        }

        #[test]
        fn decode_arbitrary_bytes_does_not_panic(data in vec(any::<u8>(), 0..600)) {
            let _ = Header::decode(&data);
            let _ = ExtraData::decode(&data);
        }
    }
}
