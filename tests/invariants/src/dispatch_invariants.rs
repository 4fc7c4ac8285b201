//! Property-based tests for subprotocol dispatch.
//!
//! Properties tested:
//! 1. A version is combined exactly when its `(name, version)` pair is legacy.
//! 2. Consensus handles carry the message count from the version table.
//! 3. Versions missing from the table are always rejected.

#[cfg(test)]
mod tests {
    use {
        proptest::{collection::vec, prelude::*},
        qbft_consensus_net::{
            Dispatch, HandleRole, ProtocolDispatcher, ProtocolError, ProtocolSpec,
            ProtocolVersionTable, CLIQUE, ISTANBUL,
        },
    };

    fn name() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just(ISTANBUL), Just(CLIQUE), Just("ethash")]
    }

    fn istanbul_version() -> impl Strategy<Value = u32> {
        prop_oneof![Just(64u32), Just(99), Just(100)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn combined_iff_legacy(name in name(), version in 60..110u32) {
            let dispatcher = ProtocolDispatcher::default();
            let table = ProtocolVersionTable::quorum();
            match dispatcher.dispatch(name, version) {
                Ok(Dispatch::Combined(handle)) => {
                    prop_assert!(table.is_legacy(name, version));
                    prop_assert_eq!(handle.role, HandleRole::Combined);
                    prop_assert_eq!(
                        handle.spec.length,
                        table.message_count(name, version).unwrap()
                    );
                }
                Ok(Dispatch::Split { base, consensus }) => {
                    prop_assert!(!table.is_legacy(name, version));
                    prop_assert_eq!(base.spec, ProtocolSpec::eth66());
                    prop_assert_eq!(consensus.role, HandleRole::Consensus);
                    prop_assert_eq!(
                        consensus.spec.length,
                        table.message_count(name, version).unwrap()
                    );
                }
                Err(err) => {
                    prop_assert!(table.message_count(name, version).is_err());
                    prop_assert_eq!(
                        err,
                        ProtocolError::UnknownProtocolVersion {
                            name: name.to_string(),
                            version,
                        }
                    );
                }
            }
        }

        #[test]
        fn base_registered_once(versions in vec(istanbul_version(), 0..6)) {
            let dispatcher = ProtocolDispatcher::default();
            let handles = dispatcher.protocols_for(ISTANBUL, &versions).unwrap();
            let bases = handles.iter().filter(|h| h.role == HandleRole::Base).count();
            prop_assert_eq!(bases, usize::from(versions.contains(&100)));
        }
    }
}
