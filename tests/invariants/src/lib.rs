//! QBFT Property-Based Invariant Tests
//!
//! Uses proptest to verify invariants across:
//! - Header and extra-data codec round trips and the optional-field cascade
//! - Height-indexed parameter resolution
//! - Subprotocol dispatch

pub mod codec_invariants;
pub mod dispatch_invariants;
pub mod resolver_invariants;
