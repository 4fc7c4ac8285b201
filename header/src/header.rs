//! Block header type.

use {
    alloy_primitives::{Address, Bloom, Bytes, B256, B64},
    num_bigint::BigInt,
};

/// A block header.
///
/// The first fifteen fields are always encoded. The rest form an ordered tail
/// of optional fields, each introduced by a later schema version; see
/// [`crate::codec`] for how the tail is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub parent_hash: B256,
    pub ommers_hash: B256,
    /// Address of the block sealer.
    pub coinbase: Address,
    pub state_root: B256,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub logs_bloom: Bloom,
    pub difficulty: BigInt,
    pub number: BigInt,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64,
    /// Opaque consensus bytes; BFT chains store [`crate::ExtraData`] here.
    pub extra_data: Bytes,
    pub mix_hash: B256,
    pub nonce: B64,

    pub base_fee: Option<BigInt>,
    pub withdrawals_root: Option<B256>,
    pub blob_gas_used: Option<u64>,
    pub excess_blob_gas: Option<u64>,
    pub parent_beacon_root: Option<B256>,

    // Chain-specific legacy tail.
    pub fees: Option<BigInt>,
    /// Encoded reward distribution; empty means unset.
    pub rewards: Bytes,
    /// Empty means unset.
    pub miner_node_id: Bytes,
    /// Empty means unset.
    pub miner_node_sig: Bytes,
}

impl Header {
    /// Copy of this header carrying different extra-data.
    pub fn with_extra_data(&self, extra_data: Bytes) -> Self {
        Self {
            extra_data,
            ..self.clone()
        }
    }

    /// Height as a `u64`, or `None` if it is negative or too large.
    pub fn height(&self) -> Option<u64> {
        u64::try_from(&self.number).ok()
    }
}
