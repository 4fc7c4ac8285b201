//! Canonical header encoding.
//!
//! Wire format: one RLP list holding the fifteen mandatory fields followed by
//! the optional tail, in [`OPTIONAL_FIELDS`] order.
//!
//! The tail is written up to and including the last field that is set. Every
//! earlier optional field is written too, as its value or as the empty-string
//! placeholder when unset, so that no field ever shifts position:
//!
//! ```text
//!  base_fee  withdrawals  blob_gas  excess_blob  beacon_root  fees  rewards  node_id  node_sig
//!    set        unset       unset       set          unset     ...
//!   [value]     [0x80]      [0x80]    [value]     (stop: nothing later is set)
//! ```
//!
//! A decoder that stops after the last field it knows about still reads every
//! earlier field at the right position, and a newer decoder sees the later
//! fields as present.

use {
    crate::{
        error::{DecodeError, EncodeError},
        header::Header,
        rlp::{
            decode_big, decode_bytes, decode_fixed, decode_list, decode_optional_fixed,
            decode_u64, encode_big, encode_empty, wrap_list,
        },
    },
    alloy_primitives::{keccak256, Bloom, B256, B64},
    alloy_rlp::{BufMut, Encodable, Error as RlpError},
    log::debug,
    num_bigint::{BigInt, Sign},
};

/// One entry of the optional tail.
pub struct OptionalField {
    pub name: &'static str,
    /// Whether the header carries a value for this field.
    pub is_set: fn(&Header) -> bool,
    /// Write the value, or the placeholder when unset.
    pub encode: fn(&Header, &mut dyn BufMut),
    pub decode: fn(&mut Header, &mut &[u8]) -> Result<(), DecodeError>,
}

/// The optional tail in schema order. New fields are appended at the end.
pub static OPTIONAL_FIELDS: [OptionalField; 9] = [
    OptionalField {
        name: "base_fee",
        is_set: |h| h.base_fee.is_some(),
        encode: |h, out| match &h.base_fee {
            Some(value) => encode_big(value, out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.base_fee = Some(decode_big(buf, "base_fee")?);
            Ok(())
        },
    },
    OptionalField {
        name: "withdrawals_root",
        is_set: |h| h.withdrawals_root.is_some(),
        encode: |h, out| match &h.withdrawals_root {
            Some(root) => root.encode(out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.withdrawals_root = decode_optional_fixed(buf, "withdrawals_root")?.map(B256::from);
            Ok(())
        },
    },
    OptionalField {
        name: "blob_gas_used",
        is_set: |h| h.blob_gas_used.is_some(),
        encode: |h, out| match h.blob_gas_used {
            Some(gas) => gas.encode(out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.blob_gas_used = Some(decode_u64(buf, "blob_gas_used")?);
            Ok(())
        },
    },
    OptionalField {
        name: "excess_blob_gas",
        is_set: |h| h.excess_blob_gas.is_some(),
        encode: |h, out| match h.excess_blob_gas {
            Some(gas) => gas.encode(out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.excess_blob_gas = Some(decode_u64(buf, "excess_blob_gas")?);
            Ok(())
        },
    },
    OptionalField {
        name: "parent_beacon_root",
        is_set: |h| h.parent_beacon_root.is_some(),
        encode: |h, out| match &h.parent_beacon_root {
            Some(root) => root.encode(out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.parent_beacon_root =
                decode_optional_fixed(buf, "parent_beacon_root")?.map(B256::from);
            Ok(())
        },
    },
    OptionalField {
        name: "fees",
        is_set: |h| h.fees.is_some(),
        encode: |h, out| match &h.fees {
            Some(value) => encode_big(value, out),
            None => encode_empty(out),
        },
        decode: |h, buf| {
            h.fees = Some(decode_big(buf, "fees")?);
            Ok(())
        },
    },
    OptionalField {
        name: "rewards",
        is_set: |h| !h.rewards.is_empty(),
        encode: |h, out| h.rewards.encode(out),
        decode: |h, buf| {
            h.rewards = decode_bytes(buf)?;
            Ok(())
        },
    },
    OptionalField {
        name: "miner_node_id",
        is_set: |h| !h.miner_node_id.is_empty(),
        encode: |h, out| h.miner_node_id.encode(out),
        decode: |h, buf| {
            h.miner_node_id = decode_bytes(buf)?;
            Ok(())
        },
    },
    OptionalField {
        name: "miner_node_sig",
        is_set: |h| !h.miner_node_sig.is_empty(),
        encode: |h, out| h.miner_node_sig.encode(out),
        decode: |h, buf| {
            h.miner_node_sig = decode_bytes(buf)?;
            Ok(())
        },
    },
];

/// The prefix of [`OPTIONAL_FIELDS`] that must be written for `header`. The
/// legacy fields share one cascade with the standard ones, so a set legacy field
/// writes placeholders for every unset standard field.
fn present_tail(header: &Header) -> &'static [OptionalField] {
    match OPTIONAL_FIELDS.iter().rposition(|field| (field.is_set)(header)) {
        Some(last) => &OPTIONAL_FIELDS[..=last],
        None => &[],
    }
}

fn check_non_negative(value: &BigInt, field: &'static str) -> Result<(), EncodeError> {
    if value.sign() == Sign::Minus {
        return Err(EncodeError::NegativeValue(field));
    }
    Ok(())
}

impl Header {
    /// Encode to the canonical RLP list.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        check_non_negative(&self.difficulty, "difficulty")?;
        check_non_negative(&self.number, "number")?;
        if let Some(base_fee) = &self.base_fee {
            check_non_negative(base_fee, "base_fee")?;
        }
        if let Some(fees) = &self.fees {
            check_non_negative(fees, "fees")?;
        }

        let mut payload = Vec::with_capacity(640);
        self.parent_hash.encode(&mut payload);
        self.ommers_hash.encode(&mut payload);
        self.coinbase.encode(&mut payload);
        self.state_root.encode(&mut payload);
        self.transactions_root.encode(&mut payload);
        self.receipts_root.encode(&mut payload);
        self.logs_bloom.encode(&mut payload);
        encode_big(&self.difficulty, &mut payload);
        encode_big(&self.number, &mut payload);
        self.gas_limit.encode(&mut payload);
        self.gas_used.encode(&mut payload);
        self.timestamp.encode(&mut payload);
        self.extra_data.encode(&mut payload);
        self.mix_hash.encode(&mut payload);
        self.nonce.encode(&mut payload);
        for field in present_tail(self) {
            (field.encode)(self, &mut payload);
        }
        Ok(wrap_list(payload))
    }

    /// Decode a header. A tail cut short by an older peer leaves the missing
    /// optional fields unset.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut buf = bytes;
        let mut payload = decode_list(&mut buf)?;
        if !buf.is_empty() {
            return Err(RlpError::Custom("trailing bytes after header").into());
        }

        let mut header = Header {
            parent_hash: B256::from(decode_fixed(&mut payload, "parent_hash")?),
            ommers_hash: B256::from(decode_fixed(&mut payload, "ommers_hash")?),
            coinbase: decode_fixed::<20>(&mut payload, "coinbase")?.into(),
            state_root: B256::from(decode_fixed(&mut payload, "state_root")?),
            transactions_root: B256::from(decode_fixed(&mut payload, "transactions_root")?),
            receipts_root: B256::from(decode_fixed(&mut payload, "receipts_root")?),
            logs_bloom: Bloom::from(decode_fixed::<256>(&mut payload, "logs_bloom")?),
            difficulty: decode_big(&mut payload, "difficulty")?,
            number: decode_big(&mut payload, "number")?,
            gas_limit: decode_u64(&mut payload, "gas_limit")?,
            gas_used: decode_u64(&mut payload, "gas_used")?,
            timestamp: decode_u64(&mut payload, "timestamp")?,
            extra_data: decode_bytes(&mut payload)?,
            mix_hash: B256::from(decode_fixed(&mut payload, "mix_hash")?),
            nonce: B64::from(decode_fixed(&mut payload, "nonce")?),
            ..Default::default()
        };

        for field in &OPTIONAL_FIELDS {
            if payload.is_empty() {
                break;
            }
            (field.decode)(&mut header, &mut payload)?;
        }
        if !payload.is_empty() {
            debug!(
                "ignoring {} bytes of unknown trailing header fields",
                payload.len()
            );
        }
        Ok(header)
    }

    /// Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> Result<B256, EncodeError> {
        self.encode().map(keccak256)
    }
}
