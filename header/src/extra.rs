//! BFT extra-data carried in [`Header::extra_data`].
//!
//! Layout, as one RLP list:
//!
//! ```text
//! [ vanity, [validator, ...], [seal, ...], round, [recipient, vote]? ]
//! ```
//!
//! The seal list is always written, even when empty. The vote sub-list is
//! written only when a vote is pending; an empty list in its place decodes as
//! no vote.

use {
    crate::{
        error::{CodecError, DecodeError},
        header::Header,
        rlp::{decode_bytes, decode_fixed, decode_list, decode_u64, wrap_list},
    },
    alloy_primitives::{Address, Bytes, B256},
    alloy_rlp::{Encodable, Error as RlpError},
};

/// Direction of a validator proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum VoteType {
    Add = 0xff,
    Drop = 0x00,
}

impl TryFrom<u64> for VoteType {
    type Error = DecodeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0xff => Ok(Self::Add),
            0x00 => Ok(Self::Drop),
            _ => Err(RlpError::Custom("unknown validator vote type").into()),
        }
    }
}

/// A pending proposal to add or remove `recipient` from the validator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatorVote {
    pub recipient: Address,
    pub vote: VoteType,
}

impl ValidatorVote {
    fn encode(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(24);
        self.recipient.encode(&mut payload);
        (self.vote as u8).encode(&mut payload);
        wrap_list(payload)
    }

    /// `None` for an empty list.
    fn decode(buf: &mut &[u8]) -> Result<Option<Self>, DecodeError> {
        let mut payload = decode_list(buf)?;
        if payload.is_empty() {
            return Ok(None);
        }
        let recipient = Address::from(decode_fixed::<20>(&mut payload, "vote.recipient")?);
        let vote = VoteType::try_from(decode_u64(&mut payload, "vote.type")?)?;
        if !payload.is_empty() {
            return Err(RlpError::Custom("trailing fields in validator vote").into());
        }
        Ok(Some(Self { recipient, vote }))
    }
}

/// Consensus metadata embedded in a header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtraData {
    pub vanity: Bytes,
    /// Ordered validator set for this height.
    pub validators: Vec<Address>,
    /// Commit seals in the order they were collected.
    pub committed_seals: Vec<Bytes>,
    pub round: u32,
    pub vote: Option<ValidatorVote>,
}

impl ExtraData {
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        self.vanity.encode(&mut payload);

        let mut validators = Vec::with_capacity(self.validators.len().saturating_mul(21));
        for validator in &self.validators {
            validator.encode(&mut validators);
        }
        payload.extend_from_slice(&wrap_list(validators));

        let mut seals = Vec::new();
        for seal in &self.committed_seals {
            seal.encode(&mut seals);
        }
        payload.extend_from_slice(&wrap_list(seals));

        self.round.encode(&mut payload);
        if let Some(vote) = &self.vote {
            payload.extend_from_slice(&vote.encode());
        }
        wrap_list(payload)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::TruncatedExtra);
        }
        let mut buf = bytes;
        let mut payload = decode_list(&mut buf).map_err(|err| match err {
            // The list header promises more bytes than the blob holds.
            DecodeError::MalformedEncoding(RlpError::InputTooShort) => {
                DecodeError::TruncatedExtra
            }
            other => other,
        })?;
        if !buf.is_empty() {
            return Err(RlpError::Custom("trailing bytes after extra-data").into());
        }

        let vanity = decode_bytes(required(&mut payload)?)?;

        let mut list = decode_list(required(&mut payload)?)?;
        let mut validators = Vec::new();
        while !list.is_empty() {
            validators.push(Address::from(decode_fixed::<20>(&mut list, "validator")?));
        }

        let mut list = decode_list(required(&mut payload)?)?;
        let mut committed_seals = Vec::new();
        while !list.is_empty() {
            committed_seals.push(decode_bytes(&mut list)?);
        }

        let round = decode_u64(required(&mut payload)?, "round")?;
        let round = u32::try_from(round).map_err(|_| DecodeError::from(RlpError::Overflow))?;

        let vote = if payload.is_empty() {
            None
        } else {
            ValidatorVote::decode(&mut payload)?
        };
        if !payload.is_empty() {
            return Err(RlpError::Custom("trailing fields in extra-data").into());
        }

        Ok(Self {
            vanity,
            validators,
            committed_seals,
            round,
            vote,
        })
    }

    /// Copy with the round reset to zero and the committed seals cleared
    /// unless `keep_seals` is set.
    pub fn filtered(&self, keep_seals: bool) -> Self {
        Self {
            committed_seals: if keep_seals {
                self.committed_seals.clone()
            } else {
                Vec::new()
            },
            round: 0,
            ..self.clone()
        }
    }

    pub fn from_header(header: &Header) -> Result<Self, DecodeError> {
        Self::decode(&header.extra_data)
    }

    /// Copy of `header` carrying this extra-data.
    pub fn apply_to(&self, header: &Header) -> Header {
        header.with_extra_data(Bytes::from(self.encode()))
    }
}

/// Hand back the remaining payload if another required field follows.
fn required<'a, 'b>(payload: &'a mut &'b [u8]) -> Result<&'a mut &'b [u8], DecodeError> {
    if payload.is_empty() {
        return Err(DecodeError::TruncatedExtra);
    }
    Ok(payload)
}

impl Header {
    /// Digest signed by the proposer: the header hash with seals stripped
    /// and round zeroed in its extra-data.
    pub fn seal_hash(&self) -> Result<B256, CodecError> {
        let extra = ExtraData::from_header(self)?.filtered(false);
        Ok(extra.apply_to(self).hash()?)
    }
}
