//! Error types for the header codecs and header validation.

use {alloy_primitives::Address, num_bigint::BigInt, thiserror::Error};

/// Errors raised while encoding a header.
///
/// Encoding checks every value before writing anything, so an error means no
/// bytes were produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A big-integer field holds a negative value.
    #[error("negative value in header field {0}")]
    NegativeValue(&'static str),
}

/// Errors raised while decoding bytes received from a peer or read from disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The bytes are not a well-formed RLP structure of the expected shape.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] alloy_rlp::Error),

    /// An integer field carries leading zero bytes.
    #[error("non-canonical integer in field {0}")]
    NonCanonicalInt(&'static str),

    /// A fixed-size field has the wrong length.
    #[error("field {field}: expected {expected} bytes, got {got}")]
    UnexpectedLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    /// Extra-data ends before vanity, validators, seals and round were read.
    #[error("extra-data is missing required fields")]
    TruncatedExtra,
}

/// Either side of a codec round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Reasons a decoded header is rejected against the chain configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The block number is negative or does not fit a `u64`.
    #[error("invalid block number {0}")]
    InvalidNumber(BigInt),

    /// Extra-data names a different validator set than the one configured
    /// for the header's height.
    #[error("validator set mismatch at height {height}: expected {expected:?}, got {got:?}")]
    ValidatorSetMismatch {
        height: u64,
        expected: Vec<Address>,
        got: Vec<Address>,
    },

    #[error("empty validator set in extra-data at height {height}")]
    EmptyValidatorSet { height: u64 },

    #[error("insufficient committed seals at height {height}: got {got}, need {required}")]
    InsufficientSeals {
        height: u64,
        got: usize,
        required: usize,
    },
}
