//! Block header and BFT extra-data codecs.
//!
//! ```text
//!  ChainConfig::resolve(n) ──► build_extra ──► ExtraData::encode ──► Header.extra_data
//!                                                                        │
//!                                                   Header::encode ◄─────┘
//!                                                        │
//!  peer bytes ──► Header::decode ──► ExtraData::decode ──► verify_header
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`header`]     | The `Header` value type |
//! | [`codec`]      | Canonical encoding with the cascading optional tail |
//! | [`extra`]      | `ExtraData` codec, seal filtering, seal hash |
//! | [`validation`] | Proposal and verification against a `ChainConfig` |
//! | [`error`]      | Encode, decode and validation errors |

pub mod codec;
pub mod error;
pub mod extra;
pub mod header;
mod rlp;
pub mod validation;

pub use {
    codec::{OptionalField, OPTIONAL_FIELDS},
    error::{CodecError, DecodeError, EncodeError, ValidationError},
    extra::{ExtraData, ValidatorVote, VoteType},
    header::Header,
    validation::{build_extra, prepare_header, verify_header, VerifiedHeader},
};
