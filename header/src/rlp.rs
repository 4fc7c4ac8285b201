//! RLP primitives shared by the header and extra-data codecs.
//!
//! Framing comes from `alloy_rlp`; integer canonicality is checked here so
//! that a leading zero byte is reported as [`DecodeError::NonCanonicalInt`]
//! with the offending field name.

use {
    crate::error::DecodeError,
    alloy_primitives::Bytes,
    alloy_rlp::{BufMut, Encodable, Error as RlpError, Header as RlpHeader},
    num_bigint::{BigInt, Sign},
    num_traits::Zero,
};

/// Minimal big-endian bytes of a non-negative integer; zero is empty.
pub(crate) fn big_to_bytes(value: &BigInt) -> Vec<u8> {
    if value.is_zero() {
        Vec::new()
    } else {
        value.magnitude().to_bytes_be()
    }
}

pub(crate) fn encode_big(value: &BigInt, out: &mut dyn BufMut) {
    big_to_bytes(value).as_slice().encode(out);
}

/// The canonical empty-string placeholder.
pub(crate) fn encode_empty(out: &mut dyn BufMut) {
    out.put_u8(alloy_rlp::EMPTY_STRING_CODE);
}

/// Prefix `payload` with a list header.
pub(crate) fn wrap_list(payload: Vec<u8>) -> Vec<u8> {
    let header = RlpHeader {
        list: true,
        payload_length: payload.len(),
    };
    let mut out = Vec::with_capacity(header.length().saturating_add(payload.len()));
    header.encode(&mut out);
    out.extend_from_slice(&payload);
    out
}

fn take<'a>(buf: &mut &'a [u8], len: usize) -> Result<&'a [u8], DecodeError> {
    if buf.len() < len {
        return Err(RlpError::InputTooShort.into());
    }
    let (head, rest) = buf.split_at(len);
    *buf = rest;
    Ok(head)
}

/// Read one list item and return its payload.
pub(crate) fn decode_list<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let header = RlpHeader::decode(buf)?;
    if !header.list {
        return Err(RlpError::UnexpectedString.into());
    }
    take(buf, header.payload_length)
}

/// Read one string item and return its payload.
pub(crate) fn decode_string<'a>(buf: &mut &'a [u8]) -> Result<&'a [u8], DecodeError> {
    let header = RlpHeader::decode(buf)?;
    if header.list {
        return Err(RlpError::UnexpectedList.into());
    }
    take(buf, header.payload_length)
}

fn canonical_int<'a>(
    buf: &mut &'a [u8],
    field: &'static str,
) -> Result<&'a [u8], DecodeError> {
    let bytes = decode_string(buf)?;
    if bytes.first() == Some(&0) {
        return Err(DecodeError::NonCanonicalInt(field));
    }
    Ok(bytes)
}

pub(crate) fn decode_u64(buf: &mut &[u8], field: &'static str) -> Result<u64, DecodeError> {
    let bytes = canonical_int(buf, field)?;
    if bytes.len() > 8 {
        return Err(RlpError::Overflow.into());
    }
    let mut be = [0u8; 8];
    be[8usize.saturating_sub(bytes.len())..].copy_from_slice(bytes);
    Ok(u64::from_be_bytes(be))
}

pub(crate) fn decode_big(buf: &mut &[u8], field: &'static str) -> Result<BigInt, DecodeError> {
    let bytes = canonical_int(buf, field)?;
    Ok(BigInt::from_bytes_be(Sign::Plus, bytes))
}

pub(crate) fn decode_bytes(buf: &mut &[u8]) -> Result<Bytes, DecodeError> {
    decode_string(buf).map(Bytes::copy_from_slice)
}

pub(crate) fn decode_fixed<const N: usize>(
    buf: &mut &[u8],
    field: &'static str,
) -> Result<[u8; N], DecodeError> {
    let bytes = decode_string(buf)?;
    bytes
        .try_into()
        .map_err(|_| DecodeError::UnexpectedLength {
            field,
            expected: N,
            got: bytes.len(),
        })
}

/// Like [`decode_fixed`], but an empty string decodes as `None`.
pub(crate) fn decode_optional_fixed<const N: usize>(
    buf: &mut &[u8],
    field: &'static str,
) -> Result<Option<[u8; N]>, DecodeError> {
    if buf.first() == Some(&alloy_rlp::EMPTY_STRING_CODE) {
        *buf = &buf[1..];
        return Ok(None);
    }
    decode_fixed(buf, field).map(Some)
}
