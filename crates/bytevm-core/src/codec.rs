//! Value Encoding
//!
//! Canonical buffer layouts for the values the byte builtins consume and
//! produce. Every operator reads and writes buffers exclusively through
//! these functions.
//!
//! Layouts (all integers little-endian two's complement):
//!
//! | type     | layout                               |
//! |----------|--------------------------------------|
//! | `byte`   | 1 byte                               |
//! | `[]byte` | `i32` element count, then the bytes  |
//! | `i32`    | 4 bytes                              |
//! | `bool`   | `i32` holding `0` or `1`             |

use crate::error::{VmError, VmResult};
use crate::vm::value::TypeTag;

/// Size of the element count that prefixes every byte array
pub const LENGTH_PREFIX: usize = 4;

/// Read the element count stored in an array's prefix.
pub fn decode_length(buf: &[u8]) -> VmResult<i32> {
    let prefix: [u8; LENGTH_PREFIX] = buf
        .get(..LENGTH_PREFIX)
        .and_then(|p| p.try_into().ok())
        .ok_or(VmError::MalformedValue {
            tag: TypeTag::ByteArray,
            reason: "buffer shorter than its length prefix",
        })?;
    Ok(i32::from_le_bytes(prefix))
}

/// Read the element at `index`.
///
/// The caller guarantees `0 <= index < decode_length(buf)`.
#[inline]
pub fn decode_element(buf: &[u8], index: i32) -> u8 {
    buf[LENGTH_PREFIX + index as usize]
}

/// Validate an array buffer and return its elements.
pub fn decode_elements(buf: &[u8]) -> VmResult<&[u8]> {
    let count = checked_count(buf)?;
    Ok(&buf[LENGTH_PREFIX..LENGTH_PREFIX + count])
}

/// Validate an array buffer and return its elements for in-place update.
/// The length prefix itself is never exposed mutably.
pub fn decode_elements_mut(buf: &mut [u8]) -> VmResult<&mut [u8]> {
    let count = checked_count(buf)?;
    Ok(&mut buf[LENGTH_PREFIX..LENGTH_PREFIX + count])
}

fn checked_count(buf: &[u8]) -> VmResult<usize> {
    let count = decode_length(buf)?;
    if count < 0 {
        return Err(VmError::MalformedValue {
            tag: TypeTag::ByteArray,
            reason: "negative element count",
        });
    }
    let count = count as usize;
    if buf.len() != LENGTH_PREFIX + count {
        return Err(VmError::MalformedValue {
            tag: TypeTag::ByteArray,
            reason: "element count disagrees with buffer length",
        });
    }
    Ok(count)
}

/// Encode `elements` as a length-prefixed array.
pub fn encode_array(elements: &[u8]) -> VmResult<Vec<u8>> {
    let count = i32::try_from(elements.len())
        .map_err(|_| VmError::LengthOverflow { len: elements.len() })?;
    let mut buf = Vec::with_capacity(LENGTH_PREFIX + elements.len());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend_from_slice(elements);
    Ok(buf)
}

pub fn encode_scalar(value: u8) -> Vec<u8> {
    vec![value]
}

pub fn decode_scalar(buf: &[u8]) -> VmResult<u8> {
    match buf {
        [value] => Ok(*value),
        _ => Err(VmError::MalformedValue {
            tag: TypeTag::Byte,
            reason: "scalar byte must be exactly 1 byte",
        }),
    }
}

pub fn encode_i32(value: i32) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

pub fn decode_i32(buf: &[u8]) -> VmResult<i32> {
    let raw: [u8; 4] = buf.try_into().map_err(|_| VmError::MalformedValue {
        tag: TypeTag::I32,
        reason: "i32 must be exactly 4 bytes",
    })?;
    Ok(i32::from_le_bytes(raw))
}

/// Booleans share the `i32` layout so they compose with integer variables.
pub fn encode_bool(value: bool) -> Vec<u8> {
    encode_i32(value as i32)
}

pub fn decode_bool(buf: &[u8]) -> VmResult<bool> {
    let raw: [u8; 4] = buf.try_into().map_err(|_| VmError::MalformedValue {
        tag: TypeTag::Bool,
        reason: "bool must be exactly 4 bytes",
    })?;
    match i32::from_le_bytes(raw) {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(VmError::MalformedValue {
            tag: TypeTag::Bool,
            reason: "bool must encode 0 or 1",
        }),
    }
}
