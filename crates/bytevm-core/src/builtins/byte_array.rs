//! `[]byte` builtins
//!
//! Indexed access, growth and concatenation over length-prefixed byte
//! arrays. Every builtin except `copy` leaves its operands untouched and
//! installs a freshly encoded buffer into the output slot, so other
//! variables aliasing an operand keep seeing the old contents.

use tracing::{debug, trace};

use crate::codec;
use crate::error::{VmError, VmResult};
use crate::gate;
use crate::vm::operand::{DestOperand, Operand, Output};
use crate::vm::value::TypeTag;
use super::Builtin;

/// `[]byte.read(arr, idx) -> byte`
pub fn read(arr: Operand<'_>, idx: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayRead.name();
    gate::check(OP, &[(arr.tag(), TypeTag::ByteArray), (idx.tag(), TypeTag::I32)])?;

    let index = codec::decode_i32(&idx.bytes())?;
    let element = {
        let buf = arr.bytes();
        let len = element_count(&buf)?;
        check_index(OP, index, len)?;
        codec::decode_element(&buf, index)
    };

    trace!(operator = OP, index, element, "element read");
    out.assign(codec::encode_scalar(element), TypeTag::Byte)
}

/// `[]byte.write(arr, idx, val) -> []byte`
///
/// Rebuilds the whole buffer with one element replaced; `arr` itself is
/// never modified.
pub fn write(arr: Operand<'_>, idx: Operand<'_>, val: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayWrite.name();
    gate::check(
        OP,
        &[
            (arr.tag(), TypeTag::ByteArray),
            (idx.tag(), TypeTag::I32),
            (val.tag(), TypeTag::Byte),
        ],
    )?;

    let index = codec::decode_i32(&idx.bytes())?;
    let value = codec::decode_scalar(&val.bytes())?;
    let rebuilt = {
        let buf = arr.bytes();
        let elements = codec::decode_elements(&buf)?;
        check_index(OP, index, elements.len() as i32)?;

        let at = index as usize;
        let mut spliced = Vec::with_capacity(elements.len());
        spliced.extend_from_slice(&elements[..at]);
        spliced.push(value);
        spliced.extend_from_slice(&elements[at + 1..]);
        codec::encode_array(&spliced)?
    };

    trace!(operator = OP, index, value, "element written");
    out.assign(rebuilt, TypeTag::ByteArray)
}

/// `[]byte.len(arr) -> i32`
pub fn len(arr: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayLen.name();
    gate::check(OP, &[(arr.tag(), TypeTag::ByteArray)])?;

    let count = element_count(&arr.bytes())?;
    trace!(operator = OP, count, "length read");
    out.assign(codec::encode_i32(count), TypeTag::I32)
}

/// `[]byte.concat(a, b) -> []byte`
pub fn concat(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayConcat.name();
    gate::check(OP, &[(a.tag(), TypeTag::ByteArray), (b.tag(), TypeTag::ByteArray)])?;

    let joined = {
        let (left, right) = (a.bytes(), b.bytes());
        let head = codec::decode_elements(&left)?;
        let tail = codec::decode_elements(&right)?;
        let mut elements = Vec::with_capacity(head.len() + tail.len());
        elements.extend_from_slice(head);
        elements.extend_from_slice(tail);
        trace!(operator = OP, left = head.len(), right = tail.len(), "arrays joined");
        codec::encode_array(&elements)?
    };

    out.assign(joined, TypeTag::ByteArray)
}

/// `[]byte.append(arr, val) -> []byte`
pub fn append(arr: Operand<'_>, val: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayAppend.name();
    gate::check(OP, &[(arr.tag(), TypeTag::ByteArray), (val.tag(), TypeTag::Byte)])?;

    let value = codec::decode_scalar(&val.bytes())?;
    let grown = {
        let buf = arr.bytes();
        let elements = codec::decode_elements(&buf)?;
        let mut grown = Vec::with_capacity(elements.len() + 1);
        grown.extend_from_slice(elements);
        grown.push(value);
        codec::encode_array(&grown)?
    };

    trace!(operator = OP, value, "element appended");
    out.assign(grown, TypeTag::ByteArray)
}

/// `[]byte.copy(dst, src)`
///
/// Raw block transfer: overwrites the elements of `dst` in place with those
/// of `src`, stopping at the shorter of the two. This is the one builtin
/// that mutates shared storage; every alias of `dst` sees the new bytes
/// immediately. The length prefix of `dst` is never touched and a length
/// mismatch is not an error.
pub fn copy(dst: DestOperand<'_>, src: Operand<'_>) -> VmResult<()> {
    const OP: &str = Builtin::ByteArrayCopy.name();
    gate::check(OP, &[(dst.tag(), TypeTag::ByteArray), (src.tag(), TypeTag::ByteArray)])?;

    if dst.value().shares_storage(src.value()) {
        trace!(operator = OP, "source and destination share storage");
        return Ok(());
    }

    let source = src.bytes();
    let source = codec::decode_elements(&source)?;
    let mut target = dst.bytes_mut();
    let target = codec::decode_elements_mut(&mut target)?;

    let n = target.len().min(source.len());
    target[..n].copy_from_slice(&source[..n]);
    trace!(operator = OP, copied = n, dst = target.len(), src = source.len(), "block copied");
    Ok(())
}

fn element_count(buf: &[u8]) -> VmResult<i32> {
    // validates the whole layout, not just the prefix
    Ok(codec::decode_elements(buf)?.len() as i32)
}

fn check_index(operator: &'static str, index: i32, len: i32) -> VmResult<()> {
    if index < 0 {
        debug!(operator, index, "negative index");
        return Err(VmError::NegativeIndex { operator, index });
    }
    if index >= len {
        debug!(operator, index, len, "index out of range");
        return Err(VmError::IndexOutOfRange { operator, index, len });
    }
    Ok(())
}
