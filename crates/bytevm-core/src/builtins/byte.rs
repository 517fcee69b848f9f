//! `byte` comparison builtins
//!
//! Each compares two scalar bytes and installs a `bool` result.

use tracing::trace;

use crate::codec;
use crate::error::VmResult;
use crate::gate;
use crate::vm::operand::{Operand, Output};
use crate::vm::value::TypeTag;
use super::Builtin;

pub fn lt(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteLt.name(), a, b, out, |x, y| x < y)
}

pub fn gt(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteGt.name(), a, b, out, |x, y| x > y)
}

pub fn eq(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteEq.name(), a, b, out, |x, y| x == y)
}

pub fn uneq(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteUneq.name(), a, b, out, |x, y| x != y)
}

pub fn lteq(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteLteq.name(), a, b, out, |x, y| x <= y)
}

pub fn gteq(a: Operand<'_>, b: Operand<'_>, out: Output<'_>) -> VmResult<()> {
    compare(Builtin::ByteGteq.name(), a, b, out, |x, y| x >= y)
}

fn compare(
    operator: &'static str,
    a: Operand<'_>,
    b: Operand<'_>,
    out: Output<'_>,
    relation: fn(u8, u8) -> bool,
) -> VmResult<()> {
    gate::check(operator, &[(a.tag(), TypeTag::Byte), (b.tag(), TypeTag::Byte)])?;

    let lhs = codec::decode_scalar(&a.bytes())?;
    let rhs = codec::decode_scalar(&b.bytes())?;
    let result = relation(lhs, rhs);

    trace!(operator, lhs, rhs, result, "bytes compared");
    out.assign(codec::encode_bool(result), TypeTag::Bool)
}
