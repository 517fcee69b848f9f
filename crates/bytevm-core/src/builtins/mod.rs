//! Builtin Catalog
//!
//! Stable identifiers, qualified names and declared signatures of the byte
//! builtins, plus a small entry point that wires frame slots to a builtin.
//! Builtin codes are an eternal contract.

pub mod byte;
pub mod byte_array;

use tracing::trace;

use crate::error::{VmError, VmResult};
use crate::vm::operand::{CallFrame, DestOperand, Operand, Output};
use crate::vm::value::TypeTag;

use TypeTag::{Bool, Byte, ByteArray, I32};

/// Byte builtins (v0.1)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    // Byte arrays
    ByteArrayRead   = 0x01,
    ByteArrayWrite  = 0x02,
    ByteArrayLen    = 0x03,
    ByteArrayConcat = 0x04,
    ByteArrayAppend = 0x05,
    ByteArrayCopy   = 0x06,

    // Byte comparison
    ByteLt   = 0x10,
    ByteGt   = 0x11,
    ByteEq   = 0x12,
    ByteUneq = 0x13,
    ByteLteq = 0x14,
    ByteGteq = 0x15,
}

impl Builtin {
    pub const ALL: [Builtin; 12] = [
        Builtin::ByteArrayRead,
        Builtin::ByteArrayWrite,
        Builtin::ByteArrayLen,
        Builtin::ByteArrayConcat,
        Builtin::ByteArrayAppend,
        Builtin::ByteArrayCopy,
        Builtin::ByteLt,
        Builtin::ByteGt,
        Builtin::ByteEq,
        Builtin::ByteUneq,
        Builtin::ByteLteq,
        Builtin::ByteGteq,
    ];

    /// Convert raw byte to builtin
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Builtin::ByteArrayRead),
            0x02 => Some(Builtin::ByteArrayWrite),
            0x03 => Some(Builtin::ByteArrayLen),
            0x04 => Some(Builtin::ByteArrayConcat),
            0x05 => Some(Builtin::ByteArrayAppend),
            0x06 => Some(Builtin::ByteArrayCopy),

            0x10 => Some(Builtin::ByteLt),
            0x11 => Some(Builtin::ByteGt),
            0x12 => Some(Builtin::ByteEq),
            0x13 => Some(Builtin::ByteUneq),
            0x14 => Some(Builtin::ByteLteq),
            0x15 => Some(Builtin::ByteGteq),

            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    /// Qualified name, as reported in errors
    pub const fn name(self) -> &'static str {
        match self {
            Builtin::ByteArrayRead => "[]byte.read",
            Builtin::ByteArrayWrite => "[]byte.write",
            Builtin::ByteArrayLen => "[]byte.len",
            Builtin::ByteArrayConcat => "[]byte.concat",
            Builtin::ByteArrayAppend => "[]byte.append",
            Builtin::ByteArrayCopy => "[]byte.copy",
            Builtin::ByteLt => "byte.lt",
            Builtin::ByteGt => "byte.gt",
            Builtin::ByteEq => "byte.eq",
            Builtin::ByteUneq => "byte.uneq",
            Builtin::ByteLteq => "byte.lteq",
            Builtin::ByteGteq => "byte.gteq",
        }
    }

    /// Declared parameter types
    pub fn params(self) -> &'static [TypeTag] {
        match self {
            Builtin::ByteArrayRead => &[ByteArray, I32],
            Builtin::ByteArrayWrite => &[ByteArray, I32, Byte],
            Builtin::ByteArrayLen => &[ByteArray],
            Builtin::ByteArrayConcat | Builtin::ByteArrayCopy => &[ByteArray, ByteArray],
            Builtin::ByteArrayAppend => &[ByteArray, Byte],
            Builtin::ByteLt
            | Builtin::ByteGt
            | Builtin::ByteEq
            | Builtin::ByteUneq
            | Builtin::ByteLteq
            | Builtin::ByteGteq => &[Byte, Byte],
        }
    }

    /// Type installed into the output slot; `None` when nothing is written
    pub fn result(self) -> Option<TypeTag> {
        match self {
            Builtin::ByteArrayRead => Some(Byte),
            Builtin::ByteArrayWrite | Builtin::ByteArrayConcat | Builtin::ByteArrayAppend => {
                Some(ByteArray)
            }
            Builtin::ByteArrayLen => Some(I32),
            Builtin::ByteArrayCopy => None,
            _ => Some(Bool),
        }
    }
}

/// Run `builtin` over the values held in `args`, writing into `out`.
///
/// Operands are aliases of the slot values, so `out` may name one of the
/// argument slots. Type checking is left to the builtin itself.
pub fn invoke(
    builtin: Builtin,
    frame: &mut dyn CallFrame,
    args: &[usize],
    out: usize,
) -> VmResult<()> {
    let operator = builtin.name();
    let expected = builtin.params().len();
    if args.len() != expected {
        return Err(VmError::ArityMismatch {
            operator,
            expected,
            actual: args.len(),
        });
    }

    let values = args
        .iter()
        .map(|&slot| frame.load(slot))
        .collect::<VmResult<Vec<_>>>()?;
    trace!(operator, ?args, out, "invoking builtin");

    let arg = |i: usize| Operand::new(&values[i]);
    let output = Output::new(frame, out);

    match builtin {
        Builtin::ByteArrayRead => byte_array::read(arg(0), arg(1), output),
        Builtin::ByteArrayWrite => byte_array::write(arg(0), arg(1), arg(2), output),
        Builtin::ByteArrayLen => byte_array::len(arg(0), output),
        Builtin::ByteArrayConcat => byte_array::concat(arg(0), arg(1), output),
        Builtin::ByteArrayAppend => byte_array::append(arg(0), arg(1), output),
        Builtin::ByteArrayCopy => byte_array::copy(DestOperand::new(&values[0]), arg(1)),
        Builtin::ByteLt => byte::lt(arg(0), arg(1), output),
        Builtin::ByteGt => byte::gt(arg(0), arg(1), output),
        Builtin::ByteEq => byte::eq(arg(0), arg(1), output),
        Builtin::ByteUneq => byte::uneq(arg(0), arg(1), output),
        Builtin::ByteLteq => byte::lteq(arg(0), arg(1), output),
        Builtin::ByteGteq => byte::gteq(arg(0), arg(1), output),
    }
}
