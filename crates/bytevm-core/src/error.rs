//! Builtin Error Types
//!
//! Defines every failure a byte or byte-array builtin can report back to the
//! evaluator. None of these are fatal to the process; the evaluator decides
//! whether to abort the running program or propagate further.

use thiserror::Error;

use crate::vm::value::TypeTag;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    // Type gate
    #[error("{operator}: argument {position} is type '{actual}'; expected type '{expected}'")]
    TypeMismatch {
        operator: &'static str,
        position: usize,
        expected: TypeTag,
        actual: TypeTag,
    },

    #[error("{operator}: expected {expected} arguments, got {actual}")]
    ArityMismatch {
        operator: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unknown builtin: {0}")]
    UnknownBuiltin(String),

    // Indexing
    #[error("{operator}: negative index {index}")]
    NegativeIndex { operator: &'static str, index: i32 },

    #[error("{operator}: index {index} exceeds array of length {len}")]
    IndexOutOfRange {
        operator: &'static str,
        index: i32,
        len: i32,
    },

    // Encoding
    #[error("malformed {tag} value: {reason}")]
    MalformedValue { tag: TypeTag, reason: &'static str },

    #[error("array of {len} elements exceeds the encodable maximum")]
    LengthOverflow { len: usize },

    // Frame & resources
    #[error("value of {size} bytes exceeds the limit of {limit} bytes")]
    OutOfMemory { size: usize, limit: usize },

    #[error("invalid slot access: {0}")]
    InvalidSlotAccess(usize),

    #[error("slot {0} holds no value")]
    EmptySlot(usize),

    #[error("frame of {requested} slots exceeds the limit of {limit}")]
    FrameTooLarge { requested: usize, limit: usize },
}

pub type VmResult<T> = Result<T, VmError>;
