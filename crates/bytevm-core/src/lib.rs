//! bytevm - Byte Builtins Core Library
//!
//! Runtime operators for the `byte` and `[]byte` types of a register-based
//! VM: the buffer encoding, the operand type gate, and the builtins
//! themselves. The evaluator that resolves builtin names and owns call
//! frames lives outside this crate; `Frame` is a minimal stand-in that
//! implements the `CallFrame` interface it expects.

pub mod error;
pub mod config;
pub mod codec;
pub mod gate;
pub mod vm;
pub mod builtins;

// Re-export commonly used types
pub use error::{VmError, VmResult};
pub use config::VmConfig;
pub use builtins::{invoke, Builtin};
pub use vm::{CallFrame, DestOperand, Frame, Operand, Output, TypeTag, Value};
