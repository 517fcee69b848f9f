//! Type Gate
//!
//! Checks operand tags against a builtin's declared signature. Runs before
//! any buffer is interpreted and never sees the buffers themselves, so a
//! foreign-shaped value can't be decoded as a byte array by mistake.

use tracing::debug;

use crate::error::{VmError, VmResult};
use crate::vm::value::TypeTag;

/// Check `(actual, expected)` tag pairs in argument order.
///
/// Fails on the first disagreement, naming its 1-based position.
pub fn check(operator: &'static str, operands: &[(TypeTag, TypeTag)]) -> VmResult<()> {
    for (i, &(actual, expected)) in operands.iter().enumerate() {
        if actual != expected {
            debug!(operator, position = i + 1, %actual, %expected, "type gate rejected operand");
            return Err(VmError::TypeMismatch {
                operator,
                position: i + 1,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
