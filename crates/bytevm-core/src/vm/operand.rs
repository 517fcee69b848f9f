//! Operand References
//!
//! Every builtin argument is wrapped in a type that states how the builtin
//! may touch it: `Operand` is a read-only borrow, `DestOperand` is the
//! exclusive target of an in-place primitive, and `Output` is the frame
//! slot the result gets installed into.

use std::cell::{Ref, RefMut};

use crate::error::VmResult;
use super::value::{TypeTag, Value};

/// Interface the evaluator's call frame exposes to builtins
pub trait CallFrame {
    /// Fetch an alias of the value held in `slot`
    fn load(&self, slot: usize) -> VmResult<Value>;

    /// Install a freshly encoded buffer into `slot`.
    ///
    /// Either the whole value is installed or the slot is left untouched.
    fn assign_output(&mut self, slot: usize, bytes: Vec<u8>, tag: TypeTag) -> VmResult<()>;
}

/// Read-only operand
#[derive(Debug, Clone, Copy)]
pub struct Operand<'a> {
    value: &'a Value,
}

impl<'a> Operand<'a> {
    pub fn new(value: &'a Value) -> Self {
        Operand { value }
    }

    pub fn tag(&self) -> TypeTag {
        self.value.tag()
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Encoded buffer; only read after the type gate accepted the tag
    pub(crate) fn bytes(&self) -> Ref<'a, Vec<u8>> {
        self.value.bytes()
    }
}

/// Destination of an in-place block copy.
///
/// Mutations go straight into the shared segment, so every alias of the
/// value observes them.
#[derive(Debug)]
pub struct DestOperand<'a> {
    value: &'a Value,
}

impl<'a> DestOperand<'a> {
    pub fn new(value: &'a Value) -> Self {
        DestOperand { value }
    }

    pub fn tag(&self) -> TypeTag {
        self.value.tag()
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub(crate) fn bytes_mut(&self) -> RefMut<'a, Vec<u8>> {
        self.value.bytes_mut()
    }
}

/// Output slot of the current call
pub struct Output<'f> {
    frame: &'f mut dyn CallFrame,
    slot: usize,
}

impl<'f> Output<'f> {
    pub fn new(frame: &'f mut dyn CallFrame, slot: usize) -> Self {
        Output { frame, slot }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn assign(self, bytes: Vec<u8>, tag: TypeTag) -> VmResult<()> {
        self.frame.assign_output(self.slot, bytes, tag)
    }
}
