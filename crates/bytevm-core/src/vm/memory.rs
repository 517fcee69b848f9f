//! Call Frame Storage
//!
//! Index-based slots for a single call frame. Builtins write results by
//! replacing a slot's value wholesale; previous aliases keep pointing at
//! the old buffer.

use tracing::trace;

use crate::config::VmConfig;
use crate::error::{VmError, VmResult};
use super::operand::CallFrame;
use super::value::{TypeTag, Value};

/// Slots of a single call frame
#[derive(Debug)]
pub struct Frame {
    slots: Vec<Option<Value>>,
    max_value_bytes: usize,
}

impl Frame {
    pub fn new(config: &VmConfig, size: usize) -> VmResult<Self> {
        if size > config.max_slots {
            return Err(VmError::FrameTooLarge {
                requested: size,
                limit: config.max_slots,
            });
        }
        Ok(Frame {
            slots: vec![None; size],
            max_value_bytes: config.max_value_bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Borrow the value in `slot` without aliasing it
    pub fn get(&self, slot: usize) -> VmResult<&Value> {
        self.slots
            .get(slot)
            .ok_or(VmError::InvalidSlotAccess(slot))?
            .as_ref()
            .ok_or(VmError::EmptySlot(slot))
    }

    /// Store `value` as-is, sharing its segment with any other alias
    pub fn store(&mut self, slot: usize, value: Value) -> VmResult<()> {
        self.check_size(value.encoded_len())?;
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(VmError::InvalidSlotAccess(slot))?;
        *entry = Some(value);
        Ok(())
    }

    /// Allocate a zero-length byte array into `slot`
    pub fn alloc_array(&mut self, slot: usize) -> VmResult<()> {
        self.store(slot, Value::byte_array(&[])?)
    }

    fn check_size(&self, size: usize) -> VmResult<()> {
        if size > self.max_value_bytes {
            return Err(VmError::OutOfMemory {
                size,
                limit: self.max_value_bytes,
            });
        }
        Ok(())
    }
}

impl CallFrame for Frame {
    fn load(&self, slot: usize) -> VmResult<Value> {
        self.get(slot).cloned()
    }

    fn assign_output(&mut self, slot: usize, bytes: Vec<u8>, tag: TypeTag) -> VmResult<()> {
        // validate everything before touching the slot
        self.check_size(bytes.len())?;
        let max = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(VmError::InvalidSlotAccess(slot))?;
        trace!(slot, slots = max, %tag, size = bytes.len(), "output assigned");
        *entry = Some(Value::from_encoded(tag, bytes));
        Ok(())
    }
}
