//! Runtime Value Representation
//!
//! A value is a type tag plus the encoded buffer that is its sole
//! representation. Buffers live in reference-counted segments: cloning a
//! `Value` aliases the segment, the way several VM variables can refer to
//! the same storage.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::codec;
use crate::error::{VmError, VmResult};

/// Closed set of runtime types the byte builtins deal with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// Single unsigned byte
    Byte,
    /// Length-prefixed array of bytes
    ByteArray,
    /// Signed 32-bit integer
    I32,
    /// Boolean, encoded as an `i32`
    Bool,
}

impl TypeTag {
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Byte => "byte",
            TypeTag::ByteArray => "[]byte",
            TypeTag::I32 => "i32",
            TypeTag::Bool => "bool",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "byte" => Some(TypeTag::Byte),
            "[]byte" => Some(TypeTag::ByteArray),
            "i32" => Some(TypeTag::I32),
            "bool" => Some(TypeTag::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared storage segment holding one encoded buffer
#[derive(Debug, Clone)]
pub struct Segment(Rc<RefCell<Vec<u8>>>);

impl Segment {
    fn new(bytes: Vec<u8>) -> Self {
        Segment(Rc::new(RefCell::new(bytes)))
    }
}

/// Runtime value
#[derive(Debug, Clone)]
pub struct Value {
    tag: TypeTag,
    segment: Segment,
}

impl Value {
    /// Wrap an already-encoded buffer in a fresh segment.
    ///
    /// The buffer is taken as-is; layout is validated when an operator
    /// decodes it.
    pub fn from_encoded(tag: TypeTag, bytes: Vec<u8>) -> Self {
        Value {
            tag,
            segment: Segment::new(bytes),
        }
    }

    pub fn byte(value: u8) -> Self {
        Self::from_encoded(TypeTag::Byte, codec::encode_scalar(value))
    }

    pub fn byte_array(elements: &[u8]) -> VmResult<Self> {
        Ok(Self::from_encoded(
            TypeTag::ByteArray,
            codec::encode_array(elements)?,
        ))
    }

    pub fn i32(value: i32) -> Self {
        Self::from_encoded(TypeTag::I32, codec::encode_i32(value))
    }

    pub fn bool(value: bool) -> Self {
        Self::from_encoded(TypeTag::Bool, codec::encode_bool(value))
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    /// Snapshot of the encoded buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        self.segment.0.borrow().clone()
    }

    /// Encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        self.segment.0.borrow().len()
    }

    /// True when both values alias the same storage segment
    pub fn shares_storage(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.segment.0, &other.segment.0)
    }

    pub fn as_byte(&self) -> VmResult<u8> {
        self.expect_tag("value.as_byte", TypeTag::Byte)?;
        codec::decode_scalar(&self.bytes())
    }

    pub fn as_i32(&self) -> VmResult<i32> {
        self.expect_tag("value.as_i32", TypeTag::I32)?;
        codec::decode_i32(&self.bytes())
    }

    pub fn as_bool(&self) -> VmResult<bool> {
        self.expect_tag("value.as_bool", TypeTag::Bool)?;
        codec::decode_bool(&self.bytes())
    }

    pub fn as_byte_array(&self) -> VmResult<Vec<u8>> {
        self.expect_tag("value.as_byte_array", TypeTag::ByteArray)?;
        Ok(codec::decode_elements(&self.bytes())?.to_vec())
    }

    pub(crate) fn bytes(&self) -> Ref<'_, Vec<u8>> {
        self.segment.0.borrow()
    }

    pub(crate) fn bytes_mut(&self) -> RefMut<'_, Vec<u8>> {
        self.segment.0.borrow_mut()
    }

    fn expect_tag(&self, operator: &'static str, expected: TypeTag) -> VmResult<()> {
        if self.tag == expected {
            Ok(())
        } else {
            Err(VmError::TypeMismatch {
                operator,
                position: 1,
                expected,
                actual: self.tag,
            })
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && *self.bytes() == *other.bytes()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.bytes();
        match self.tag {
            TypeTag::Byte => match codec::decode_scalar(&bytes) {
                Ok(b) => write!(f, "{}", b),
                Err(_) => f.write_str("<malformed byte>"),
            },
            TypeTag::I32 => match codec::decode_i32(&bytes) {
                Ok(n) => write!(f, "{}", n),
                Err(_) => f.write_str("<malformed i32>"),
            },
            TypeTag::Bool => match codec::decode_bool(&bytes) {
                Ok(b) => write!(f, "{}", b),
                Err(_) => f.write_str("<malformed bool>"),
            },
            TypeTag::ByteArray => match codec::decode_elements(&bytes) {
                Ok(elements) => {
                    f.write_str("[")?;
                    for (i, b) in elements.iter().enumerate() {
                        if i > 0 {
                            f.write_str(" ")?;
                        }
                        write!(f, "{}", b)?;
                    }
                    f.write_str("]")
                }
                Err(_) => f.write_str("<malformed []byte>"),
            },
        }
    }
}
