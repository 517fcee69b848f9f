pub mod memory;
pub mod operand;
pub mod value;

pub use memory::Frame;
pub use operand::{CallFrame, DestOperand, Operand, Output};
pub use value::{TypeTag, Value};
