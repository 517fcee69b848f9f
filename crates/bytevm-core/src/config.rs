//! VM Configuration
//!
//! Defines limits for call frames and the values installed into them.
//! Configuration specifies constraints only; enforcement is handled by the frame.

/// Frame configuration
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Largest encoded value (in bytes) a slot may hold
    pub max_value_bytes: usize,

    /// Maximum number of slots per call frame
    pub max_slots: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            max_value_bytes: 64 * 1024 * 1024,
            max_slots: 256,
        }
    }
}

impl VmConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_value_bytes(mut self, limit: usize) -> Self {
        self.max_value_bytes = limit;
        self
    }

    pub fn with_max_slots(mut self, limit: usize) -> Self {
        self.max_slots = limit;
        self
    }
}
