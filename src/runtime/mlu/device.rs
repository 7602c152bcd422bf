//! MLU device implementation

use crate::runtime::Device;

/// MLU device identifier
///
/// Identifies one accelerator card. The device model exposes a single card
/// with ordinal 0; with CNRT bindings the ordinal maps to `cnrtSetDevice`.
#[derive(Clone, Debug)]
pub struct MluDevice {
    id: usize,
}

impl MluDevice {
    /// Create a device for the specified card ordinal
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

impl Default for MluDevice {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Device for MluDevice {
    fn id(&self) -> usize {
        self.id
    }

    fn name(&self) -> String {
        format!("mlu:{}", self.id)
    }
}
