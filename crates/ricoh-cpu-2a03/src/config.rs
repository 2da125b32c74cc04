//! CPU configuration.

/// Value commonly observed for the unstable "magic" constant on NES
/// consoles. Real chips vary with temperature and batch.
pub const DEFAULT_UNSTABLE_MAGIC: u8 = 0xEE;

/// CPU configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// The constant OR-ed into A by ANE (`$8B`) and LXA (`$AB`).
    pub unstable_magic: u8,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            unstable_magic: DEFAULT_UNSTABLE_MAGIC,
        }
    }
}
