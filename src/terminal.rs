//! Terminal dimensions shared across the process.
//!
//! The resize handler writes, everything that lays out rows reads. Width and
//! height are packed into one atomic so a reader never sees a width from one
//! resize paired with the height from another.

use std::sync::atomic::{AtomicU32, Ordering};

/// Read-only view of the current terminal size in cells.
pub trait TerminalSizeProvider {
    /// `(width, height)`
    fn size(&self) -> (u16, u16);
}

#[derive(Debug, Default)]
pub struct SharedTerminalSize {
    packed: AtomicU32,
}

impl SharedTerminalSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            packed: AtomicU32::new(pack(width, height)),
        }
    }

    /// The instance the resize handler updates.
    pub fn global() -> &'static SharedTerminalSize {
        static GLOBAL: SharedTerminalSize = SharedTerminalSize::new(80, 24);
        &GLOBAL
    }

    pub fn set_size(&self, width: u16, height: u16) {
        self.packed.store(pack(width, height), Ordering::Release);
    }
}

impl TerminalSizeProvider for SharedTerminalSize {
    fn size(&self) -> (u16, u16) {
        let packed = self.packed.load(Ordering::Acquire);
        ((packed >> 16) as u16, packed as u16)
    }
}

const fn pack(width: u16, height: u16) -> u32 {
    ((width as u32) << 16) | height as u32
}
