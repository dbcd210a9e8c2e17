//! Hardware abstraction traits
//!
//! The scanner's only view of the hardware: one strobe-all-rows read of the
//! switch matrix. The firmware implements this over GPIO (drive each row low
//! in turn, read the pulled-up columns); tests implement it with a shared
//! settable bitset.

use crate::keys::KEY_COUNT;

/// A row/column switch matrix that can be read as a key bitset
pub trait KeyMatrix {
    /// Perform one full strobe scan and return the instantaneous, unfiltered
    /// pressed-key bitset (bit `row * cols + col`)
    ///
    /// Bits at positions >= [`KEY_COUNT`] are ignored by the scanner.
    fn read(&mut self) -> u16;
}

/// Mask of the valid key bits
pub const fn key_mask() -> u16 {
    if KEY_COUNT >= 16 {
        u16::MAX
    } else {
        (1 << KEY_COUNT) - 1
    }
}
