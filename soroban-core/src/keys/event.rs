//! Key events and key-state bitsets

use super::KEY_COUNT;

/// What happened to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEventKind {
    /// Debounced transition from released to pressed
    Pressed,
    /// Debounced transition from pressed to released
    Released,
    /// Synthetic event while a key is held past the repeat delay
    Repeat,
}

/// One debounced key event
///
/// Created by the scanner, consumed exactly once by the shell, never
/// mutated. `code` is a raw position in the matrix (0..[`KEY_COUNT`]);
/// the core attaches no meaning to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub code: u8,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    pub const fn pressed(code: u8) -> Self {
        Self {
            code,
            kind: KeyEventKind::Pressed,
        }
    }

    pub const fn released(code: u8) -> Self {
        Self {
            code,
            kind: KeyEventKind::Released,
        }
    }

    pub const fn repeat(code: u8) -> Self {
        Self {
            code,
            kind: KeyEventKind::Repeat,
        }
    }
}

/// Snapshot of the debounced key state as a bitset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeySet(pub u16);

impl KeySet {
    /// Whether `code` is held; false for out-of-range codes
    pub const fn is_pressed(self, code: u8) -> bool {
        if code as usize >= KEY_COUNT {
            return false;
        }
        self.0 & (1 << code) != 0
    }

    /// True if no key is held
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyset_query() {
        let set = KeySet(0b1000_0001);
        assert!(set.is_pressed(0));
        assert!(set.is_pressed(7));
        assert!(!set.is_pressed(1));
    }

    #[test]
    fn test_keyset_out_of_range_is_false() {
        let set = KeySet(u16::MAX);
        assert!(!set.is_pressed(16));
        assert!(!set.is_pressed(255));
    }
}
