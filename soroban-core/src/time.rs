//! Monotonic time
//!
//! The core never reads a clock itself. The firmware converts
//! `embassy_time::Instant` into this microsecond tick type at the loop
//! boundary; tests fabricate whatever timeline they need.

/// A point on the device's monotonic microsecond timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u64);

impl Instant {
    /// Start of the timeline (boot)
    pub const EPOCH: Self = Self(0);

    /// From microseconds since boot
    pub const fn from_micros(us: u64) -> Self {
        Self(us)
    }

    /// From milliseconds since boot
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms * 1_000)
    }

    /// Microseconds since boot
    pub const fn as_micros(self) -> u64 {
        self.0
    }

    /// Microseconds elapsed since `earlier`, saturating at zero
    pub const fn micros_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// This instant advanced by `us` microseconds
    pub const fn add_micros(self, us: u64) -> Self {
        Self(self.0.saturating_add(us))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_saturates() {
        let a = Instant::from_millis(5);
        let b = Instant::from_millis(8);
        assert_eq!(b.micros_since(a), 3_000);
        assert_eq!(a.micros_since(b), 0);
    }

    #[test]
    fn test_ordering() {
        assert!(Instant::from_micros(10) >= Instant::from_micros(10));
        assert!(Instant::from_millis(1) > Instant::EPOCH);
    }
}
