//! Key matrix scanner with debounce and auto-repeat
//!
//! The scanner compares each raw matrix reading against the previous one.
//! Any change restarts the debounce clock; only a reading that has been
//! constant for the full debounce interval is published to the stable
//! state, at which point the bitwise difference becomes Pressed/Released
//! events. Held keys independently generate Repeat events after an initial
//! delay, then at a fixed rate.
//!
//! Correctness does not depend on the polling cadence: polling slower than
//! the debounce interval degrades latency but never produces spurious
//! events.

use super::event::{KeyEvent, KeySet};
use super::queue::EventQueue;
use super::KEY_COUNT;
use crate::time::Instant;
use crate::traits::{key_mask, KeyMatrix};

/// Debounce and auto-repeat thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanTiming {
    /// Raw state must be constant this long before it is published
    pub debounce_us: u64,
    /// Hold time before the first Repeat
    pub repeat_delay_us: u64,
    /// Interval between subsequent Repeats
    pub repeat_interval_us: u64,
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            debounce_us: 20_000,
            repeat_delay_us: 300_000,
            repeat_interval_us: 80_000,
        }
    }
}

/// Debounced, repeat-aware matrix scanner
///
/// Sole producer for the [`EventQueue`]. All state is fixed-size; `poll`
/// never allocates and never fails.
pub struct MatrixScanner<M: KeyMatrix> {
    matrix: M,
    timing: ScanTiming,
    /// Last raw reading (debounce candidate)
    raw: u16,
    /// Debounced state feeding the queue
    stable: u16,
    /// When `raw` last changed
    last_change: Instant,
    /// Per-key hold clock, restarted on press and on every Repeat
    down_since: [Instant; KEY_COUNT],
    /// Keys that have emitted their first Repeat
    repeat_armed: u16,
}

impl<M: KeyMatrix> MatrixScanner<M> {
    pub fn new(matrix: M) -> Self {
        Self::with_timing(matrix, ScanTiming::default())
    }

    pub fn with_timing(matrix: M, timing: ScanTiming) -> Self {
        Self {
            matrix,
            timing,
            raw: 0,
            stable: 0,
            last_change: Instant::EPOCH,
            down_since: [Instant::EPOCH; KEY_COUNT],
            repeat_armed: 0,
        }
    }

    /// One scan step: read the matrix, debounce, emit events into `queue`
    pub fn poll(&mut self, now: Instant, queue: &mut EventQueue) {
        let reading = self.matrix.read() & key_mask();

        if reading != self.raw {
            self.raw = reading;
            self.last_change = now;
        }

        if now.micros_since(self.last_change) >= self.timing.debounce_us && self.stable != self.raw
        {
            let changed = self.stable ^ self.raw;
            for code in 0..KEY_COUNT as u8 {
                let bit = 1u16 << code;
                if changed & bit == 0 {
                    continue;
                }
                if self.raw & bit != 0 {
                    queue.push(KeyEvent::pressed(code));
                    self.down_since[code as usize] = now;
                    self.repeat_armed &= !bit;
                } else {
                    queue.push(KeyEvent::released(code));
                }
            }
            self.stable = self.raw;
        }

        // Repeat generation runs only over held keys; released keys keep
        // whatever repeat state they had, which is reset on the next press.
        for code in 0..KEY_COUNT as u8 {
            let bit = 1u16 << code;
            if self.stable & bit == 0 {
                continue;
            }
            let held_for = now.micros_since(self.down_since[code as usize]);
            if self.repeat_armed & bit == 0 {
                if held_for >= self.timing.repeat_delay_us {
                    queue.push(KeyEvent::repeat(code));
                    self.repeat_armed |= bit;
                    self.down_since[code as usize] = now;
                }
            } else if held_for >= self.timing.repeat_interval_us {
                queue.push(KeyEvent::repeat(code));
                self.down_since[code as usize] = now;
            }
        }
    }

    /// Debounced query; false for out-of-range codes, no side effects
    pub fn is_pressed(&self, code: u8) -> bool {
        KeySet(self.stable).is_pressed(code)
    }

    /// Snapshot of the debounced key state
    pub fn held(&self) -> KeySet {
        KeySet(self.stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyEventKind;
    use core::cell::Cell;

    /// Matrix fake reading from a shared cell so tests can flip keys
    /// between polls
    struct FakeMatrix<'m>(&'m Cell<u16>);

    impl KeyMatrix for FakeMatrix<'_> {
        fn read(&mut self) -> u16 {
            self.0.get()
        }
    }

    fn scanner(bits: &Cell<u16>) -> MatrixScanner<FakeMatrix<'_>> {
        MatrixScanner::new(FakeMatrix(bits))
    }

    /// Poll every millisecond over [from, to] inclusive
    fn poll_span(
        s: &mut MatrixScanner<FakeMatrix<'_>>,
        queue: &mut EventQueue,
        from_ms: u64,
        to_ms: u64,
    ) {
        for ms in from_ms..=to_ms {
            s.poll(Instant::from_millis(ms), queue);
        }
    }

    fn drain(queue: &mut EventQueue) -> heapless::Vec<KeyEvent, 64> {
        let mut out = heapless::Vec::new();
        while let Some(event) = queue.pop() {
            // Test queues are sized within 64 events
            out.push(event).unwrap();
        }
        out
    }

    #[test]
    fn test_stable_press_emits_once() {
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set(1 << 3);
        poll_span(&mut s, &mut queue, 0, 50);

        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], KeyEvent::pressed(3));
        assert!(s.is_pressed(3));
    }

    #[test]
    fn test_bounce_produces_single_event() {
        // Key 5: down at t=0, up at t=5ms, down again at t=8ms, then held.
        // Debounce is 20ms, so the only Pressed must appear once the t=8
        // reading has persisted to t=28 - nothing from the bounce.
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set(1 << 5);
        poll_span(&mut s, &mut queue, 0, 4);
        bits.set(0);
        poll_span(&mut s, &mut queue, 5, 7);
        bits.set(1 << 5);
        poll_span(&mut s, &mut queue, 8, 27);
        assert!(queue.is_empty(), "no event may appear before t=28");
        assert!(!s.is_pressed(5));

        s.poll(Instant::from_millis(28), &mut queue);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], KeyEvent::pressed(5));
    }

    #[test]
    fn test_transitions_kept_in_fifo_order() {
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        // Press 2, then (after it settles) press 7, release 2, release 7
        bits.set(1 << 2);
        poll_span(&mut s, &mut queue, 0, 30);
        bits.set((1 << 2) | (1 << 7));
        poll_span(&mut s, &mut queue, 31, 60);
        bits.set(1 << 7);
        poll_span(&mut s, &mut queue, 61, 90);
        bits.set(0);
        poll_span(&mut s, &mut queue, 91, 120);

        let events = drain(&mut queue);
        assert_eq!(
            &events[..],
            &[
                KeyEvent::pressed(2),
                KeyEvent::pressed(7),
                KeyEvent::released(2),
                KeyEvent::released(7),
            ]
        );
    }

    #[test]
    fn test_simultaneous_transitions_in_bit_order() {
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set((1 << 1) | (1 << 4) | (1 << 9));
        poll_span(&mut s, &mut queue, 0, 25);

        let events = drain(&mut queue);
        assert_eq!(
            &events[..],
            &[
                KeyEvent::pressed(1),
                KeyEvent::pressed(4),
                KeyEvent::pressed(9),
            ]
        );
    }

    #[test]
    fn test_repeat_cadence() {
        // Hold for 1000ms total. Press settles at t=20, repeats start
        // repeat_delay after that, then every repeat_interval:
        // expected repeats = 1 + floor((held - delay) / rate)
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set(1);
        for ms in 0..=1000u64 {
            s.poll(Instant::from_millis(ms), &mut queue);
        }

        let events = drain(&mut queue);
        let repeats = events
            .iter()
            .filter(|e| e.kind == KeyEventKind::Repeat)
            .count();
        // Settled at t=20, held 980ms: 1 + (980 - 300) / 80 = 9
        assert_eq!(repeats, 9);
        assert_eq!(events[0], KeyEvent::pressed(0));
    }

    #[test]
    fn test_no_repeat_before_delay() {
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set(1 << 6);
        poll_span(&mut s, &mut queue, 0, 250);
        bits.set(0);
        poll_span(&mut s, &mut queue, 251, 300);

        let events = drain(&mut queue);
        assert_eq!(
            &events[..],
            &[KeyEvent::pressed(6), KeyEvent::released(6)]
        );
    }

    #[test]
    fn test_repeat_rearms_after_release() {
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        // First hold long enough for one repeat
        bits.set(1);
        poll_span(&mut s, &mut queue, 0, 330);
        bits.set(0);
        poll_span(&mut s, &mut queue, 331, 360);
        drain(&mut queue);

        // Second press: repeat delay applies from scratch
        bits.set(1);
        poll_span(&mut s, &mut queue, 361, 500);
        let events = drain(&mut queue);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, KeyEventKind::Pressed);
    }

    #[test]
    fn test_slow_polling_stays_correct() {
        // Polling slower than the debounce interval: latency suffers but
        // exactly one event per transition still comes out.
        let bits = Cell::new(0);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();

        bits.set(1 << 2);
        for ms in (0..=200u64).step_by(50) {
            s.poll(Instant::from_millis(ms), &mut queue);
        }
        let events = drain(&mut queue);
        let presses = events
            .iter()
            .filter(|e| e.kind == KeyEventKind::Pressed)
            .count();
        assert_eq!(presses, 1);
    }

    #[test]
    fn test_is_pressed_out_of_range() {
        let bits = Cell::new(u16::MAX);
        let mut s = scanner(&bits);
        let mut queue = EventQueue::new();
        poll_span(&mut s, &mut queue, 0, 25);

        assert!(s.is_pressed(15));
        assert!(!s.is_pressed(16));
        assert!(!s.is_pressed(200));
    }
}
