//! Bounded key event queue
//!
//! FIFO with a deliberate lossy-backpressure policy: when the queue is
//! full a new event is dropped silently. On a UI device a lost keystroke
//! is preferable to a push that blocks the producer and stalls debounce
//! timing.

use heapless::Deque;

use super::event::KeyEvent;

/// Queue capacity in events
pub const EVENT_QUEUE_DEPTH: usize = 16;

/// Single-producer (scanner), single-consumer (shell) event queue
///
/// Both sides run in the same cooperative context, so no synchronization
/// is needed. An interrupt-driven scanner would have to replace this with
/// an SPSC queue with atomic index discipline.
#[derive(Default)]
pub struct EventQueue {
    events: Deque<KeyEvent, EVENT_QUEUE_DEPTH>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Append an event; O(1), drops `event` silently when full
    pub fn push(&mut self, event: KeyEvent) {
        // Full queue: the new event loses, queued ones survive
        let _ = self.events.push_back(event);
    }

    /// Take the oldest event; O(1), never blocks
    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
