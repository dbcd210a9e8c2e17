//! Key input pipeline
//!
//! [`MatrixScanner`] turns raw matrix readings into debounced
//! press/release/repeat events, [`EventQueue`] decouples their production
//! from consumption. The scanner is the queue's only producer and the shell
//! its only consumer; both run in the same cooperative context, so the queue
//! needs no locking.

pub mod event;
pub mod queue;
pub mod scanner;

pub use event::{KeyEvent, KeyEventKind, KeySet};
pub use queue::{EventQueue, EVENT_QUEUE_DEPTH};
pub use scanner::{MatrixScanner, ScanTiming};

/// Number of physical keys (4 rows x 4 columns)
pub const KEY_COUNT: usize = 16;
