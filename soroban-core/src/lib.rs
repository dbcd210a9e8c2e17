//! Board-agnostic core logic for the Soroban handheld firmware
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Key matrix scanning, debounce, and auto-repeat
//! - The bounded key event queue
//! - The app registry and single-active-app lifecycle
//! - The cooperative main loop (shell)
//! - A monotonic instant type so timing logic runs on the host
//!
//! The only hardware seam is the [`traits::KeyMatrix`] strobe-scan read;
//! the firmware crate implements it over GPIO, tests implement it with a
//! settable bitset. All timing decisions are threshold comparisons against
//! caller-supplied [`time::Instant`]s, so every debounce and cadence
//! property is unit-testable with synthetic timestamps.

#![no_std]
#![deny(unsafe_code)]

pub mod app;
pub mod keys;
pub mod shell;
pub mod time;
pub mod traits;

pub use app::{App, AppContext, AppEntry, AppRegistry, Navigator, MAX_APPS};
pub use keys::{EventQueue, KeyEvent, KeyEventKind, KeySet, MatrixScanner, ScanTiming, KEY_COUNT};
pub use shell::{LoopTiming, Shell};
pub use time::Instant;
pub use traits::KeyMatrix;
