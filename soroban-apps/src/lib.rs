//! The installable apps for the Soroban handheld
//!
//! Each app is a plain struct owning its private state and implementing
//! [`soroban_core::App`]. The core carries raw key codes only; the
//! [`keymap`] module gives codes 0..16 their calculator-keypad meaning for
//! all consuming apps.
//!
//! Per the device's scope, the WiFi scanner, packet sniffer, and BadUSB
//! apps are stubs over canned data: there is no radio or USB HID behind
//! them.

#![no_std]
#![deny(unsafe_code)]

pub mod badusb;
pub mod calculator;
pub mod editor;
pub mod keymap;
pub mod launcher;
pub mod sniffer;
pub mod stopwatch;
pub mod ui;
pub mod wifi_scanner;

pub use badusb::BadUsbApp;
pub use calculator::CalculatorApp;
pub use editor::EditorApp;
pub use launcher::LauncherApp;
pub use sniffer::SnifferApp;
pub use stopwatch::StopwatchApp;
pub use wifi_scanner::WifiScannerApp;
