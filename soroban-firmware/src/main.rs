//! Soroban - Handheld Calculator Firmware
//!
//! Firmware binary for RP2040-based Soroban handhelds: a 4x4 key matrix,
//! a 320x240 ST7365P TFT, and a launcher full of keypad-driven apps.
//!
//! Named after the Japanese soroban, the pocketable calculating machine
//! this device pretends to be.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use soroban_apps::{
    BadUsbApp, CalculatorApp, EditorApp, LauncherApp, SnifferApp, StopwatchApp, WifiScannerApp,
};
use soroban_core::{AppRegistry, Instant, Shell};

use crate::display::St7365p;
use crate::matrix::MatrixDriver;

mod boot;
mod display;
mod matrix;

/// SPI clock for the TFT
const DISPLAY_SPI_HZ: u32 = 32_000_000;

// Static cells for the apps (registry holds references for the program
// duration)
static LAUNCHER: StaticCell<LauncherApp> = StaticCell::new();
static CALCULATOR: StaticCell<CalculatorApp> = StaticCell::new();
static STOPWATCH: StaticCell<StopwatchApp> = StaticCell::new();
static WIFI_SCANNER: StaticCell<WifiScannerApp> = StaticCell::new();
static SNIFFER: StaticCell<SnifferApp> = StaticCell::new();
static BADUSB: StaticCell<BadUsbApp> = StaticCell::new();
static EDITOR: StaticCell<EditorApp> = StaticCell::new();

/// Current uptime as the shell's timestamp type
fn uptime() -> Instant {
    Instant::from_micros(embassy_time::Instant::now().as_micros())
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Soroban firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Key matrix: rows GPIO2-5 strobed low, columns GPIO6-9 pulled up
    let rows = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];
    let matrix = MatrixDriver::new(rows, cols);
    info!("Key matrix initialized");

    // TFT over SPI0: CLK=GPIO18, MOSI=GPIO19, DC=GPIO20, CS=GPIO17,
    // RST=GPIO21, backlight GPIO22
    let mut spi_config = spi::Config::default();
    spi_config.frequency = DISPLAY_SPI_HZ;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);

    let dc = Output::new(p.PIN_20, Level::Low);
    let cs = Output::new(p.PIN_17, Level::High);
    let rst = Output::new(p.PIN_21, Level::High);
    let mut backlight = Output::new(p.PIN_22, Level::Low);

    let mut panel = St7365p::new(spi, dc, cs, rst, Delay);
    match panel.init() {
        Ok(()) => info!("Display initialized"),
        Err(e) => error!("Display init failed: {:?}", e),
    }
    backlight.set_high();

    if let Err(e) = boot::splash(&mut panel).await {
        warn!("Boot splash failed: {:?}", e);
    }

    // Register apps; index 0 is home
    let mut registry = AppRegistry::new();
    registry.register(LAUNCHER.init(LauncherApp::new()));
    registry.register(CALCULATOR.init(CalculatorApp::new()));
    registry.register(STOPWATCH.init(StopwatchApp::new()));
    registry.register(WIFI_SCANNER.init(WifiScannerApp::new()));
    registry.register(SNIFFER.init(SnifferApp::new()));
    registry.register(BADUSB.init(BadUsbApp::new()));
    registry.register(EDITOR.init(EditorApp::new()));
    info!("{} apps registered", registry.count());

    let mut shell = Shell::new(matrix, registry);
    shell.start(uptime());
    info!("Shell running");

    // Cooperative loop: the shell decides internally whether a scan or
    // frame deadline is due; the yield keeps the executor responsive
    // without letting either deadline slip by more than ~1ms.
    loop {
        if let Err(e) = shell.tick(uptime(), &mut panel) {
            warn!("Frame dropped: {:?}", e);
        }
        Timer::after_micros(500).await;
    }
}
